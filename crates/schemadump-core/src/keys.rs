//! Key and constraint extraction.
//!
//! Groups raw `SHOW KEYS` rows into named keys and recovers what the
//! catalog tables do not expose: referential actions and the
//! auto-increment counter, both parsed out of the raw `SHOW CREATE TABLE`
//! DDL. Every regex in the crate lives here.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::descriptor::{KeyGroup, RawKeyRow};
use crate::script::ReferentialAction;

static CONSTRAINT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"CONSTRAINT `([0-9a-zA-Z_]+)` FOREIGN KEY .*").expect("constraint pattern")
});

static ON_DELETE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"ON DELETE (RESTRICT|CASCADE|NO ACTION|SET DEFAULT|SET NULL)")
        .expect("on delete pattern")
});

static ON_UPDATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"ON UPDATE (RESTRICT|CASCADE|NO ACTION|SET DEFAULT|SET NULL)")
        .expect("on update pattern")
});

const AUTO_INCREMENT_MARKER: &str = "AUTO_INCREMENT=";

/// Groups raw `SHOW KEYS` rows by key name, preserving first-seen key
/// order and row order within each key.
///
/// Uniqueness of a key is taken from its first row.
#[must_use]
pub fn group_key_rows(rows: &[RawKeyRow]) -> Vec<KeyGroup> {
    let mut groups: Vec<KeyGroup> = Vec::new();

    for row in rows {
        if let Some(group) = groups.iter_mut().find(|g| g.name == row.key_name) {
            group.columns.push(row.column_name.clone());
        } else {
            groups.push(KeyGroup {
                name: row.key_name.clone(),
                columns: vec![row.column_name.clone()],
                unique: !row.non_unique,
            });
        }
    }

    groups
}

/// Recovers ON DELETE / ON UPDATE actions per constraint name from raw DDL.
///
/// A constraint line that declares neither action still gets an entry, so
/// lookups distinguish "no actions declared" from "constraint unknown".
#[must_use]
pub fn referential_actions(
    create_ddl: &str,
) -> HashMap<String, (Option<ReferentialAction>, Option<ReferentialAction>)> {
    let mut actions = HashMap::new();

    for caps in CONSTRAINT_LINE.captures_iter(create_ddl) {
        let name = caps[1].to_string();
        let line = &caps[0];

        let on_delete = ON_DELETE
            .captures(line)
            .and_then(|c| ReferentialAction::from_sql(&c[1]));
        let on_update = ON_UPDATE
            .captures(line)
            .and_then(|c| ReferentialAction::from_sql(&c[1]));

        if on_delete.is_none() && on_update.is_none() {
            debug!(constraint = %name, "no referential actions declared");
        }

        actions.insert(name, (on_delete, on_update));
    }

    actions
}

/// Auto-increment counter parsed from raw DDL; zero when absent.
#[must_use]
pub fn auto_increment_start(create_ddl: &str) -> u64 {
    create_ddl.find(AUTO_INCREMENT_MARKER).map_or(0, |pos| {
        create_ddl[pos + AUTO_INCREMENT_MARKER.len()..]
            .chars()
            .take_while(char::is_ascii_digit)
            .collect::<String>()
            .parse()
            .unwrap_or(0)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const USER_DDL: &str = "CREATE TABLE `user` (\n\
        \x20 `id` bigint(20) unsigned NOT NULL AUTO_INCREMENT,\n\
        \x20 `role_id` int(11) DEFAULT NULL,\n\
        \x20 PRIMARY KEY (`id`),\n\
        \x20 KEY `fk_user_role` (`role_id`),\n\
        \x20 CONSTRAINT `fk_user_role` FOREIGN KEY (`role_id`) REFERENCES `role` (`id`) ON DELETE SET NULL ON UPDATE CASCADE\n\
        ) ENGINE=InnoDB AUTO_INCREMENT=42 DEFAULT CHARSET=utf8";

    #[test]
    fn test_group_key_rows_by_name() {
        let rows = vec![
            RawKeyRow::new("PRIMARY", "order_id", false),
            RawKeyRow::new("PRIMARY", "product_id", false),
            RawKeyRow::new("idx_product", "product_id", true),
        ];

        let groups = group_key_rows(&rows);
        assert_eq!(groups.len(), 2);

        assert_eq!(groups[0].name, "PRIMARY");
        assert_eq!(groups[0].columns, vec!["order_id", "product_id"]);
        assert!(groups[0].unique);

        assert_eq!(groups[1].name, "idx_product");
        assert!(!groups[1].unique);
    }

    #[test]
    fn test_group_preserves_first_seen_order() {
        let rows = vec![
            RawKeyRow::new("idx_b", "b", true),
            RawKeyRow::new("idx_a", "a", true),
            RawKeyRow::new("idx_b", "c", true),
        ];

        let groups = group_key_rows(&rows);
        assert_eq!(groups[0].name, "idx_b");
        assert_eq!(groups[0].columns, vec!["b", "c"]);
        assert_eq!(groups[1].name, "idx_a");
    }

    #[test]
    fn test_referential_actions_from_ddl() {
        let actions = referential_actions(USER_DDL);
        assert_eq!(
            actions.get("fk_user_role"),
            Some(&(
                Some(ReferentialAction::SetNull),
                Some(ReferentialAction::Cascade)
            ))
        );
    }

    #[test]
    fn test_constraint_without_actions_still_recorded() {
        let ddl = "CONSTRAINT `fk_plain` FOREIGN KEY (`a`) REFERENCES `b` (`id`)";
        let actions = referential_actions(ddl);
        assert_eq!(actions.get("fk_plain"), Some(&(None, None)));
    }

    #[test]
    fn test_unknown_constraint_is_absent() {
        let actions = referential_actions(USER_DDL);
        assert_eq!(actions.get("fk_missing"), None);
    }

    #[test]
    fn test_auto_increment_start() {
        assert_eq!(auto_increment_start(USER_DDL), 42);
        assert_eq!(auto_increment_start("CREATE TABLE `t` () ENGINE=InnoDB"), 0);
    }
}
