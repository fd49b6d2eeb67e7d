//! End-to-end pipeline tests: table descriptors in, rendered migration
//! artifacts out, one file per aspect.

use schemadump_core::assemble::{render_migration_file, Aspect, ChangeUnit};
use schemadump_core::descriptor::{
    ColumnDescriptor, DefaultValue, ForeignKeyDescriptor, RawKeyRow, TableDescriptor,
};
use schemadump_core::dump::{render_batch_insert, serialize_value, LimitSpec};
use schemadump_core::generate::{
    data_scripts, foreign_key_scripts, key_scripts, structure_scripts,
};
use schemadump_core::script::ReferentialAction;

const FILE_PREFIX: &str = "230817_101530";
const TABLE_OPTIONS: &str = "ENGINE=InnoDB DEFAULT CHARSET=utf8 COLLATE=utf8_unicode_ci";
const PREFIX: &str = "app_";

// =============================================================================
// Fixture: a realistic user table with every aspect populated
// =============================================================================

fn user_table() -> TableDescriptor {
    TableDescriptor::new("app_user")
        .with_column(
            ColumnDescriptor::new("id", "bigint(20) unsigned")
                .not_null()
                .primary_key()
                .auto_increment(),
        )
        .with_column(ColumnDescriptor::new("email", "varchar(255)").not_null())
        .with_column(
            ColumnDescriptor::new("status", "enum('active','locked')")
                .not_null()
                .default_value(DefaultValue::Str("active".to_string()))
                .comment("account state"),
        )
        .with_column(
            ColumnDescriptor::new("is_admin", "tinyint(1)")
                .not_null()
                .default_value(DefaultValue::Bool(false)),
        )
        .with_column(
            ColumnDescriptor::new("created_at", "timestamp")
                .not_null()
                .default_value(DefaultValue::Expression("CURRENT_TIMESTAMP".to_string())),
        )
        .with_column(ColumnDescriptor::new("bio", "text"))
        .with_key_row(RawKeyRow::new("PRIMARY", "id", false))
        .with_key_row(RawKeyRow::new("app_idx_email", "email", false))
        .with_foreign_key(ForeignKeyDescriptor {
            name: "app_fk_user_team".to_string(),
            columns: vec!["team_id".to_string()],
            referenced_table: "app_team".to_string(),
            referenced_columns: vec!["id".to_string()],
            on_delete: Some(ReferentialAction::Cascade),
            on_update: Some(ReferentialAction::Restrict),
        })
        .with_create_ddl(
            "CREATE TABLE `app_user` (\n  `id` bigint(20) unsigned NOT NULL AUTO_INCREMENT\n) \
             ENGINE=InnoDB AUTO_INCREMENT=100 DEFAULT CHARSET=utf8",
        )
        .with_comment("accounts")
}

fn data_batches() -> Vec<String> {
    let columns = vec!["id".to_string(), "email".to_string(), "bio".to_string()];
    let table = user_table();
    let id = table.find_column("id").unwrap();
    let email = table.find_column("email").unwrap();
    let bio = table.find_column("bio").unwrap();

    let rows = vec![
        vec![
            serialize_value(id, Some("1")),
            serialize_value(email, Some("alice@example.com")),
            serialize_value(bio, Some("first\r\nline")),
        ],
        vec![
            serialize_value(id, Some("2")),
            serialize_value(email, Some("bob@example.com")),
            serialize_value(bio, None),
        ],
    ];

    vec![render_batch_insert("user", &columns, &rows)]
}

fn user_units() -> Vec<ChangeUnit> {
    let table = user_table();
    vec![
        ChangeUnit::new(
            "user",
            Aspect::Structure,
            structure_scripts(&table, PREFIX, TABLE_OPTIONS),
            FILE_PREFIX,
        ),
        ChangeUnit::new("user", Aspect::Data, data_scripts(&data_batches()), FILE_PREFIX),
        ChangeUnit::new("user", Aspect::Key, key_scripts(&table, PREFIX), FILE_PREFIX),
        ChangeUnit::new(
            "user",
            Aspect::ForeignKey,
            foreign_key_scripts(&table, PREFIX),
            FILE_PREFIX,
        ),
    ]
}

// =============================================================================
// Artifact set
// =============================================================================

#[test]
fn every_aspect_yields_a_named_artifact() {
    let units = user_units();
    let names: Vec<&str> = units.iter().map(|u| u.name.as_str()).collect();

    assert_eq!(
        names,
        vec![
            "m230817_101530_0_table_user",
            "m230817_101530_1_table_data_user",
            "m230817_101530_2_key_user",
            "m230817_101530_3_foreign_key_user",
        ]
    );

    let mut sorted = names.clone();
    sorted.sort_unstable();
    assert_eq!(names, sorted, "lexical order must equal replay order");

    for unit in &units {
        assert!(!unit.is_empty(), "aspect {:?} should have scripts", unit.aspect);
    }
}

#[test]
fn structure_artifact_compiles_the_table_definition() {
    let units = user_units();
    let code = render_migration_file(&units[0]);

    assert!(code.contains("pub struct M2308171015300TableUser;"));
    assert!(code.contains("const ID: &'static str = \"m230817_101530_0_table_user\";"));

    // Prefix is stripped from the stored name.
    assert!(code.contains(".name(\"user\")"));
    assert!(!code.contains("app_user"));

    assert!(code.contains(".column(bigint(\"id\").width(20).unsigned().build())"));
    assert!(code.contains(
        ".column(custom(\"status\", \"ENUM ('active', 'locked') NOT NULL DEFAULT 'active' \
         COMMENT 'account state'\").build())"
    ));
    assert!(code.contains(".column(boolean(\"is_admin\").not_null().default_bool(false).build())"));
    assert!(code.contains(
        ".column(timestamp(\"created_at\").not_null().default_expr(\"CURRENT_TIMESTAMP\").build())"
    ));
    assert!(code.contains(".column(text(\"bio\").null().build())"));
    assert!(code.contains(&format!(".options(\"{TABLE_OPTIONS}\")")));
    assert!(code.contains("Operation::add_table_comment(\"user\", \"accounts\")"));

    assert!(code.contains("Operation::drop_table(\"user\")"));
}

#[test]
fn key_artifact_orders_drops_safely() {
    let units = user_units();
    let code = render_migration_file(&units[2]);

    assert!(code.contains("Operation::add_primary_key(\"user\", &[\"id\"])"));
    assert!(code.contains("Operation::set_auto_increment(\"user\", \"id\", \"bigint\", true, 100)"));
    assert!(code.contains("Operation::create_index(\"idx_email\", \"user\", &[\"email\"], true)"));

    let down = code.find("fn down()").unwrap();
    let ai_drop = code.find("Operation::drop_auto_increment").unwrap();
    let pk_drop = code.find("Operation::drop_primary_key").unwrap();
    assert!(ai_drop > down && pk_drop > down);
    assert!(
        ai_drop < pk_drop,
        "auto-increment must be stripped before the primary key goes"
    );
}

#[test]
fn foreign_key_artifact_renders_actions() {
    let units = user_units();
    let code = render_migration_file(&units[3]);

    assert!(code.contains(
        "Operation::add_foreign_key(\"fk_user_team\", \"user\", &[\"team_id\"], \"team\", \
         &[\"id\"], Some(ReferentialAction::Cascade), Some(ReferentialAction::Restrict))"
    ));
    assert!(code.contains("Operation::drop_foreign_key(\"fk_user_team\", \"user\")"));
}

#[test]
fn data_artifact_wraps_rows_in_one_transaction() {
    let units = user_units();
    let code = render_migration_file(&units[1]);

    assert_eq!(code.matches("Operation::begin()").count(), 1);
    assert_eq!(code.matches("Operation::commit()").count(), 1);
    assert!(code.contains("vec![Value::Int(1), Value::Str(\"alice@example.com\".into()), Value::Str(\"first\\nline\".into())],"));
    assert!(code.contains("vec![Value::Int(2), Value::Str(\"bob@example.com\".into()), Value::Null],"));

    // Backwards is a rollback, never a truncate.
    let down = code.find("fn down()").unwrap();
    assert!(code[down..].contains("Operation::rollback()"));
    assert!(!code.contains("truncate"));
}

// =============================================================================
// Degenerate tables
// =============================================================================

#[test]
fn bare_table_produces_empty_key_and_fk_units() {
    let table = TableDescriptor::new("plain")
        .with_column(ColumnDescriptor::new("v", "varchar(16)").not_null());

    let key_unit = ChangeUnit::new("plain", Aspect::Key, key_scripts(&table, ""), FILE_PREFIX);
    let fk_unit = ChangeUnit::new(
        "plain",
        Aspect::ForeignKey,
        foreign_key_scripts(&table, ""),
        FILE_PREFIX,
    );

    assert!(key_unit.is_empty());
    assert!(fk_unit.is_empty());
}

#[test]
fn zero_row_limit_dumps_nothing() {
    let pages: Vec<_> = LimitSpec::parse("0,0").unwrap().pages().collect();
    assert!(pages.is_empty());

    let unit = ChangeUnit::new("user", Aspect::Data, data_scripts(&[]), FILE_PREFIX);
    assert!(unit.is_empty());
}
