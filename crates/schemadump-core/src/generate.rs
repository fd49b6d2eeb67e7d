//! Per-aspect script body generation.
//!
//! Each generator renders the body lines of one `up()`/`down()` pair.
//! Table and key names are stripped of the storage prefix so replay can
//! apply the target's own prefix. An empty pair means the aspect has
//! nothing to say about the table and no artifact is written.

use crate::descriptor::TableDescriptor;
use crate::keys::{auto_increment_start, group_key_rows};
use crate::script::ReferentialAction;
use crate::select::strip_prefix;
use crate::typemap::{escape_str, render_column};

/// Paired forward/backward script bodies for one table aspect.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptPair {
    /// Body lines of `up()`.
    pub forward: String,
    /// Body lines of `down()`.
    pub backward: String,
}

/// Generates the structure pair: create table forward, drop table backward.
#[must_use]
pub fn structure_scripts(table: &TableDescriptor, prefix: &str, table_options: &str) -> ScriptPair {
    let name = strip_prefix(&table.name, prefix);

    let mut forward = String::new();
    forward.push_str("            CreateTableBuilder::new()\n");
    forward.push_str(&format!("                .name(\"{}\")\n", escape_str(&name)));
    for column in &table.columns {
        forward.push_str(&format!(
            "                .column({})\n",
            render_column(column)
        ));
    }
    if !table_options.is_empty() {
        forward.push_str(&format!(
            "                .options(\"{}\")\n",
            escape_str(table_options)
        ));
    }
    forward.push_str("                .build()\n");
    forward.push_str("                .into(),\n");

    if let Some(comment) = table.comment.as_deref().filter(|c| !c.is_empty()) {
        forward.push_str(&format!(
            "            Operation::add_table_comment(\"{}\", \"{}\"),\n",
            escape_str(&name),
            escape_str(comment)
        ));
    }

    let backward = format!(
        "            Operation::drop_table(\"{}\"),\n",
        escape_str(&name)
    );

    ScriptPair { forward, backward }
}

/// Generates the data pair from pre-rendered batch inserts.
///
/// The forward script wraps every batch in a single transaction; the
/// backward script rolls that transaction back instead of truncating.
/// No batches means no pair.
#[must_use]
pub fn data_scripts(batches: &[String]) -> ScriptPair {
    if batches.is_empty() {
        return ScriptPair::default();
    }

    let mut forward = String::from("            Operation::begin(),\n");
    for batch in batches {
        forward.push_str(batch);
    }
    forward.push_str("            Operation::commit(),\n");

    ScriptPair {
        forward,
        backward: "            Operation::rollback(),\n".to_string(),
    }
}

/// Generates the key pair: primary key, auto-increment and indexes.
///
/// The backward script strips auto-increment before dropping the primary
/// key; MySQL refuses to drop a key an auto-incremented column rides on.
#[must_use]
pub fn key_scripts(table: &TableDescriptor, prefix: &str) -> ScriptPair {
    let groups = group_key_rows(&table.key_rows);
    if groups.is_empty() {
        return ScriptPair::default();
    }

    let name = strip_prefix(&table.name, prefix);
    let start = auto_increment_start(&table.create_ddl);
    let mut forward = String::new();
    let mut backward = String::new();

    for group in &groups {
        if group.is_primary() {
            forward.push_str(&format!(
                "            Operation::add_primary_key(\"{}\", &[{}]),\n",
                escape_str(&name),
                column_list(&group.columns)
            ));
            for column in &group.columns {
                let Some(col) = table.find_column(column).filter(|c| c.auto_increment) else {
                    continue;
                };
                forward.push_str(&format!(
                    "            Operation::set_auto_increment(\"{}\", \"{}\", \"{}\", {}, {start}),\n",
                    escape_str(&name),
                    escape_str(&col.name),
                    escape_str(&col.type_name),
                    col.unsigned
                ));
                backward.push_str(&format!(
                    "            Operation::drop_auto_increment(\"{}\", \"{}\", \"{}\", {}),\n",
                    escape_str(&name),
                    escape_str(&col.name),
                    escape_str(&col.type_name),
                    col.unsigned
                ));
            }
            backward.push_str(&format!(
                "            Operation::drop_primary_key(\"{}\"),\n",
                escape_str(&name)
            ));
        } else {
            let key_name = strip_prefix(&group.name, prefix);
            forward.push_str(&format!(
                "            Operation::create_index(\"{}\", \"{}\", &[{}], {}),\n",
                escape_str(&key_name),
                escape_str(&name),
                column_list(&group.columns),
                group.unique
            ));
            backward.push_str(&format!(
                "            Operation::drop_index(\"{}\", \"{}\"),\n",
                escape_str(&key_name),
                escape_str(&name)
            ));
        }
    }

    ScriptPair { forward, backward }
}

/// Generates the foreign key pair. No constraints means no pair.
#[must_use]
pub fn foreign_key_scripts(table: &TableDescriptor, prefix: &str) -> ScriptPair {
    if table.foreign_keys.is_empty() {
        return ScriptPair::default();
    }

    let name = strip_prefix(&table.name, prefix);
    let mut forward = String::new();
    let mut backward = String::new();

    for fk in &table.foreign_keys {
        let fk_name = strip_prefix(&fk.name, prefix);
        forward.push_str(&format!(
            "            Operation::add_foreign_key(\"{}\", \"{}\", &[{}], \"{}\", &[{}], {}, {}),\n",
            escape_str(&fk_name),
            escape_str(&name),
            column_list(&fk.columns),
            escape_str(&strip_prefix(&fk.referenced_table, prefix)),
            column_list(&fk.referenced_columns),
            render_action(fk.on_delete),
            render_action(fk.on_update)
        ));
        backward.push_str(&format!(
            "            Operation::drop_foreign_key(\"{}\", \"{}\"),\n",
            escape_str(&fk_name),
            escape_str(&name)
        ));
    }

    ScriptPair { forward, backward }
}

fn column_list(columns: &[String]) -> String {
    columns
        .iter()
        .map(|c| format!("\"{}\"", escape_str(c)))
        .collect::<Vec<_>>()
        .join(", ")
}

fn render_action(action: Option<ReferentialAction>) -> String {
    action.map_or_else(
        || "None".to_string(),
        |a| {
            let variant = match a {
                ReferentialAction::Restrict => "Restrict",
                ReferentialAction::Cascade => "Cascade",
                ReferentialAction::NoAction => "NoAction",
                ReferentialAction::SetDefault => "SetDefault",
                ReferentialAction::SetNull => "SetNull",
            };
            format!("Some(ReferentialAction::{variant})")
        },
    )
}
