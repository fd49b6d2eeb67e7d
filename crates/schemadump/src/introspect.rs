//! Live-schema introspection.
//!
//! Reads table layout out of a running MySQL server: `SHOW TABLE STATUS` for
//! the table list, `information_schema` for columns and foreign keys,
//! `SHOW KEYS` and `SHOW CREATE TABLE` for indexes and the raw DDL.

use futures::TryStreamExt;
use sqlx::mysql::MySqlPool;
use sqlx::Row;
use tracing::{debug, warn};

use schemadump_core::descriptor::{
    ColumnDescriptor, DefaultValue, ForeignKeyDescriptor, RawKeyRow, TableDescriptor,
};
use schemadump_core::dump::serialize_value;
use schemadump_core::keys;
use schemadump_core::script::Value;

use crate::error::Result;

/// One row of `SHOW TABLE STATUS`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableStatus {
    /// Table name as stored, prefix included.
    pub name: String,
    /// Table comment, empty when unset.
    pub comment: String,
}

/// Reads schema details from a live connection.
pub struct Introspector {
    pool: MySqlPool,
}

impl Introspector {
    /// Creates an introspector over a connection pool.
    #[must_use]
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Lists every table in the connected database with its comment.
    pub async fn table_status(&self) -> Result<Vec<TableStatus>> {
        let rows = sqlx::query("SHOW TABLE STATUS")
            .fetch_all(&self.pool)
            .await?;

        let mut tables = Vec::with_capacity(rows.len());
        for row in rows {
            tables.push(TableStatus {
                name: row.try_get("Name")?,
                comment: row.try_get("Comment")?,
            });
        }
        Ok(tables)
    }

    /// Builds the full descriptor for one table.
    pub async fn describe(&self, status: &TableStatus) -> Result<TableDescriptor> {
        let mut table = TableDescriptor::new(&status.name);
        if !status.comment.is_empty() {
            table = table.with_comment(&status.comment);
        }

        // Columns in ordinal order
        let columns: Vec<(String, String, String, Option<String>, String, String, String)> =
            sqlx::query_as(
                "SELECT COLUMN_NAME, COLUMN_TYPE, IS_NULLABLE, COLUMN_DEFAULT, \
                 COLUMN_KEY, EXTRA, COLUMN_COMMENT \
                 FROM information_schema.COLUMNS \
                 WHERE TABLE_SCHEMA = DATABASE() AND TABLE_NAME = ? \
                 ORDER BY ORDINAL_POSITION",
            )
            .bind(&status.name)
            .fetch_all(&self.pool)
            .await?;

        for (name, column_type, is_nullable, default, key, extra, comment) in columns {
            let mut column = ColumnDescriptor::new(name, column_type);
            if is_nullable == "NO" {
                column = column.not_null();
            }
            if key == "PRI" {
                column = column.primary_key();
            }
            if extra.contains("auto_increment") {
                column = column.auto_increment();
            }
            if let Some(raw) = default {
                let value = typed_default(&column, &raw);
                column = column.default_value(value);
            }
            if !comment.is_empty() {
                column = column.comment(comment);
            }
            table = table.with_column(column);
        }

        // Raw key rows, kept in reported order for grouping
        let key_rows = sqlx::query(&format!(
            "SHOW KEYS FROM `{}`",
            escape_identifier(&status.name)
        ))
        .fetch_all(&self.pool)
        .await?;

        for row in key_rows {
            let key_name: String = row.try_get("Key_name")?;
            let column_name: String = row.try_get("Column_name")?;
            let non_unique: i64 = row.try_get("Non_unique")?;
            table = table.with_key_row(RawKeyRow::new(key_name, column_name, non_unique != 0));
        }

        // Foreign keys, grouped by constraint in declaration order
        let fk_rows: Vec<(String, String, String, String)> = sqlx::query_as(
            "SELECT CONSTRAINT_NAME, COLUMN_NAME, REFERENCED_TABLE_NAME, REFERENCED_COLUMN_NAME \
             FROM information_schema.KEY_COLUMN_USAGE \
             WHERE TABLE_SCHEMA = DATABASE() AND TABLE_NAME = ? \
             AND REFERENCED_TABLE_NAME IS NOT NULL \
             ORDER BY CONSTRAINT_NAME, ORDINAL_POSITION",
        )
        .bind(&status.name)
        .fetch_all(&self.pool)
        .await?;

        let mut foreign_keys: Vec<ForeignKeyDescriptor> = Vec::new();
        for (constraint, column, referenced_table, referenced_column) in fk_rows {
            match foreign_keys.last_mut().filter(|fk| fk.name == constraint) {
                Some(fk) => {
                    fk.columns.push(column);
                    fk.referenced_columns.push(referenced_column);
                }
                None => foreign_keys.push(ForeignKeyDescriptor {
                    name: constraint,
                    columns: vec![column],
                    referenced_table,
                    referenced_columns: vec![referenced_column],
                    on_delete: None,
                    on_update: None,
                }),
            }
        }

        // The raw DDL carries what information_schema does not: referential
        // actions and the auto-increment start.
        let ddl_row = sqlx::query(&format!(
            "SHOW CREATE TABLE `{}`",
            escape_identifier(&status.name)
        ))
        .fetch_one(&self.pool)
        .await?;
        let ddl: String = ddl_row.try_get(1)?;

        let actions = keys::referential_actions(&ddl);
        for fk in &mut foreign_keys {
            if let Some((on_delete, on_update)) = actions.get(&fk.name) {
                fk.on_delete = *on_delete;
                fk.on_update = *on_update;
            }
        }
        for fk in foreign_keys {
            table = table.with_foreign_key(fk);
        }

        Ok(table.with_create_ddl(ddl))
    }

    /// Fetches one page of rows, every cell cast to text.
    pub async fn fetch_page(
        &self,
        table: &TableDescriptor,
        offset: u64,
        count: u64,
    ) -> Result<Vec<Vec<Value>>> {
        let projection = table
            .columns
            .iter()
            .map(|c| {
                let name = escape_identifier(&c.name);
                format!("CAST(`{name}` AS CHAR) AS `{name}`")
            })
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "SELECT {projection} FROM `{}` LIMIT {count} OFFSET {offset}",
            escape_identifier(&table.name)
        );
        debug!(sql = %sql, "Fetching page");

        let mut rows = sqlx::query(&sql).fetch(&self.pool);
        let mut page = Vec::new();
        while let Some(row) = rows.try_next().await? {
            let mut values = Vec::with_capacity(table.columns.len());
            for (index, column) in table.columns.iter().enumerate() {
                let cell: Option<String> = row.try_get(index)?;
                values.push(serialize_value(column, cell.as_deref()));
            }
            page.push(values);
        }
        Ok(page)
    }
}

/// Types a raw column default the way the generated scripts expect it.
fn typed_default(column: &ColumnDescriptor, raw: &str) -> DefaultValue {
    if raw.to_ascii_uppercase().starts_with("CURRENT_TIMESTAMP") {
        return DefaultValue::Expression(raw.to_string());
    }
    if column.native_type == "tinyint(1)" {
        return DefaultValue::Bool(raw != "0");
    }
    if column.native_type.contains("int") {
        return raw.parse::<i64>().map_or_else(
            |_| {
                warn!(column = %column.name, default = %raw, "Unparseable integer default kept as string");
                DefaultValue::Str(raw.to_string())
            },
            DefaultValue::Int,
        );
    }
    DefaultValue::Str(raw.to_string())
}

/// Doubles backticks so a name can sit inside a backtick-quoted identifier.
fn escape_identifier(name: &str) -> String {
    name.replace('`', "``")
}
