//! Type-safe CREATE TABLE builder using the typestate pattern.
//!
//! A table cannot be built without a name and at least one column; both
//! requirements are enforced at compile time. Keys and constraints never
//! appear here, they travel in separate key scripts.

use std::marker::PhantomData;

use super::column::ColumnDefinition;
use super::operation::CreateTableOp;

// =============================================================================
// Typestate Markers
// =============================================================================

/// Marker: table has no name set.
#[derive(Debug, Clone, Copy)]
pub struct NoName;

/// Marker: table has a name set.
#[derive(Debug, Clone, Copy)]
pub struct HasName;

/// Marker: table has no columns.
#[derive(Debug, Clone, Copy)]
pub struct NoColumns;

/// Marker: table has at least one column.
#[derive(Debug, Clone, Copy)]
pub struct HasColumns;

/// Type-safe CREATE TABLE builder.
///
/// # Example
///
/// ```rust
/// use schemadump_core::script::{CreateTableBuilder, bigint, varchar};
///
/// let op = CreateTableBuilder::new()
///     .name("user")
///     .column(bigint("id").unsigned().build())
///     .column(varchar("name", 255).not_null().default_str("").build())
///     .options("ENGINE=InnoDB DEFAULT CHARSET=utf8")
///     .build();
///
/// assert_eq!(op.name, "user");
/// assert_eq!(op.columns.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct CreateTableBuilder<Name, Cols> {
    name: Option<String>,
    columns: Vec<ColumnDefinition>,
    options: Option<String>,
    _state: PhantomData<(Name, Cols)>,
}

impl Default for CreateTableBuilder<NoName, NoColumns> {
    fn default() -> Self {
        Self::new()
    }
}

impl CreateTableBuilder<NoName, NoColumns> {
    /// Creates a new `CreateTableBuilder`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            name: None,
            columns: Vec::new(),
            options: None,
            _state: PhantomData,
        }
    }
}

impl<Cols> CreateTableBuilder<NoName, Cols> {
    /// Sets the table name.
    #[must_use]
    pub fn name(self, name: impl Into<String>) -> CreateTableBuilder<HasName, Cols> {
        CreateTableBuilder {
            name: Some(name.into()),
            columns: self.columns,
            options: self.options,
            _state: PhantomData,
        }
    }
}

impl<Name> CreateTableBuilder<Name, NoColumns> {
    /// Adds the first column to the table.
    #[must_use]
    pub fn column(self, column: ColumnDefinition) -> CreateTableBuilder<Name, HasColumns> {
        CreateTableBuilder {
            name: self.name,
            columns: vec![column],
            options: self.options,
            _state: PhantomData,
        }
    }
}

impl<Name> CreateTableBuilder<Name, HasColumns> {
    /// Adds another column to the table.
    #[must_use]
    pub fn column(mut self, column: ColumnDefinition) -> Self {
        self.columns.push(column);
        self
    }
}

impl<Name, Cols> CreateTableBuilder<Name, Cols> {
    /// Sets raw table options appended to the CREATE TABLE statement,
    /// such as engine and character set.
    #[must_use]
    pub fn options(mut self, options: impl Into<String>) -> Self {
        self.options = Some(options.into());
        self
    }
}

impl CreateTableBuilder<HasName, HasColumns> {
    /// Builds the `CreateTableOp`.
    #[must_use]
    pub fn build(self) -> CreateTableOp {
        CreateTableOp {
            name: self.name.expect("Name was set"),
            columns: self.columns,
            options: self.options,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::column::{bigint, boolean, timestamp, varchar};

    #[test]
    fn test_create_table_builder() {
        let op = CreateTableBuilder::new()
            .name("user")
            .column(bigint("id").unsigned().build())
            .column(varchar("username", 255).not_null().build())
            .column(
                timestamp("created_at")
                    .not_null()
                    .default_expr("CURRENT_TIMESTAMP")
                    .build(),
            )
            .build();

        assert_eq!(op.name, "user");
        assert_eq!(op.columns.len(), 3);
        assert_eq!(op.options, None);

        let id_col = &op.columns[0];
        assert_eq!(id_col.name, "id");
        assert!(id_col.unsigned);
    }

    #[test]
    fn test_table_options() {
        let op = CreateTableBuilder::new()
            .name("user")
            .column(bigint("id").build())
            .options("ENGINE=InnoDB DEFAULT CHARSET=utf8 COLLATE=utf8_unicode_ci")
            .build();

        assert_eq!(
            op.options.as_deref(),
            Some("ENGINE=InnoDB DEFAULT CHARSET=utf8 COLLATE=utf8_unicode_ci")
        );
    }

    #[test]
    fn test_fluent_api_order() {
        // Options may be set before or after name and columns.
        let op1 = CreateTableBuilder::new()
            .name("test")
            .column(boolean("flag").build())
            .options("ENGINE=InnoDB")
            .build();

        let op2 = CreateTableBuilder::new()
            .options("ENGINE=InnoDB")
            .name("test")
            .column(boolean("flag").build())
            .build();

        assert_eq!(op1.name, op2.name);
        assert_eq!(op1.options, op2.options);
    }
}
