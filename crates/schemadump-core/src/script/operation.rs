//! Replayable migration operations.
//!
//! Generated scripts are vectors of these operations. Forward and backward
//! scripts use the same vocabulary; nothing here executes SQL.

use super::column::ColumnDefinition;

/// A literal cell value in a data script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// SQL NULL.
    Null,
    /// Integer literal.
    Int(i64),
    /// String literal.
    Str(String),
}

/// ON DELETE / ON UPDATE behavior of a foreign key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferentialAction {
    /// RESTRICT.
    Restrict,
    /// CASCADE.
    Cascade,
    /// NO ACTION.
    NoAction,
    /// SET DEFAULT.
    SetDefault,
    /// SET NULL.
    SetNull,
}

impl ReferentialAction {
    /// SQL fragment for this action.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Restrict => "RESTRICT",
            Self::Cascade => "CASCADE",
            Self::NoAction => "NO ACTION",
            Self::SetDefault => "SET DEFAULT",
            Self::SetNull => "SET NULL",
        }
    }

    /// Parses the SQL spelling back into an action.
    #[must_use]
    pub fn from_sql(sql: &str) -> Option<Self> {
        match sql {
            "RESTRICT" => Some(Self::Restrict),
            "CASCADE" => Some(Self::Cascade),
            "NO ACTION" => Some(Self::NoAction),
            "SET DEFAULT" => Some(Self::SetDefault),
            "SET NULL" => Some(Self::SetNull),
            _ => None,
        }
    }
}

/// All possible migration operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Create a new table.
    CreateTable(CreateTableOp),
    /// Drop an existing table.
    DropTable(DropTableOp),
    /// Attach a comment to a table.
    AddTableComment(TableCommentOp),
    /// Add a primary key over one or more columns.
    AddPrimaryKey(AddPrimaryKeyOp),
    /// Drop the primary key.
    DropPrimaryKey(DropPrimaryKeyOp),
    /// Make a column auto-incremented, optionally from a start value.
    SetAutoIncrement(SetAutoIncrementOp),
    /// Strip the auto-increment attribute from a column.
    DropAutoIncrement(DropAutoIncrementOp),
    /// Create an index.
    CreateIndex(CreateIndexOp),
    /// Drop an index.
    DropIndex(DropIndexOp),
    /// Add a foreign key constraint.
    AddForeignKey(AddForeignKeyOp),
    /// Drop a foreign key constraint.
    DropForeignKey(DropForeignKeyOp),
    /// Open a transaction.
    Begin,
    /// Commit the open transaction.
    Commit,
    /// Roll the open transaction back.
    Rollback,
    /// Insert a batch of rows.
    BatchInsert(BatchInsertOp),
}

impl Operation {
    /// Creates a drop table operation.
    #[must_use]
    pub fn drop_table(name: impl Into<String>) -> Self {
        Self::DropTable(DropTableOp { name: name.into() })
    }

    /// Creates a table comment operation.
    #[must_use]
    pub fn add_table_comment(table: impl Into<String>, comment: impl Into<String>) -> Self {
        Self::AddTableComment(TableCommentOp {
            table: table.into(),
            comment: comment.into(),
        })
    }

    /// Creates an add primary key operation.
    #[must_use]
    pub fn add_primary_key(table: impl Into<String>, columns: &[&str]) -> Self {
        Self::AddPrimaryKey(AddPrimaryKeyOp {
            table: table.into(),
            columns: columns.iter().map(|&s| s.to_string()).collect(),
        })
    }

    /// Creates a drop primary key operation.
    #[must_use]
    pub fn drop_primary_key(table: impl Into<String>) -> Self {
        Self::DropPrimaryKey(DropPrimaryKeyOp {
            table: table.into(),
        })
    }

    /// Creates a set auto-increment operation.
    ///
    /// `start` of zero means the counter is left untouched.
    #[must_use]
    pub fn set_auto_increment(
        table: impl Into<String>,
        column: impl Into<String>,
        column_type: impl Into<String>,
        unsigned: bool,
        start: u64,
    ) -> Self {
        Self::SetAutoIncrement(SetAutoIncrementOp {
            table: table.into(),
            column: column.into(),
            column_type: column_type.into(),
            unsigned,
            start,
        })
    }

    /// Creates a drop auto-increment operation.
    #[must_use]
    pub fn drop_auto_increment(
        table: impl Into<String>,
        column: impl Into<String>,
        column_type: impl Into<String>,
        unsigned: bool,
    ) -> Self {
        Self::DropAutoIncrement(DropAutoIncrementOp {
            table: table.into(),
            column: column.into(),
            column_type: column_type.into(),
            unsigned,
        })
    }

    /// Creates a create index operation.
    #[must_use]
    pub fn create_index(
        name: impl Into<String>,
        table: impl Into<String>,
        columns: &[&str],
        unique: bool,
    ) -> Self {
        Self::CreateIndex(CreateIndexOp {
            name: name.into(),
            table: table.into(),
            columns: columns.iter().map(|&s| s.to_string()).collect(),
            unique,
        })
    }

    /// Creates a drop index operation.
    #[must_use]
    pub fn drop_index(name: impl Into<String>, table: impl Into<String>) -> Self {
        Self::DropIndex(DropIndexOp {
            name: name.into(),
            table: table.into(),
        })
    }

    /// Creates an add foreign key operation.
    #[must_use]
    pub fn add_foreign_key(
        name: impl Into<String>,
        table: impl Into<String>,
        columns: &[&str],
        referenced_table: impl Into<String>,
        referenced_columns: &[&str],
        on_delete: Option<ReferentialAction>,
        on_update: Option<ReferentialAction>,
    ) -> Self {
        Self::AddForeignKey(AddForeignKeyOp {
            name: name.into(),
            table: table.into(),
            columns: columns.iter().map(|&s| s.to_string()).collect(),
            referenced_table: referenced_table.into(),
            referenced_columns: referenced_columns.iter().map(|&s| s.to_string()).collect(),
            on_delete,
            on_update,
        })
    }

    /// Creates a drop foreign key operation.
    #[must_use]
    pub fn drop_foreign_key(name: impl Into<String>, table: impl Into<String>) -> Self {
        Self::DropForeignKey(DropForeignKeyOp {
            name: name.into(),
            table: table.into(),
        })
    }

    /// Creates a begin transaction operation.
    #[must_use]
    pub const fn begin() -> Self {
        Self::Begin
    }

    /// Creates a commit transaction operation.
    #[must_use]
    pub const fn commit() -> Self {
        Self::Commit
    }

    /// Creates a rollback transaction operation.
    #[must_use]
    pub const fn rollback() -> Self {
        Self::Rollback
    }

    /// Creates a batch insert operation.
    #[must_use]
    pub fn batch_insert(
        table: impl Into<String>,
        columns: &[&str],
        rows: Vec<Vec<Value>>,
    ) -> Self {
        Self::BatchInsert(BatchInsertOp {
            table: table.into(),
            columns: columns.iter().map(|&s| s.to_string()).collect(),
            rows,
        })
    }
}

/// Create table operation.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTableOp {
    /// Table name.
    pub name: String,
    /// Column definitions.
    pub columns: Vec<ColumnDefinition>,
    /// Raw table options appended to the statement.
    pub options: Option<String>,
}

impl From<CreateTableOp> for Operation {
    fn from(op: CreateTableOp) -> Self {
        Self::CreateTable(op)
    }
}

/// Drop table operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropTableOp {
    /// Table name.
    pub name: String,
}

impl From<DropTableOp> for Operation {
    fn from(op: DropTableOp) -> Self {
        Self::DropTable(op)
    }
}

/// Table comment operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableCommentOp {
    /// Table name.
    pub table: String,
    /// Comment text.
    pub comment: String,
}

impl From<TableCommentOp> for Operation {
    fn from(op: TableCommentOp) -> Self {
        Self::AddTableComment(op)
    }
}

/// Add primary key operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddPrimaryKeyOp {
    /// Table name.
    pub table: String,
    /// Key columns, in key order.
    pub columns: Vec<String>,
}

impl From<AddPrimaryKeyOp> for Operation {
    fn from(op: AddPrimaryKeyOp) -> Self {
        Self::AddPrimaryKey(op)
    }
}

/// Drop primary key operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropPrimaryKeyOp {
    /// Table name.
    pub table: String,
}

impl From<DropPrimaryKeyOp> for Operation {
    fn from(op: DropPrimaryKeyOp) -> Self {
        Self::DropPrimaryKey(op)
    }
}

/// Set auto-increment operation.
///
/// Redefining the column requires its type, so the raw type name and
/// signedness travel with the operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetAutoIncrementOp {
    /// Table name.
    pub table: String,
    /// Column name.
    pub column: String,
    /// Base column type, e.g. `bigint`.
    pub column_type: String,
    /// Whether the column is unsigned.
    pub unsigned: bool,
    /// Counter start value; zero leaves the counter untouched.
    pub start: u64,
}

impl From<SetAutoIncrementOp> for Operation {
    fn from(op: SetAutoIncrementOp) -> Self {
        Self::SetAutoIncrement(op)
    }
}

/// Drop auto-increment operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropAutoIncrementOp {
    /// Table name.
    pub table: String,
    /// Column name.
    pub column: String,
    /// Base column type, e.g. `bigint`.
    pub column_type: String,
    /// Whether the column is unsigned.
    pub unsigned: bool,
}

impl From<DropAutoIncrementOp> for Operation {
    fn from(op: DropAutoIncrementOp) -> Self {
        Self::DropAutoIncrement(op)
    }
}

/// Create index operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateIndexOp {
    /// Index name.
    pub name: String,
    /// Table name.
    pub table: String,
    /// Columns to index.
    pub columns: Vec<String>,
    /// Whether this is a unique index.
    pub unique: bool,
}

impl From<CreateIndexOp> for Operation {
    fn from(op: CreateIndexOp) -> Self {
        Self::CreateIndex(op)
    }
}

/// Drop index operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropIndexOp {
    /// Index name.
    pub name: String,
    /// Table name.
    pub table: String,
}

impl From<DropIndexOp> for Operation {
    fn from(op: DropIndexOp) -> Self {
        Self::DropIndex(op)
    }
}

/// Add foreign key operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddForeignKeyOp {
    /// Constraint name.
    pub name: String,
    /// Table name.
    pub table: String,
    /// Referencing columns.
    pub columns: Vec<String>,
    /// Referenced table.
    pub referenced_table: String,
    /// Referenced columns.
    pub referenced_columns: Vec<String>,
    /// ON DELETE action.
    pub on_delete: Option<ReferentialAction>,
    /// ON UPDATE action.
    pub on_update: Option<ReferentialAction>,
}

impl From<AddForeignKeyOp> for Operation {
    fn from(op: AddForeignKeyOp) -> Self {
        Self::AddForeignKey(op)
    }
}

/// Drop foreign key operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropForeignKeyOp {
    /// Constraint name.
    pub name: String,
    /// Table name.
    pub table: String,
}

impl From<DropForeignKeyOp> for Operation {
    fn from(op: DropForeignKeyOp) -> Self {
        Self::DropForeignKey(op)
    }
}

/// Batch insert operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchInsertOp {
    /// Table name.
    pub table: String,
    /// Column names, in insert order.
    pub columns: Vec<String>,
    /// Rows of values, each aligned with `columns`.
    pub rows: Vec<Vec<Value>>,
}

impl From<BatchInsertOp> for Operation {
    fn from(op: BatchInsertOp) -> Self {
        Self::BatchInsert(op)
    }
}
