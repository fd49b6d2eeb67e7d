//! Introspected schema snapshots.
//!
//! Everything the generators consume is captured up front in plain data:
//! tables, columns, raw key rows and foreign keys. The catalog is queried
//! once per table and never touched again.

use crate::script::ReferentialAction;

/// Key name MySQL reserves for the primary key in `SHOW KEYS` output.
pub const PRIMARY_KEY_NAME: &str = "PRIMARY";

/// A column default as reported by the catalog, already typed.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    /// Integer default for integer-family columns.
    Int(i64),
    /// Boolean default for `tinyint(1)` columns.
    Bool(bool),
    /// Literal string default.
    Str(String),
    /// Server-evaluated expression such as `CURRENT_TIMESTAMP`.
    Expression(String),
}

/// One column of an introspected table.
///
/// `native_type` keeps the full catalog spelling (`bigint(20) unsigned`,
/// `enum('a','b')`), while the derived fields break it apart so the
/// generators never re-parse it.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDescriptor {
    /// Column name.
    pub name: String,
    /// Full native type as reported by `COLUMN_TYPE`.
    pub native_type: String,
    /// Base type name without arguments, e.g. `bigint`.
    pub type_name: String,
    /// Display width, length or precision from the native type.
    pub size: Option<u32>,
    /// Decimal scale, when the native type carries one.
    pub scale: Option<u32>,
    /// Whether the column accepts NULL.
    pub nullable: bool,
    /// Whether the native type carries the `unsigned` attribute.
    pub unsigned: bool,
    /// Typed default value, absent when the column has none.
    pub default: Option<DefaultValue>,
    /// Member values for `enum` columns, in declaration order.
    pub enum_values: Option<Vec<String>>,
    /// Column comment, absent when empty.
    pub comment: Option<String>,
    /// Whether the column is part of the primary key.
    pub primary_key: bool,
    /// Whether the column is auto-incremented.
    pub auto_increment: bool,
}

impl ColumnDescriptor {
    /// Creates a nullable column, deriving the broken-apart type fields
    /// from the native type spelling.
    #[must_use]
    pub fn new(name: impl Into<String>, native_type: impl Into<String>) -> Self {
        let native_type = native_type.into();
        let parsed = NativeType::parse(&native_type);

        Self {
            name: name.into(),
            native_type,
            type_name: parsed.base,
            size: parsed.size,
            scale: parsed.scale,
            nullable: true,
            unsigned: parsed.unsigned,
            default: None,
            enum_values: parsed.enum_values,
            comment: None,
            primary_key: false,
            auto_increment: false,
        }
    }

    /// Marks the column NOT NULL.
    #[must_use]
    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Marks the column as part of the primary key.
    #[must_use]
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// Marks the column auto-incremented.
    #[must_use]
    pub fn auto_increment(mut self) -> Self {
        self.auto_increment = true;
        self
    }

    /// Sets the typed default value.
    #[must_use]
    pub fn default_value(mut self, value: DefaultValue) -> Self {
        self.default = Some(value);
        self
    }

    /// Sets the column comment.
    #[must_use]
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// Broken-apart native type spelling.
struct NativeType {
    base: String,
    size: Option<u32>,
    scale: Option<u32>,
    unsigned: bool,
    enum_values: Option<Vec<String>>,
}

impl NativeType {
    fn parse(native: &str) -> Self {
        let trimmed = native.trim();
        let base_end = trimmed
            .find(|c| c == '(' || c == ' ')
            .unwrap_or(trimmed.len());
        let base = trimmed[..base_end].to_ascii_lowercase();
        let unsigned = trimmed[base_end..].contains("unsigned");

        let args = trimmed.find('(').and_then(|open| {
            trimmed
                .rfind(')')
                .filter(|&close| close > open)
                .map(|close| &trimmed[open + 1..close])
        });

        let mut size = None;
        let mut scale = None;
        let mut enum_values = None;

        if let Some(args) = args {
            if base == "enum" || base == "set" {
                enum_values = Some(parse_quoted_values(args));
            } else {
                let mut parts = args.split(',');
                size = parts.next().and_then(|p| p.trim().parse().ok());
                scale = parts.next().and_then(|p| p.trim().parse().ok());
            }
        }

        Self {
            base,
            size,
            scale,
            unsigned,
            enum_values,
        }
    }
}

/// Parses a `'a','b','it''s'` member list, undoing the doubled-quote escape.
fn parse_quoted_values(args: &str) -> Vec<String> {
    let mut values = Vec::new();
    let mut chars = args.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\'' {
            continue;
        }
        let mut value = String::new();
        while let Some(c) = chars.next() {
            if c == '\'' {
                if chars.peek() == Some(&'\'') {
                    chars.next();
                    value.push('\'');
                } else {
                    break;
                }
            } else {
                value.push(c);
            }
        }
        values.push(value);
    }

    values
}

/// One row of `SHOW KEYS` output, reduced to the fields the extractor uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawKeyRow {
    /// Key name; `PRIMARY` for the primary key.
    pub key_name: String,
    /// Column the row describes.
    pub column_name: String,
    /// MySQL reports `0` for unique keys, hence the inverted name.
    pub non_unique: bool,
}

impl RawKeyRow {
    /// Creates a raw key row.
    #[must_use]
    pub fn new(
        key_name: impl Into<String>,
        column_name: impl Into<String>,
        non_unique: bool,
    ) -> Self {
        Self {
            key_name: key_name.into(),
            column_name: column_name.into(),
            non_unique,
        }
    }
}

/// A named key with its member columns, grouped from raw rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyGroup {
    /// Key name as stored, prefix included.
    pub name: String,
    /// Member columns in key order.
    pub columns: Vec<String>,
    /// Whether the key enforces uniqueness.
    pub unique: bool,
}

impl KeyGroup {
    /// Whether this group is the table's primary key.
    #[must_use]
    pub fn is_primary(&self) -> bool {
        self.name == PRIMARY_KEY_NAME
    }
}

/// A foreign key constraint on an introspected table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKeyDescriptor {
    /// Constraint name as stored, prefix included.
    pub name: String,
    /// Referencing columns, in constraint order.
    pub columns: Vec<String>,
    /// Referenced table name.
    pub referenced_table: String,
    /// Referenced columns, aligned with `columns`.
    pub referenced_columns: Vec<String>,
    /// ON DELETE behavior, when the DDL declares one.
    pub on_delete: Option<ReferentialAction>,
    /// ON UPDATE behavior, when the DDL declares one.
    pub on_update: Option<ReferentialAction>,
}

/// Everything known about one table after introspection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableDescriptor {
    /// Table name as stored, prefix included.
    pub name: String,
    /// Columns in ordinal order.
    pub columns: Vec<ColumnDescriptor>,
    /// Raw `SHOW KEYS` rows in reported order.
    pub key_rows: Vec<RawKeyRow>,
    /// Foreign keys in constraint order.
    pub foreign_keys: Vec<ForeignKeyDescriptor>,
    /// Raw `SHOW CREATE TABLE` DDL, fetched once per table.
    pub create_ddl: String,
    /// Table comment, absent when empty.
    pub comment: Option<String>,
}

impl TableDescriptor {
    /// Creates an empty descriptor for the named table.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Appends a column.
    #[must_use]
    pub fn with_column(mut self, column: ColumnDescriptor) -> Self {
        self.columns.push(column);
        self
    }

    /// Appends a raw key row.
    #[must_use]
    pub fn with_key_row(mut self, row: RawKeyRow) -> Self {
        self.key_rows.push(row);
        self
    }

    /// Appends a foreign key.
    #[must_use]
    pub fn with_foreign_key(mut self, fk: ForeignKeyDescriptor) -> Self {
        self.foreign_keys.push(fk);
        self
    }

    /// Sets the raw DDL.
    #[must_use]
    pub fn with_create_ddl(mut self, ddl: impl Into<String>) -> Self {
        self.create_ddl = ddl.into();
        self
    }

    /// Sets the table comment.
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Looks a column up by name.
    #[must_use]
    pub fn find_column(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.name == name)
    }
}
