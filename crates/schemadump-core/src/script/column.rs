//! Column definitions and the fluent column builder.
//!
//! Generated structure scripts describe every column through these types.
//! Keys, uniqueness and auto-increment are deliberately absent: they are
//! carried by the key scripts, never by column definitions.

/// SQL data types a generated column can have.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataType {
    /// 8-bit integer.
    Tinyint,
    /// 16-bit integer.
    Smallint,
    /// 32-bit integer.
    Integer,
    /// 64-bit integer.
    Bigint,
    /// Fixed-point number with precision and scale.
    Decimal {
        /// Total number of digits.
        precision: u32,
        /// Digits after the decimal point.
        scale: u32,
    },
    /// Single-precision float.
    Real,
    /// Double-precision float.
    Double,
    /// Variable-length string with a maximum length.
    Varchar(u32),
    /// Fixed-length string.
    Char(u32),
    /// Unbounded text.
    Text,
    /// Fixed-length byte string.
    Binary(u32),
    /// Variable-length byte string.
    Varbinary(u32),
    /// Unbounded byte blob.
    Blob,
    /// Calendar date.
    Date,
    /// Time of day.
    Time,
    /// Date and time without timezone.
    Datetime,
    /// Timestamp.
    Timestamp,
    /// Boolean.
    Boolean,
    /// JSON document.
    Json,
    /// Raw column definition, rendered verbatim.
    Custom(String),
}

/// Default value of a column.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    /// Integer literal.
    Integer(i64),
    /// Boolean literal.
    Boolean(bool),
    /// String literal.
    String(String),
    /// Raw SQL expression such as `CURRENT_TIMESTAMP`.
    Expression(String),
}

/// A complete column definition.
///
/// `nullable` is tri-state: `None` means the definition says nothing about
/// nullability and the target's default applies.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDefinition {
    /// Column name.
    pub name: String,
    /// Data type.
    pub data_type: DataType,
    /// Integer display width, when the type carries one.
    pub width: Option<u32>,
    /// Whether the column is unsigned.
    pub unsigned: bool,
    /// Explicit nullability, absent when unspecified.
    pub nullable: Option<bool>,
    /// Default value.
    pub default: Option<DefaultValue>,
    /// Column comment.
    pub comment: Option<String>,
}

/// Fluent builder for column definitions.
///
/// # Example
///
/// ```rust
/// use schemadump_core::script::{bigint, varchar};
///
/// let id = bigint("id").unsigned().build();
/// let name = varchar("name", 255).not_null().default_str("").build();
///
/// assert_eq!(id.name, "id");
/// assert_eq!(name.nullable, Some(false));
/// ```
#[derive(Debug, Clone)]
pub struct ColumnBuilder {
    name: String,
    data_type: DataType,
    width: Option<u32>,
    unsigned: bool,
    nullable: Option<bool>,
    default: Option<DefaultValue>,
    comment: Option<String>,
}

impl ColumnBuilder {
    /// Creates a new column builder.
    #[must_use]
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            width: None,
            unsigned: false,
            nullable: None,
            default: None,
            comment: None,
        }
    }

    /// Sets the integer display width.
    #[must_use]
    pub fn width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    /// Marks the column unsigned.
    #[must_use]
    pub fn unsigned(mut self) -> Self {
        self.unsigned = true;
        self
    }

    /// Explicitly allows NULL.
    #[must_use]
    pub fn null(mut self) -> Self {
        self.nullable = Some(true);
        self
    }

    /// Adds a NOT NULL constraint.
    #[must_use]
    pub fn not_null(mut self) -> Self {
        self.nullable = Some(false);
        self
    }

    /// Sets an integer default value.
    #[must_use]
    pub fn default_int(mut self, value: i64) -> Self {
        self.default = Some(DefaultValue::Integer(value));
        self
    }

    /// Sets a boolean default value.
    #[must_use]
    pub fn default_bool(mut self, value: bool) -> Self {
        self.default = Some(DefaultValue::Boolean(value));
        self
    }

    /// Sets a string default value.
    #[must_use]
    pub fn default_str(mut self, value: impl Into<String>) -> Self {
        self.default = Some(DefaultValue::String(value.into()));
        self
    }

    /// Sets a raw SQL expression as the default value.
    #[must_use]
    pub fn default_expr(mut self, expr: impl Into<String>) -> Self {
        self.default = Some(DefaultValue::Expression(expr.into()));
        self
    }

    /// Sets the column comment.
    #[must_use]
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Builds the `ColumnDefinition`.
    #[must_use]
    pub fn build(self) -> ColumnDefinition {
        ColumnDefinition {
            name: self.name,
            data_type: self.data_type,
            width: self.width,
            unsigned: self.unsigned,
            nullable: self.nullable,
            default: self.default,
            comment: self.comment,
        }
    }
}

// =============================================================================
// Column shorthands
// =============================================================================

/// Creates a TINYINT column builder.
#[must_use]
pub fn tinyint(name: impl Into<String>) -> ColumnBuilder {
    ColumnBuilder::new(name, DataType::Tinyint)
}

/// Creates a SMALLINT column builder.
#[must_use]
pub fn smallint(name: impl Into<String>) -> ColumnBuilder {
    ColumnBuilder::new(name, DataType::Smallint)
}

/// Creates an INTEGER column builder.
#[must_use]
pub fn integer(name: impl Into<String>) -> ColumnBuilder {
    ColumnBuilder::new(name, DataType::Integer)
}

/// Creates a BIGINT column builder.
#[must_use]
pub fn bigint(name: impl Into<String>) -> ColumnBuilder {
    ColumnBuilder::new(name, DataType::Bigint)
}

/// Creates a DECIMAL column builder with precision and scale.
#[must_use]
pub fn decimal(name: impl Into<String>, precision: u32, scale: u32) -> ColumnBuilder {
    ColumnBuilder::new(name, DataType::Decimal { precision, scale })
}

/// Creates a REAL (single-precision float) column builder.
#[must_use]
pub fn real(name: impl Into<String>) -> ColumnBuilder {
    ColumnBuilder::new(name, DataType::Real)
}

/// Creates a DOUBLE column builder.
#[must_use]
pub fn double(name: impl Into<String>) -> ColumnBuilder {
    ColumnBuilder::new(name, DataType::Double)
}

/// Creates a VARCHAR column builder with a maximum length.
#[must_use]
pub fn varchar(name: impl Into<String>, length: u32) -> ColumnBuilder {
    ColumnBuilder::new(name, DataType::Varchar(length))
}

/// Creates a CHAR column builder with a fixed length.
#[must_use]
pub fn char(name: impl Into<String>, length: u32) -> ColumnBuilder {
    ColumnBuilder::new(name, DataType::Char(length))
}

/// Creates a TEXT column builder.
#[must_use]
pub fn text(name: impl Into<String>) -> ColumnBuilder {
    ColumnBuilder::new(name, DataType::Text)
}

/// Creates a BINARY column builder with a fixed length.
#[must_use]
pub fn binary(name: impl Into<String>, length: u32) -> ColumnBuilder {
    ColumnBuilder::new(name, DataType::Binary(length))
}

/// Creates a VARBINARY column builder with a maximum length.
#[must_use]
pub fn varbinary(name: impl Into<String>, length: u32) -> ColumnBuilder {
    ColumnBuilder::new(name, DataType::Varbinary(length))
}

/// Creates a BLOB column builder.
#[must_use]
pub fn blob(name: impl Into<String>) -> ColumnBuilder {
    ColumnBuilder::new(name, DataType::Blob)
}

/// Creates a DATE column builder.
#[must_use]
pub fn date(name: impl Into<String>) -> ColumnBuilder {
    ColumnBuilder::new(name, DataType::Date)
}

/// Creates a TIME column builder.
#[must_use]
pub fn time(name: impl Into<String>) -> ColumnBuilder {
    ColumnBuilder::new(name, DataType::Time)
}

/// Creates a DATETIME column builder.
#[must_use]
pub fn datetime(name: impl Into<String>) -> ColumnBuilder {
    ColumnBuilder::new(name, DataType::Datetime)
}

/// Creates a TIMESTAMP column builder.
#[must_use]
pub fn timestamp(name: impl Into<String>) -> ColumnBuilder {
    ColumnBuilder::new(name, DataType::Timestamp)
}

/// Creates a BOOLEAN column builder.
#[must_use]
pub fn boolean(name: impl Into<String>) -> ColumnBuilder {
    ColumnBuilder::new(name, DataType::Boolean)
}

/// Creates a JSON column builder.
#[must_use]
pub fn json(name: impl Into<String>) -> ColumnBuilder {
    ColumnBuilder::new(name, DataType::Json)
}

/// Creates a column builder with a raw type definition, rendered verbatim.
#[must_use]
pub fn custom(name: impl Into<String>, definition: impl Into<String>) -> ColumnBuilder {
    ColumnBuilder::new(name, DataType::Custom(definition.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_column() {
        let col = bigint("id").build();
        assert_eq!(col.name, "id");
        assert_eq!(col.data_type, DataType::Bigint);
        assert_eq!(col.nullable, None);
        assert!(!col.unsigned);
    }

    #[test]
    fn test_nullability_is_tri_state() {
        assert_eq!(integer("a").build().nullable, None);
        assert_eq!(integer("a").null().build().nullable, Some(true));
        assert_eq!(integer("a").not_null().build().nullable, Some(false));
    }

    #[test]
    fn test_full_chain() {
        let col = integer("age")
            .width(11)
            .unsigned()
            .not_null()
            .default_int(0)
            .comment("user age")
            .build();

        assert_eq!(col.width, Some(11));
        assert!(col.unsigned);
        assert_eq!(col.nullable, Some(false));
        assert_eq!(col.default, Some(DefaultValue::Integer(0)));
        assert_eq!(col.comment.as_deref(), Some("user age"));
    }

    #[test]
    fn test_default_values() {
        let i = integer("n").default_int(42).build();
        assert_eq!(i.default, Some(DefaultValue::Integer(42)));

        let b = boolean("flag").default_bool(true).build();
        assert_eq!(b.default, Some(DefaultValue::Boolean(true)));

        let s = varchar("name", 64).default_str("guest").build();
        assert_eq!(s.default, Some(DefaultValue::String("guest".to_string())));

        let e = timestamp("created_at")
            .default_expr("CURRENT_TIMESTAMP")
            .build();
        assert_eq!(
            e.default,
            Some(DefaultValue::Expression("CURRENT_TIMESTAMP".to_string()))
        );
    }

    #[test]
    fn test_sized_types() {
        let d = decimal("price", 10, 2).build();
        assert_eq!(
            d.data_type,
            DataType::Decimal {
                precision: 10,
                scale: 2
            }
        );

        let v = varchar("email", 255).build();
        assert_eq!(v.data_type, DataType::Varchar(255));
    }

    #[test]
    fn test_custom_type() {
        let col = custom("status", "ENUM ('active', 'locked') NOT NULL").build();
        assert_eq!(
            col.data_type,
            DataType::Custom("ENUM ('active', 'locked') NOT NULL".to_string())
        );
    }
}
