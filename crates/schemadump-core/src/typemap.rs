//! Native-to-builder column type mapping.
//!
//! Turns an introspected column into the builder expression a structure
//! script compiles against. Enum columns take a detour: the mapper first
//! spells them as an `enumeration(...)` chain, then rewrites the whole
//! chain into a raw `custom(...)` definition, folding the modifiers into
//! the SQL. The intermediate spelling never reaches an artifact, so the
//! script DSL keeps no enum type.

use crate::descriptor::{ColumnDescriptor, DefaultValue};

/// Substitution table applied to enum column chains, tried in order at
/// each position of a single left-to-right pass.
const ENUM_REWRITES: [(&str, &str); 10] = [
    ("enumeration(", "custom("),
    ("\", &[\"", "\", \"ENUM ('"),
    ("\", \"", "', '"),
    ("\"])", "')"),
    (".not_null()", " NOT NULL"),
    (".null()", " DEFAULT NULL"),
    (".default_str(\"", " DEFAULT '"),
    (".comment(\"", " COMMENT '"),
    (".build()", "\").build()"),
    ("\")", "'"),
];

/// Renders the full builder expression for a column, `.build()` included.
#[must_use]
pub fn render_column(column: &ColumnDescriptor) -> String {
    let expr = format!(
        "{}{}.build()",
        map_column_type(column),
        map_column_modifiers(column)
    );
    if column.enum_values.is_some() {
        rewrite_enum_column(&expr)
    } else {
        expr
    }
}

/// Maps the native type to a builder shorthand call.
///
/// `tinyint(1)` becomes a boolean; every display width on integer and
/// fractional-second types is preserved through `.width(..)`.
#[must_use]
pub fn map_column_type(column: &ColumnDescriptor) -> String {
    let name = escape_str(&column.name);

    if column.native_type == "tinyint(1)" {
        return format!("boolean(\"{name}\")");
    }

    if let Some(values) = &column.enum_values {
        let members = values
            .iter()
            .map(|v| format!("\"{}\"", escape_str(&escape_sql(v))))
            .collect::<Vec<_>>()
            .join(", ");
        return format!("enumeration(\"{name}\", &[{members}])");
    }

    match column.type_name.as_str() {
        "tinyint" => with_width("tinyint", &name, column.size),
        "smallint" => with_width("smallint", &name, column.size),
        "int" | "integer" | "mediumint" => with_width("integer", &name, column.size),
        "bigint" => with_width("bigint", &name, column.size),
        "decimal" | "numeric" => format!(
            "decimal(\"{name}\", {}, {})",
            column.size.unwrap_or(10),
            column.scale.unwrap_or(0)
        ),
        "float" => format!("real(\"{name}\")"),
        "double" => format!("double(\"{name}\")"),
        "varchar" => format!("varchar(\"{name}\", {})", column.size.unwrap_or(255)),
        "char" => format!("char(\"{name}\", {})", column.size.unwrap_or(1)),
        "text" | "tinytext" | "mediumtext" | "longtext" => format!("text(\"{name}\")"),
        "binary" => format!("binary(\"{name}\", {})", column.size.unwrap_or(1)),
        "varbinary" => format!("varbinary(\"{name}\", {})", column.size.unwrap_or(255)),
        "blob" | "tinyblob" | "mediumblob" | "longblob" => format!("blob(\"{name}\")"),
        "date" => format!("date(\"{name}\")"),
        "time" => with_width("time", &name, column.size),
        "datetime" => with_width("datetime", &name, column.size),
        "timestamp" => with_width("timestamp", &name, column.size),
        "json" => format!("json(\"{name}\")"),
        _ => format!(
            "custom(\"{name}\", \"{}\")",
            escape_str(&column.native_type)
        ),
    }
}

fn with_width(shorthand: &str, name: &str, size: Option<u32>) -> String {
    size.map_or_else(
        || format!("{shorthand}(\"{name}\")"),
        |width| format!("{shorthand}(\"{name}\").width({width})"),
    )
}

/// Renders the modifier chain in the fixed order: signedness, then
/// nullability, then default, then comment.
///
/// A column that is both auto-incremented and part of the primary key
/// skips the nullability modifier; auto-increment redefinition carries
/// NOT NULL itself and a second spelling would conflict.
#[must_use]
pub fn map_column_modifiers(column: &ColumnDescriptor) -> String {
    let mut chain = String::new();

    if column.unsigned {
        chain.push_str(".unsigned()");
    }

    if !(column.auto_increment && column.primary_key) {
        chain.push_str(if column.nullable {
            ".null()"
        } else {
            ".not_null()"
        });
    }

    match &column.default {
        Some(DefaultValue::Expression(expr)) => {
            chain.push_str(&format!(".default_expr(\"{}\")", escape_str(expr)));
        }
        Some(DefaultValue::Int(value)) => {
            chain.push_str(&format!(".default_int({value})"));
        }
        Some(DefaultValue::Bool(value)) => {
            chain.push_str(&format!(".default_bool({value})"));
        }
        Some(DefaultValue::Str(value)) => {
            chain.push_str(&format!(".default_str(\"{}\")", escape_str(value)));
        }
        None => {}
    }

    if let Some(comment) = column.comment.as_deref().filter(|c| !c.is_empty()) {
        chain.push_str(&format!(".comment(\"{}\")", escape_str(comment)));
    }

    chain
}

/// Rewrites an `enumeration(...)` builder chain into a raw `custom(...)`
/// column carrying the ENUM SQL, folding the modifiers into the string.
///
/// The input is scanned once left to right; at each position the table
/// entries are tried in order and replacement output is never re-scanned.
#[must_use]
pub fn rewrite_enum_column(expr: &str) -> String {
    let mut out = String::with_capacity(expr.len() + 16);
    let mut rest = expr;

    'scan: while !rest.is_empty() {
        for (from, to) in &ENUM_REWRITES {
            if let Some(tail) = rest.strip_prefix(from) {
                out.push_str(to);
                rest = tail;
                continue 'scan;
            }
        }
        let mut chars = rest.chars();
        if let Some(c) = chars.next() {
            out.push(c);
        }
        rest = chars.as_str();
    }

    out
}

/// Escapes a value for embedding in a double-quoted Rust string literal.
pub(crate) fn escape_str(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
}

/// Escapes a value for embedding in a single-quoted SQL string literal.
pub(crate) fn escape_sql(s: &str) -> String {
    s.replace('\'', "''")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::ColumnDescriptor;

    #[test]
    fn test_tinyint_one_is_boolean() {
        let col = ColumnDescriptor::new("active", "tinyint(1)");
        assert_eq!(map_column_type(&col), "boolean(\"active\")");
    }

    #[test]
    fn test_wider_tinyint_keeps_its_width() {
        let col = ColumnDescriptor::new("level", "tinyint(4)");
        assert_eq!(map_column_type(&col), "tinyint(\"level\").width(4)");
    }

    #[test]
    fn test_integer_family() {
        assert_eq!(
            map_column_type(&ColumnDescriptor::new("a", "smallint(6)")),
            "smallint(\"a\").width(6)"
        );
        assert_eq!(
            map_column_type(&ColumnDescriptor::new("b", "int(11)")),
            "integer(\"b\").width(11)"
        );
        assert_eq!(
            map_column_type(&ColumnDescriptor::new("c", "mediumint(9)")),
            "integer(\"c\").width(9)"
        );
        assert_eq!(
            map_column_type(&ColumnDescriptor::new("d", "bigint(20)")),
            "bigint(\"d\").width(20)"
        );
    }

    #[test]
    fn test_sized_string_types() {
        assert_eq!(
            map_column_type(&ColumnDescriptor::new("name", "varchar(255)")),
            "varchar(\"name\", 255)"
        );
        assert_eq!(
            map_column_type(&ColumnDescriptor::new("code", "char(2)")),
            "char(\"code\", 2)"
        );
    }

    #[test]
    fn test_decimal_keeps_precision_and_scale() {
        let col = ColumnDescriptor::new("price", "decimal(10,2)");
        assert_eq!(map_column_type(&col), "decimal(\"price\", 10, 2)");
    }

    #[test]
    fn test_text_and_blob_families_collapse() {
        assert_eq!(
            map_column_type(&ColumnDescriptor::new("body", "longtext")),
            "text(\"body\")"
        );
        assert_eq!(
            map_column_type(&ColumnDescriptor::new("raw", "mediumblob")),
            "blob(\"raw\")"
        );
    }

    #[test]
    fn test_unknown_type_falls_back_to_custom() {
        let col = ColumnDescriptor::new("location", "point");
        assert_eq!(
            map_column_type(&col),
            "custom(\"location\", \"point\")"
        );
    }

    #[test]
    fn test_modifier_order() {
        let col = ColumnDescriptor::new("age", "int(10) unsigned")
            .not_null()
            .default_value(DefaultValue::Int(0))
            .comment("user age");

        assert_eq!(
            map_column_modifiers(&col),
            ".unsigned().not_null().default_int(0).comment(\"user age\")"
        );
    }

    #[test]
    fn test_nullable_column_gets_explicit_null() {
        let col = ColumnDescriptor::new("bio", "text");
        assert_eq!(map_column_modifiers(&col), ".null()");
    }

    #[test]
    fn test_auto_increment_primary_key_skips_nullability() {
        let col = ColumnDescriptor::new("id", "bigint(20) unsigned")
            .not_null()
            .primary_key()
            .auto_increment();

        assert_eq!(map_column_modifiers(&col), ".unsigned()");
    }

    #[test]
    fn test_auto_increment_alone_keeps_nullability() {
        let col = ColumnDescriptor::new("seq", "int(11)").not_null().auto_increment();
        assert_eq!(map_column_modifiers(&col), ".not_null()");
    }

    #[test]
    fn test_expression_default() {
        let col = ColumnDescriptor::new("created_at", "timestamp")
            .not_null()
            .default_value(DefaultValue::Expression("CURRENT_TIMESTAMP".to_string()));

        assert_eq!(
            map_column_modifiers(&col),
            ".not_null().default_expr(\"CURRENT_TIMESTAMP\")"
        );
    }

    #[test]
    fn test_boolean_default() {
        let col = ColumnDescriptor::new("active", "tinyint(1)")
            .not_null()
            .default_value(DefaultValue::Bool(true));

        assert_eq!(render_column(&col), "boolean(\"active\").not_null().default_bool(true).build()");
    }

    #[test]
    fn test_enum_rewrite_plain() {
        let col = ColumnDescriptor::new("status", "enum('active','locked')").not_null();
        assert_eq!(
            render_column(&col),
            "custom(\"status\", \"ENUM ('active', 'locked') NOT NULL\").build()"
        );
    }

    #[test]
    fn test_enum_rewrite_full_chain() {
        let col = ColumnDescriptor::new("status", "enum('active','locked')")
            .not_null()
            .default_value(DefaultValue::Str("active".to_string()))
            .comment("account state");

        assert_eq!(
            render_column(&col),
            "custom(\"status\", \"ENUM ('active', 'locked') NOT NULL DEFAULT 'active' COMMENT 'account state'\").build()"
        );
    }

    #[test]
    fn test_enum_rewrite_nullable() {
        let col = ColumnDescriptor::new("mood", "enum('up','down')");
        assert_eq!(
            render_column(&col),
            "custom(\"mood\", \"ENUM ('up', 'down') DEFAULT NULL\").build()"
        );
    }

    #[test]
    fn test_enum_value_quotes_survive_both_escapes() {
        let col = ColumnDescriptor::new("kind", "enum('it''s','plain')").not_null();
        assert_eq!(
            render_column(&col),
            "custom(\"kind\", \"ENUM ('it''s', 'plain') NOT NULL\").build()"
        );
    }

    #[test]
    fn test_non_enum_chain_passes_through_rewrite_untouched() {
        let expr = "varchar(\"name\", 255).not_null().build()";
        // The trailing table entries would also hit a plain chain, so the
        // rewrite must only ever see enum chains.
        let col = ColumnDescriptor::new("name", "varchar(255)").not_null();
        assert_eq!(render_column(&col), expr);
    }

    #[test]
    fn test_escape_helpers() {
        assert_eq!(escape_str("a\"b\\c"), "a\\\"b\\\\c");
        assert_eq!(escape_str("line\nbreak"), "line\\nbreak");
        assert_eq!(escape_sql("it's"), "it''s");
    }
}
