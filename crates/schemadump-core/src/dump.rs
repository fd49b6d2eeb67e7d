//! Data dump planning and serialization.
//!
//! The planner side is pure: a parsed limit spec yields a page plan, and
//! fetched rows are serialized into batch-insert operations. Actually
//! reading rows is the caller's concern.

use crate::descriptor::ColumnDescriptor;
use crate::script::Value;
use crate::typemap::escape_str;

/// Row count above which a dump is split into one insert per page.
pub const BATCH_THRESHOLD: u64 = 500;

/// Error for a malformed limit specification.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid limit specification `{0}`")]
pub struct LimitParseError(pub String);

/// Parsed limit specification for a table's data dump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitSpec {
    /// Dump every row.
    All,
    /// Dump `count` rows starting at `offset`; an absent count is
    /// unbounded.
    Range {
        /// First row to dump, zero-based.
        offset: u64,
        /// Number of rows to dump.
        count: Option<u64>,
    },
}

impl LimitSpec {
    /// Parses a limit specification.
    ///
    /// Accepted forms: empty or boolean text for every row, `offset,count`,
    /// `offset,` for everything past an offset, and a bare `count`.
    ///
    /// # Errors
    ///
    /// Returns [`LimitParseError`] when a field is not a number.
    pub fn parse(spec: &str) -> Result<Self, LimitParseError> {
        let spec = spec.trim();
        if spec.is_empty() || spec == "true" || spec == "false" {
            return Ok(Self::All);
        }

        let err = || LimitParseError(spec.to_string());

        if let Some((offset, count)) = spec.split_once(',') {
            let offset = offset.trim().parse().map_err(|_| err())?;
            let count = count.trim();
            let count = if count.is_empty() {
                None
            } else {
                Some(count.parse().map_err(|_| err())?)
            };
            return Ok(Self::Range { offset, count });
        }

        Ok(Self::Range {
            offset: 0,
            count: Some(spec.parse().map_err(|_| err())?),
        })
    }

    /// Pages of at most [`BATCH_THRESHOLD`] rows covering the request.
    ///
    /// All and unbounded requests yield an endless plan; callers stop at
    /// the first short fetch.
    #[must_use]
    pub fn pages(self) -> Pages {
        match self {
            Self::All => Pages {
                offset: 0,
                remaining: None,
            },
            Self::Range { offset, count } => Pages {
                offset,
                remaining: count,
            },
        }
    }
}

/// Iterator over `(offset, count)` fetch pages.
#[derive(Debug, Clone, Copy)]
pub struct Pages {
    offset: u64,
    remaining: Option<u64>,
}

impl Iterator for Pages {
    type Item = (u64, u64);

    fn next(&mut self) -> Option<Self::Item> {
        let size = match self.remaining {
            Some(0) => return None,
            Some(remaining) => remaining.min(BATCH_THRESHOLD),
            None => BATCH_THRESHOLD,
        };

        let page = (self.offset, size);
        self.offset += size;
        if let Some(remaining) = &mut self.remaining {
            *remaining -= size;
        }

        Some(page)
    }
}

/// Serializes one raw cell according to its column's native type.
///
/// Columns whose native type name contains `int` become integer literals,
/// everything else stays a string with Windows line endings normalized.
#[must_use]
pub fn serialize_value(column: &ColumnDescriptor, raw: Option<&str>) -> Value {
    match raw {
        None => Value::Null,
        Some(v) if column.native_type.contains("int") => {
            Value::Int(v.trim().parse().unwrap_or(0))
        }
        Some(v) => Value::Str(v.replace("\r\n", "\n")),
    }
}

/// Renders one batch-insert operation expression as script body lines.
#[must_use]
pub fn render_batch_insert(table: &str, columns: &[String], rows: &[Vec<Value>]) -> String {
    let column_list = columns
        .iter()
        .map(|c| format!("\"{}\"", escape_str(c)))
        .collect::<Vec<_>>()
        .join(", ");

    let mut out = String::new();
    out.push_str("            Operation::batch_insert(\n");
    out.push_str(&format!("                \"{}\",\n", escape_str(table)));
    out.push_str(&format!("                &[{column_list}],\n"));
    out.push_str("                vec![\n");
    for row in rows {
        let cells = row.iter().map(render_value).collect::<Vec<_>>().join(", ");
        out.push_str(&format!("                    vec![{cells}],\n"));
    }
    out.push_str("                ],\n");
    out.push_str("            ),\n");
    out
}

fn render_value(value: &Value) -> String {
    match value {
        Value::Null => "Value::Null".to_string(),
        Value::Int(i) => format!("Value::Int({i})"),
        Value::Str(s) => format!("Value::Str(\"{}\".into())", escape_str(s)),
    }
}
