//! Table selection.
//!
//! Decides which tables get scripts and records the partition. Include
//! and filter lists are compared against raw storage names with the
//! prefix applied; recorded names always have the prefix stripped.

use tracing::debug;

/// Prefix-stripped record of every classified table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionResult {
    generated: Vec<String>,
    filtered: Vec<String>,
}

impl SelectionResult {
    /// Creates an empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tables that received scripts, in classification order.
    #[must_use]
    pub fn generated(&self) -> &[String] {
        &self.generated
    }

    /// Tables that were skipped, in classification order.
    #[must_use]
    pub fn filtered(&self) -> &[String] {
        &self.filtered
    }

    fn record(list: &mut Vec<String>, name: &str) {
        if !list.iter().any(|n| n == name) {
            list.push(name.to_string());
        }
    }
}

/// Applies the include/filter decision table to raw table names.
#[derive(Debug, Clone)]
pub struct TableSelector {
    include: Vec<String>,
    filter: Vec<String>,
    history_table: String,
    prefix: String,
}

impl TableSelector {
    /// Creates a selector.
    ///
    /// `include` and `filter` carry bare names; the storage prefix is
    /// applied here, once. `migration_table` names the replay history
    /// table that is never dumped implicitly.
    #[must_use]
    pub fn new(
        prefix: impl Into<String>,
        include: &[String],
        filter: &[String],
        migration_table: &str,
    ) -> Self {
        let prefix = prefix.into();
        Self {
            include: include.iter().map(|t| add_prefix(t, &prefix)).collect(),
            filter: filter.iter().map(|t| add_prefix(t, &prefix)).collect(),
            history_table: add_prefix(migration_table, &prefix),
            prefix,
        }
    }

    /// Classifies one raw table name and records it on `result`.
    ///
    /// Returns whether scripts should be generated for the table. When
    /// both lists are empty every table is taken except the reserved
    /// history table; an explicit include wins it back.
    pub fn classify(&self, raw_name: &str, result: &mut SelectionResult) -> bool {
        let include = match (self.filter.is_empty(), self.include.is_empty()) {
            (true, true) => raw_name != self.history_table,
            (false, true) => !self.contains_filtered(raw_name),
            (true, false) => self.contains_included(raw_name),
            (false, false) => {
                self.contains_included(raw_name) && !self.contains_filtered(raw_name)
            }
        };

        let stripped = strip_prefix(raw_name, &self.prefix);
        if include {
            SelectionResult::record(&mut result.generated, &stripped);
        } else {
            debug!(table = %stripped, "table filtered out");
            SelectionResult::record(&mut result.filtered, &stripped);
        }

        include
    }

    fn contains_included(&self, name: &str) -> bool {
        self.include.iter().any(|t| t == name)
    }

    fn contains_filtered(&self, name: &str) -> bool {
        self.filter.iter().any(|t| t == name)
    }
}

/// Applies the storage prefix to a bare table name.
#[must_use]
pub fn add_prefix(name: &str, prefix: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}{name}", prefix.to_lowercase())
    }
}

/// Strips the storage prefix from a raw table name, when present.
#[must_use]
pub fn strip_prefix(name: &str, prefix: &str) -> String {
    if prefix.is_empty() {
        return name.to_string();
    }
    name.strip_prefix(prefix).unwrap_or(name).to_string()
}
