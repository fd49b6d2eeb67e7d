//! Run orchestration.
//!
//! Drives one dump end to end: classify tables, introspect the survivors,
//! generate the aspect scripts in replay order, then write or print them.

use std::path::PathBuf;
use std::time::Instant;

use sqlx::mysql::MySqlPool;
use tracing::info;

use schemadump_core::assemble::{Aspect, ChangeUnit};
use schemadump_core::descriptor::TableDescriptor;
use schemadump_core::dump::{render_batch_insert, LimitSpec};
use schemadump_core::generate::{
    data_scripts, foreign_key_scripts, key_scripts, structure_scripts, ScriptPair,
};
use schemadump_core::select::{add_prefix, strip_prefix, SelectionResult, TableSelector};

use crate::emit::{EmitOutcome, Emitter, RunSummary};
use crate::error::Result;
use crate::introspect::Introspector;

/// What to do with the generated scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Write one artifact per non-empty change unit.
    Generate,
    /// Print forward scripts to stdout instead of writing files.
    PrintForward,
    /// Print backward scripts to stdout instead of writing files.
    PrintBackward,
}

/// Everything one run needs besides the connection.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Output directory for generated artifacts.
    pub out_dir: PathBuf,
    /// Bare table names to include; empty means every table.
    pub include: Vec<String>,
    /// Bare table names to exclude.
    pub filter: Vec<String>,
    /// Bare names of the tables whose rows get dumped; empty means every
    /// selected table.
    pub data: Vec<String>,
    /// Row window applied to data dumps.
    pub limit: LimitSpec,
    /// Restricts the run to one aspect; `None` runs all four.
    pub aspect: Option<Aspect>,
    /// Replay-history table name, reserved unless explicitly included.
    pub migration_table: String,
    /// Storage prefix shared by the application's tables.
    pub table_prefix: String,
    /// Options clause appended to generated create-table chains.
    pub table_options: String,
    /// Replaces the timestamp pair in artifact names.
    pub file_prefix: Option<String>,
}

/// Runs one dump over every table the selector admits.
pub async fn run(pool: MySqlPool, options: &RunOptions, mode: Mode) -> Result<RunSummary> {
    let started = Instant::now();
    let file_prefix = options.file_prefix.clone().unwrap_or_else(run_prefix);

    let introspector = Introspector::new(pool);
    let selector = TableSelector::new(
        options.table_prefix.as_str(),
        &options.include,
        &options.filter,
        &options.migration_table,
    );
    let emitter = Emitter::new(&options.out_dir);
    let data_tables: Vec<String> = options
        .data
        .iter()
        .map(|t| add_prefix(t, &options.table_prefix))
        .collect();

    let mut selection = SelectionResult::new();
    let mut written = Vec::new();
    let mut skipped = 0;

    for status in introspector.table_status().await? {
        if !selector.classify(&status.name, &mut selection) {
            continue;
        }

        info!(table = %status.name, "Dumping table");
        let table = introspector.describe(&status).await?;
        let stripped = strip_prefix(&status.name, &options.table_prefix);

        for aspect in Aspect::ALL {
            if options.aspect.is_some_and(|only| only != aspect) {
                continue;
            }

            let pair = match aspect {
                Aspect::Structure => {
                    structure_scripts(&table, &options.table_prefix, &options.table_options)
                }
                Aspect::Data => {
                    match effective_limit(&data_tables, &status.name, options.limit) {
                        Some(limit) => {
                            let batches =
                                fetch_batches(&introspector, &table, &stripped, limit).await?;
                            data_scripts(&batches)
                        }
                        None => ScriptPair::default(),
                    }
                }
                Aspect::Key => key_scripts(&table, &options.table_prefix),
                Aspect::ForeignKey => foreign_key_scripts(&table, &options.table_prefix),
            };

            let unit = ChangeUnit::new(stripped.clone(), aspect, pair, &file_prefix);
            match mode {
                Mode::Generate => match emitter.emit(&unit)? {
                    EmitOutcome::Written(path) => written.push(path),
                    EmitOutcome::SkippedEmpty => skipped += 1,
                },
                Mode::PrintForward => print_script(&unit.name, &unit.forward),
                Mode::PrintBackward => print_script(&unit.name, &unit.backward),
            }
        }
    }

    Ok(RunSummary {
        written,
        skipped,
        selection,
        elapsed: started.elapsed(),
    })
}

/// Prints every table name, prefix-stripped, joined by `separator`.
pub async fn list(pool: MySqlPool, separator: &str, prefix: &str) -> Result<()> {
    let introspector = Introspector::new(pool);
    let names: Vec<String> = introspector
        .table_status()
        .await?
        .into_iter()
        .map(|status| strip_prefix(&status.name, prefix))
        .collect();
    println!("{}", names.join(separator));
    Ok(())
}

/// The row window for one table's data dump, or `None` when the table is
/// outside the `--data` list.
fn effective_limit(data_tables: &[String], raw_name: &str, limit: LimitSpec) -> Option<LimitSpec> {
    if data_tables.is_empty() || data_tables.iter().any(|t| t == raw_name) {
        Some(limit)
    } else {
        None
    }
}

/// Fetches a table's rows page by page, each page rendered as one batch
/// insert. An unbounded window ends at the first short page.
async fn fetch_batches(
    introspector: &Introspector,
    table: &TableDescriptor,
    stripped_name: &str,
    limit: LimitSpec,
) -> Result<Vec<String>> {
    let columns: Vec<String> = table.columns.iter().map(|c| c.name.clone()).collect();

    let mut batches = Vec::new();
    for (offset, count) in limit.pages() {
        let rows = introspector.fetch_page(table, offset, count).await?;
        let fetched = rows.len() as u64;
        if !rows.is_empty() {
            batches.push(render_batch_insert(stripped_name, &columns, &rows));
        }
        if fetched < count {
            break;
        }
    }
    Ok(batches)
}

fn print_script(name: &str, body: &str) {
    if body.trim().is_empty() {
        return;
    }
    println!("// {name}");
    print!("{body}");
    println!();
}

fn run_prefix() -> String {
    chrono::Local::now().format("%y%m%d_%H%M%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::time::Duration;

    use sqlx::mysql::MySqlPoolOptions;

    use crate::error::DumpError;

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_effective_limit_applies_to_all_without_data_list() {
        let limit = LimitSpec::Range {
            offset: 0,
            count: Some(1000),
        };
        assert_eq!(effective_limit(&[], "app_user", limit), Some(limit));
    }

    #[test]
    fn test_effective_limit_respects_data_list() {
        let limit = LimitSpec::All;
        let data = names(&["app_user"]);

        assert_eq!(effective_limit(&data, "app_user", limit), Some(limit));
        assert_eq!(effective_limit(&data, "app_role", limit), None);
    }

    #[test]
    fn test_run_prefix_shape() {
        let prefix = run_prefix();
        assert_eq!(prefix.len(), 13);
        assert_eq!(prefix.as_bytes()[6], b'_');
        assert!(prefix
            .chars()
            .all(|c| c.is_ascii_digit() || c == '_'));
    }

    #[tokio::test]
    async fn test_run_surfaces_connection_errors() {
        let pool = MySqlPoolOptions::new()
            .acquire_timeout(Duration::from_millis(100))
            .connect_lazy("mysql://root@127.0.0.1:1/schemadump")
            .unwrap();

        let options = RunOptions {
            out_dir: PathBuf::from("migrations"),
            include: Vec::new(),
            filter: Vec::new(),
            data: Vec::new(),
            limit: LimitSpec::All,
            aspect: None,
            migration_table: "migration".to_string(),
            table_prefix: String::new(),
            table_options: String::new(),
            file_prefix: None,
        };

        let result = run(pool, &options, Mode::Generate).await;
        assert!(matches!(result, Err(DumpError::Database(_))));
    }
}
