//! Artifact emission.
//!
//! Writes rendered migration files into the output directory and keeps the
//! tally printed at the end of a run.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use tracing::{debug, info};

use schemadump_core::assemble::{render_migration_file, ChangeUnit};
use schemadump_core::select::SelectionResult;

use crate::error::{DumpError, Result};

/// Outcome of emitting a single change unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmitOutcome {
    /// The artifact was written to this path.
    Written(PathBuf),
    /// The unit had an empty side and produced no file.
    SkippedEmpty,
}

/// Writes migration artifacts into one directory.
pub struct Emitter {
    out_dir: PathBuf,
}

impl Emitter {
    /// Creates an emitter targeting `out_dir`.
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    /// Writes one change unit, or skips it when either side is empty.
    ///
    /// Re-emitting the same unit overwrites the previous file.
    pub fn emit(&self, unit: &ChangeUnit) -> Result<EmitOutcome> {
        if unit.is_empty() {
            debug!(artifact = %unit.name, "Nothing to write, skipping");
            return Ok(EmitOutcome::SkippedEmpty);
        }

        fs::create_dir_all(&self.out_dir).map_err(|source| DumpError::DirectoryCreation {
            path: self.out_dir.clone(),
            source,
        })?;

        let path = self.out_dir.join(format!("{}.rs", unit.name));
        fs::write(&path, render_migration_file(unit)).map_err(|source| {
            DumpError::ArtifactWrite {
                path: path.clone(),
                source,
            }
        })?;

        info!(artifact = %unit.name, "Wrote migration file");
        Ok(EmitOutcome::Written(path))
    }
}

/// Tally of one run, printed after the last table.
#[derive(Debug)]
pub struct RunSummary {
    /// Paths of every written artifact, in emission order.
    pub written: Vec<PathBuf>,
    /// How many units were skipped for having an empty side.
    pub skipped: usize,
    /// The generated/filtered table partition.
    pub selection: SelectionResult,
    /// Wall-clock time of the run.
    pub elapsed: Duration,
}

impl RunSummary {
    /// Prints the closing report.
    pub fn print(&self) {
        print!("{}", self.render());
    }

    /// Renders the closing report. Runs that print scripts instead of
    /// writing files list the dumped tables by name.
    pub fn render(&self) -> String {
        let mut out = String::new();

        if !self.written.is_empty() {
            out.push_str("\nGenerated migration files:\n");
            out.push_str(&format!("{:-<60}\n", ""));
            for path in &self.written {
                out.push_str(&format!(" [+] {}\n", path.display()));
            }
        } else if !self.selection.generated().is_empty() {
            out.push_str("\nDumped tables:\n");
            out.push_str(&format!("{:-<60}\n", ""));
            for name in self.selection.generated() {
                out.push_str(&format!(" [+] {name}\n"));
            }
        } else {
            out.push_str("\nNo tables were dumped.\n");
        }

        if !self.selection.filtered().is_empty() {
            out.push_str("\nFiltered tables:\n");
            out.push_str(&format!("{:-<60}\n", ""));
            for name in self.selection.filtered() {
                out.push_str(&format!(" [-] {name}\n"));
            }
        }

        out.push_str(&format!(
            "\n{} table(s) dumped, {} filtered, {} empty unit(s) skipped, done in {:.2}s\n",
            self.selection.generated().len(),
            self.selection.filtered().len(),
            self.skipped,
            self.elapsed.as_secs_f64()
        ));

        out
    }
}
