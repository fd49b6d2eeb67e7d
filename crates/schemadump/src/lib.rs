//! Dump a live MySQL schema as replayable migration files.
//!
//! `schemadump` connects to a running database and compiles what it finds
//! into paired forward/backward change scripts, one file per table and
//! concern, named so that lexical order is replay order.
//!
//! # Architecture
//!
//! - **Introspector** - Reads tables, columns, keys, foreign keys and raw
//!   DDL out of the server
//! - **Runner** - Classifies tables, drives the four script generators per
//!   table, gates data dumps by the `--data` list and `--limit` window
//! - **Emitter** - Writes one `.rs` artifact per non-empty change unit,
//!   skipping no-op units
//! - **Core** - The pure translation pipeline lives in `schemadump-core`
//!
//! # CLI Usage
//!
//! ```bash
//! # Generate migration files for every table
//! schemadump
//!
//! # Only two tables, with their first 100 rows each
//! schemadump --table user,role --limit 0,100
//!
//! # Print the forward scripts instead of writing files
//! schemadump create
//!
//! # Print the backward scripts
//! schemadump drop
//!
//! # List table names, prefix-stripped
//! schemadump list
//! ```

pub mod emit;
pub mod error;
pub mod introspect;
pub mod runner;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::emit::{EmitOutcome, Emitter, RunSummary};
    pub use crate::error::{DumpError, Result};
    pub use crate::introspect::{Introspector, TableStatus};
    pub use crate::runner::{Mode, RunOptions};
}
