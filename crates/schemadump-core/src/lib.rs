//! # schemadump-core
//!
//! Turns an introspected MySQL schema into paired forward/backward
//! migration scripts, one pair per table aspect: structure, data, keys
//! and foreign keys.
//!
//! The crate is deliberately free of database drivers. Callers hand it
//! [`descriptor::TableDescriptor`] snapshots and raw rows; everything
//! else here is pure translation:
//!
//! - [`typemap`] maps native column types to builder expressions,
//! - [`keys`] groups raw key rows and recovers DDL-only facts,
//! - [`dump`] plans row pages and serializes fetched values,
//! - [`select`] decides which tables participate,
//! - [`generate`] renders per-aspect script bodies,
//! - [`assemble`] names, orders and renders the final artifacts,
//! - [`script`] is the DSL those artifacts compile against.
//!
//! # Example
//!
//! ```rust
//! use schemadump_core::assemble::{Aspect, ChangeUnit, render_migration_file};
//! use schemadump_core::descriptor::{ColumnDescriptor, TableDescriptor};
//! use schemadump_core::generate::structure_scripts;
//!
//! let table = TableDescriptor::new("user")
//!     .with_column(ColumnDescriptor::new("id", "bigint(20) unsigned").not_null());
//!
//! let pair = structure_scripts(&table, "", "ENGINE=InnoDB");
//! let unit = ChangeUnit::new("user", Aspect::Structure, pair, "230817_101530");
//! let code = render_migration_file(&unit);
//!
//! assert!(code.contains("pub struct M2308171015300TableUser;"));
//! assert!(code.contains(".column(bigint(\"id\").width(20).unsigned().not_null().build())"));
//! ```

pub mod assemble;
pub mod descriptor;
pub mod dump;
pub mod generate;
pub mod keys;
pub mod script;
pub mod select;
pub mod typemap;

pub use assemble::{artifact_name, render_migration_file, struct_name, Aspect, ChangeUnit};
pub use descriptor::{
    ColumnDescriptor, DefaultValue, ForeignKeyDescriptor, KeyGroup, RawKeyRow, TableDescriptor,
};
pub use dump::{LimitParseError, LimitSpec, BATCH_THRESHOLD};
pub use generate::ScriptPair;
pub use select::{SelectionResult, TableSelector};
