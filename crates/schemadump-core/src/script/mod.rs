//! The script DSL generated artifacts compile against.
//!
//! A generated file is a struct implementing [`Migration`], whose `up()`
//! and `down()` return [`Operation`] vectors built from the table and
//! column builders here.
//!
//! # Example
//!
//! ```rust
//! use schemadump_core::script::{
//!     bigint, varchar, CreateTableBuilder, Migration, Operation,
//! };
//!
//! pub struct M2308171015300TableUser;
//!
//! impl Migration for M2308171015300TableUser {
//!     const ID: &'static str = "m230817_101530_0_table_user";
//!
//!     fn up() -> Vec<Operation> {
//!         vec![
//!             CreateTableBuilder::new()
//!                 .name("user")
//!                 .column(bigint("id").unsigned().build())
//!                 .column(varchar("name", 255).not_null().build())
//!                 .build()
//!                 .into(),
//!         ]
//!     }
//!
//!     fn down() -> Vec<Operation> {
//!         vec![Operation::drop_table("user")]
//!     }
//! }
//! ```

mod column;
mod migration;
mod operation;
mod table;

pub use column::{
    bigint, binary, blob, boolean, char, custom, date, datetime, decimal, double, integer, json,
    real, smallint, text, time, timestamp, tinyint, varbinary, varchar, ColumnBuilder,
    ColumnDefinition, DataType, DefaultValue,
};
pub use migration::Migration;
pub use operation::{
    AddForeignKeyOp, AddPrimaryKeyOp, BatchInsertOp, CreateIndexOp, CreateTableOp,
    DropAutoIncrementOp, DropForeignKeyOp, DropIndexOp, DropPrimaryKeyOp, DropTableOp, Operation,
    ReferentialAction, SetAutoIncrementOp, TableCommentOp, Value,
};
pub use table::{CreateTableBuilder, HasColumns, HasName, NoColumns, NoName};
