//! Change-unit assembly and artifact rendering.
//!
//! A change unit is one (table, aspect) pair carrying its scripts and its
//! deterministic artifact name. The name embeds the aspect's replay rank,
//! so sorting artifact stems lexically is the replay order.

use crate::generate::ScriptPair;

/// One migration concern generated per table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Aspect {
    /// Table structure: columns, defaults, comments.
    Structure,
    /// Row data.
    Data,
    /// Primary key, auto-increment and indexes.
    Key,
    /// Foreign key constraints.
    ForeignKey,
}

impl Aspect {
    /// Every aspect, in replay order.
    pub const ALL: [Self; 4] = [Self::Structure, Self::Data, Self::Key, Self::ForeignKey];

    /// Replay rank, also the digit embedded in artifact names.
    #[must_use]
    pub const fn order(self) -> u8 {
        match self {
            Self::Structure => 0,
            Self::Data => 1,
            Self::Key => 2,
            Self::ForeignKey => 3,
        }
    }

    /// Name token used in artifact stems.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::Structure => "table",
            Self::Data => "table_data",
            Self::Key => "key",
            Self::ForeignKey => "foreign_key",
        }
    }

    /// Aspect for a numeric selector, mirroring `order()`.
    #[must_use]
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Self::Structure),
            1 => Some(Self::Data),
            2 => Some(Self::Key),
            3 => Some(Self::ForeignKey),
            _ => None,
        }
    }
}

/// Paired forward/backward scripts for one table aspect, named and
/// ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeUnit {
    /// Prefix-stripped table name.
    pub table: String,
    /// The aspect this unit covers.
    pub aspect: Aspect,
    /// Body lines of `up()`.
    pub forward: String,
    /// Body lines of `down()`.
    pub backward: String,
    /// Artifact stem, without the `.rs` extension.
    pub name: String,
}

impl ChangeUnit {
    /// Assembles a change unit from generated scripts.
    #[must_use]
    pub fn new(table: impl Into<String>, aspect: Aspect, pair: ScriptPair, file_prefix: &str) -> Self {
        let table = table.into();
        let name = artifact_name(file_prefix, aspect, &table);
        Self {
            table,
            aspect,
            forward: pair.forward,
            backward: pair.backward,
            name,
        }
    }

    /// Whether either side of the pair is empty, making the unit
    /// unwritable.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.forward.trim().is_empty() || self.backward.trim().is_empty()
    }
}

/// Deterministic artifact stem for a (prefix, aspect, table) triple.
///
/// The layout is `m{prefix}_{order}_{aspect}_{table}`; with a timestamp
/// prefix that reads `m230817_101530_0_table_user`.
#[must_use]
pub fn artifact_name(file_prefix: &str, aspect: Aspect, table: &str) -> String {
    format!(
        "m{file_prefix}_{}_{}_{table}",
        aspect.order(),
        aspect.token()
    )
}

/// Converts an artifact stem like `m230817_101530_0_table_user` into a
/// struct name like `M2308171015300TableUser`.
#[must_use]
pub fn struct_name(artifact: &str) -> String {
    let mut result = String::with_capacity(artifact.len());
    let mut capitalize_next = true;
    for ch in artifact.chars() {
        if ch == '_' {
            capitalize_next = true;
        } else if capitalize_next {
            result.push(ch.to_ascii_uppercase());
            capitalize_next = false;
        } else {
            result.push(ch);
        }
    }
    result
}

/// Renders the complete artifact source for a change unit.
#[must_use]
pub fn render_migration_file(unit: &ChangeUnit) -> String {
    let struct_name = struct_name(&unit.name);

    format!(
        "{imports}\n\
         \n\
         pub struct {struct_name};\n\
         \n\
         impl Migration for {struct_name} {{\n\
         \x20   const ID: &'static str = \"{id}\";\n\
         \n\
         \x20   fn up() -> Vec<Operation> {{\n\
         \x20       vec![\n\
         {forward}\
         \x20       ]\n\
         \x20   }}\n\
         \n\
         \x20   fn down() -> Vec<Operation> {{\n\
         \x20       vec![\n\
         {backward}\
         \x20       ]\n\
         \x20   }}\n\
         }}\n",
        imports = import_block(unit.aspect),
        id = unit.name,
        forward = unit.forward,
        backward = unit.backward,
    )
}

/// Import block for an aspect's artifacts. Structure scripts may use any
/// column shorthand, so they import the whole set.
const fn import_block(aspect: Aspect) -> &'static str {
    match aspect {
        Aspect::Structure => {
            "use schemadump_core::script::{\n\
             \x20   Migration, Operation, CreateTableBuilder,\n\
             \x20   bigint, binary, blob, boolean, char, custom,\n\
             \x20   date, datetime, decimal, double, integer, json,\n\
             \x20   real, smallint, text, time, timestamp, tinyint,\n\
             \x20   varbinary, varchar,\n\
             };"
        }
        Aspect::Data => "use schemadump_core::script::{Migration, Operation, Value};",
        Aspect::Key => "use schemadump_core::script::{Migration, Operation};",
        Aspect::ForeignKey => {
            "use schemadump_core::script::{Migration, Operation, ReferentialAction};"
        }
    }
}
