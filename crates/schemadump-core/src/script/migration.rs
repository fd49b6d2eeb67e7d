//! Migration trait implemented by every generated artifact.

use super::operation::Operation;

/// A paired forward/backward change script.
///
/// Every generated file defines one unit struct implementing this trait.
/// Artifacts sort lexically by `ID`, which is also the replay order.
///
/// # Example
///
/// ```rust
/// use schemadump_core::script::{Migration, Operation};
///
/// pub struct M2308171015300TableUser;
///
/// impl Migration for M2308171015300TableUser {
///     const ID: &'static str = "m230817_101530_0_table_user";
///
///     fn up() -> Vec<Operation> {
///         vec![Operation::add_table_comment("user", "accounts")]
///     }
///
///     fn down() -> Vec<Operation> {
///         vec![Operation::drop_table("user")]
///     }
/// }
///
/// assert_eq!(M2308171015300TableUser::ID, "m230817_101530_0_table_user");
/// ```
pub trait Migration {
    /// Unique artifact identifier, equal to the generated file stem.
    const ID: &'static str;

    /// Operations applied when replaying forward.
    fn up() -> Vec<Operation>;

    /// Operations applied when unwinding.
    fn down() -> Vec<Operation>;
}
