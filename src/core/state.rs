//! State identifiers for machine definitions.
//!
//! A state is an opaque, cheaply comparable name for one node of a machine
//! definition. It carries no data; everything that changes at runtime lives
//! in the interpreter's context.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

/// Trait for state identifiers.
///
/// States are keys into a machine definition, so they must be hashable and
/// totally comparable in addition to serializable. Only the name is needed;
/// [`state_enum!`](crate::state_enum) generates it for plain enums.
///
/// # Example
///
/// ```rust
/// use session_machine::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum DoorState {
///     Open,
///     Closed,
/// }
///
/// impl State for DoorState {
///     fn name(&self) -> &str {
///         match self {
///             Self::Open => "Open",
///             Self::Closed => "Closed",
///         }
///     }
/// }
///
/// assert_eq!(DoorState::Open.name(), "Open");
/// ```
pub trait State:
    Clone + Eq + Hash + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;
}
