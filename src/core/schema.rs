//! The set of types one machine is built from.

use super::event::Event;
use super::state::State;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;
use std::hash::Hash;

/// Bundles the state, event, context and action types of one machine.
///
/// Implemented on a marker type so definitions, registries and interpreters
/// can be generic over a single parameter.
///
/// # Example
///
/// ```rust
/// use session_machine::core::Schema;
/// use session_machine::auth::{AuthAction, AuthContext, AuthEvent, AuthState};
///
/// struct Auth;
///
/// impl Schema for Auth {
///     type State = AuthState;
///     type Event = AuthEvent;
///     type Context = AuthContext;
///     type Action = AuthAction;
/// }
/// ```
pub trait Schema: Send + Sync + 'static {
    type State: State + 'static;
    type Event: Event + 'static;
    /// Mutable data carried across transitions; starts at `Default::default()`.
    type Context: Clone + Debug + Default + PartialEq + Serialize + DeserializeOwned + Send + Sync;
    /// Closed set of action identifiers.
    type Action: Copy + Eq + Hash + Debug + Send + Sync + 'static;
}

/// Event kind of a schema's event type.
pub type EventKind<M> = <<M as Schema>::Event as Event>::Kind;
