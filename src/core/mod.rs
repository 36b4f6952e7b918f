//! Core state machine types.
//!
//! This module contains the vocabulary every other part of the crate is
//! written in:
//! - State identifiers via the `State` trait
//! - Events and the triggers actions run under
//! - The `Schema` bundling a machine's types
//! - Snapshots handed to observers
//! - Transition history
//!
//! Nothing here has side effects.

mod event;
mod history;
mod schema;
mod snapshot;
mod state;

pub use event::{Event, Trigger};
pub use history::{HistoryEntry, StateHistory};
pub use schema::{EventKind, Schema};
pub use snapshot::Snapshot;
pub use state::State;
