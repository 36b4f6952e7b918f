//! Immutable views of a running machine.

use serde::{Deserialize, Serialize};

/// State and context of an interpreter after it finished handling one event.
///
/// Handed to transition observers. `changed` is true only when a transition
/// fired for the event that produced this snapshot; the snapshot produced by
/// `start()` and those produced by unmatched events have it false.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot<S, C> {
    pub state: S,
    pub context: C,
    pub changed: bool,
}

impl<S: PartialEq, C> Snapshot<S, C> {
    /// Check whether this snapshot is in `state`.
    pub fn matches(&self, state: &S) -> bool {
        self.state == *state
    }
}
