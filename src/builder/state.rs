//! Builder for a single state node.

use crate::core::{EventKind, Schema};
use crate::definition::Transition;

/// Fluent description of one state: its entry actions and outgoing transitions.
///
/// Nothing is checked here; [`MachineBuilder::build`](super::MachineBuilder::build)
/// validates all states together.
pub struct StateBuilder<M: Schema> {
    pub(crate) state: M::State,
    pub(crate) entry: Vec<M::Action>,
    pub(crate) on: Vec<(EventKind<M>, Transition<M::State, M::Action>)>,
}

impl<M: Schema> StateBuilder<M> {
    pub fn new(state: M::State) -> Self {
        Self {
            state,
            entry: Vec::new(),
            on: Vec::new(),
        }
    }

    /// Append an entry action, run whenever this state becomes current.
    pub fn entry(mut self, action: M::Action) -> Self {
        self.entry.push(action);
        self
    }

    /// Move to `target` on events of `kind`, running no transition actions.
    pub fn on(self, kind: EventKind<M>, target: M::State) -> Self {
        self.on_with(kind, target, [])
    }

    /// Move to `target` on events of `kind`, running `actions` in order first.
    pub fn on_with<I>(mut self, kind: EventKind<M>, target: M::State, actions: I) -> Self
    where
        I: IntoIterator<Item = M::Action>,
    {
        self.on.push((
            kind,
            Transition {
                target,
                actions: actions.into_iter().collect(),
            },
        ));
        self
    }
}
