//! Immutable machine definitions.
//!
//! A definition is a flat graph of states. Each state declares its entry
//! actions and at most one transition per event kind. Definitions are
//! validated once, when built, so lookups at runtime never fail on a
//! dangling reference.

pub mod error;

pub use error::DefinitionError;

use crate::core::{EventKind, Schema};
use std::collections::HashMap;
use std::fmt;

/// Edge of the state graph: where to go and what to run on the way.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition<S, A> {
    pub target: S,
    /// Run in order before the state pointer moves to `target`.
    pub actions: Vec<A>,
}

/// One state of a definition.
#[derive(Clone, Debug)]
pub struct StateNode<S, K, A> {
    pub(crate) entry: Vec<A>,
    pub(crate) on: HashMap<K, Transition<S, A>>,
}

impl<S, K, A> StateNode<S, K, A> {
    /// Entry actions in declaration order.
    pub fn entry(&self) -> &[A] {
        &self.entry
    }

    /// Number of event kinds this state reacts to.
    pub fn transition_count(&self) -> usize {
        self.on.len()
    }
}

/// Node type of a schema's definitions.
pub type Node<M> = StateNode<<M as Schema>::State, EventKind<M>, <M as Schema>::Action>;

/// Validated, immutable machine graph.
///
/// Built with [`MachineBuilder`](crate::builder::MachineBuilder).
pub struct MachineDefinition<M: Schema> {
    id: String,
    initial: M::State,
    nodes: HashMap<M::State, Node<M>>,
    order: Vec<M::State>,
}

impl<M: Schema> MachineDefinition<M> {
    /// Assemble a definition whose references were already checked.
    pub(crate) fn from_validated(
        id: String,
        initial: M::State,
        states: Vec<(M::State, Node<M>)>,
    ) -> Self {
        let order = states.iter().map(|(state, _)| state.clone()).collect();
        Self {
            id,
            initial,
            nodes: states.into_iter().collect(),
            order,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn initial_state(&self) -> &M::State {
        &self.initial
    }

    /// Transition taken from `state` on an event of `kind`, if one is declared.
    pub fn resolve_transition(
        &self,
        state: &M::State,
        kind: EventKind<M>,
    ) -> Option<&Transition<M::State, M::Action>> {
        self.nodes.get(state).and_then(|node| node.on.get(&kind))
    }

    /// Entry actions of `state`, empty for a state that declares none.
    pub fn entry_actions_of(&self, state: &M::State) -> &[M::Action] {
        self.nodes
            .get(state)
            .map(|node| node.entry.as_slice())
            .unwrap_or(&[])
    }

    /// Declared states in declaration order.
    pub fn states(&self) -> &[M::State] {
        &self.order
    }

    pub fn node(&self, state: &M::State) -> Option<&Node<M>> {
        self.nodes.get(state)
    }

    pub fn contains(&self, state: &M::State) -> bool {
        self.nodes.contains_key(state)
    }

    /// Every action referenced by entry lists or transitions, each once,
    /// in declaration order.
    pub fn actions(&self) -> Vec<M::Action> {
        let mut seen = Vec::new();
        for state in &self.order {
            let node = &self.nodes[state];
            let transition_actions = node.on.values().flat_map(|t| t.actions.iter());
            for action in node.entry.iter().chain(transition_actions) {
                if !seen.contains(action) {
                    seen.push(*action);
                }
            }
        }
        seen
    }
}

impl<M: Schema> fmt::Debug for MachineDefinition<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MachineDefinition")
            .field("id", &self.id)
            .field("initial", &self.initial)
            .field("states", &self.order)
            .finish()
    }
}
