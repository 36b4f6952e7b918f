//! Builder for constructing machine definitions.

use crate::builder::state::StateBuilder;
use crate::builder::{check, Check};
use crate::core::{Schema, State};
use crate::definition::{DefinitionError, MachineDefinition, StateNode};
use std::collections::{HashMap, HashSet};
use stillwater::validation::Validation;

/// Builder for machine definitions with a fluent API.
///
/// `build` reports every problem it finds at once rather than stopping at
/// the first.
pub struct MachineBuilder<M: Schema> {
    id: String,
    initial: Option<M::State>,
    states: Vec<StateBuilder<M>>,
}

impl<M: Schema> MachineBuilder<M> {
    /// Create a new builder for a machine named `id`.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            initial: None,
            states: Vec::new(),
        }
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: M::State) -> Self {
        self.initial = Some(state);
        self
    }

    /// Declare a state, configuring it through a [`StateBuilder`].
    pub fn state<F>(self, state: M::State, configure: F) -> Self
    where
        F: FnOnce(StateBuilder<M>) -> StateBuilder<M>,
    {
        self.add_state(configure(StateBuilder::new(state)))
    }

    /// Declare a pre-configured state.
    pub fn add_state(mut self, state: StateBuilder<M>) -> Self {
        self.states.push(state);
        self
    }

    /// Validate and build the definition.
    pub fn build(self) -> Result<MachineDefinition<M>, DefinitionError> {
        let declared: HashSet<&M::State> = self.states.iter().map(|s| &s.state).collect();
        let mut checks: Vec<Check> = Vec::new();

        if let Some(initial) = &self.initial {
            checks.push(check(declared.contains(initial), || {
                DefinitionError::UndeclaredInitialState {
                    state: initial.name().to_string(),
                }
            }));
        } else {
            checks.push(check(false, || DefinitionError::MissingInitialState));
        }

        let mut seen_states = HashSet::new();
        for node in &self.states {
            let name = node.state.name();
            checks.push(check(seen_states.insert(&node.state), || {
                DefinitionError::DuplicateState {
                    state: name.to_string(),
                }
            }));

            let mut seen_kinds = HashSet::new();
            for (kind, transition) in &node.on {
                checks.push(check(seen_kinds.insert(*kind), || {
                    DefinitionError::DuplicateTransition {
                        state: name.to_string(),
                        event: format!("{kind:?}"),
                    }
                }));
                checks.push(check(declared.contains(&transition.target), || {
                    DefinitionError::UnknownTarget {
                        state: name.to_string(),
                        event: format!("{kind:?}"),
                        target: transition.target.name().to_string(),
                    }
                }));
            }
        }

        if let Validation::Failure(errors) = Validation::all_vec(checks) {
            return Err(DefinitionError::from_problems(
                errors.iter().cloned().collect(),
            ));
        }
        let initial = self.initial.ok_or(DefinitionError::MissingInitialState)?;

        let nodes = self
            .states
            .into_iter()
            .map(|builder| {
                let node = StateNode {
                    entry: builder.entry,
                    on: builder.on.into_iter().collect::<HashMap<_, _>>(),
                };
                (builder.state, node)
            })
            .collect::<Vec<_>>();

        tracing::debug!(machine = %self.id, states = nodes.len(), "machine definition built");
        Ok(MachineDefinition::from_validated(self.id, initial, nodes))
    }
}
