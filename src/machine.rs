//! Machines: a definition bound to the registry that implements its actions.

use crate::actions::ActionRegistry;
use crate::builder::{check, Check};
use crate::core::Schema;
use crate::definition::{DefinitionError, MachineDefinition};
use crate::interpreter::{Interpreter, InterpreterOptions};
use std::fmt;
use std::sync::Arc;
use stillwater::validation::Validation;

/// A validated definition plus its action registry.
///
/// Both halves are shared and read-only; cloning a machine is cheap and any
/// number of interpreters may run the same machine independently.
pub struct Machine<M: Schema> {
    definition: Arc<MachineDefinition<M>>,
    actions: Arc<dyn ActionRegistry<M>>,
}

impl<M: Schema> Machine<M> {
    /// Bind `definition` to `actions`, checking every referenced action is
    /// implemented.
    pub fn new<A>(definition: MachineDefinition<M>, actions: A) -> Result<Self, DefinitionError>
    where
        A: ActionRegistry<M> + 'static,
    {
        Self::from_shared(Arc::new(definition), Arc::new(actions))
    }

    /// Like [`Machine::new`], for a definition and registry that are already
    /// shared with other machines.
    pub fn from_shared(
        definition: Arc<MachineDefinition<M>>,
        actions: Arc<dyn ActionRegistry<M>>,
    ) -> Result<Self, DefinitionError> {
        let checks: Vec<Check> = definition
            .actions()
            .into_iter()
            .map(|action| {
                check(actions.implements(action), || DefinitionError::UnknownAction {
                    action: format!("{action:?}"),
                })
            })
            .collect();

        match Validation::all_vec(checks) {
            Validation::Success(_) => Ok(Self {
                definition,
                actions,
            }),
            Validation::Failure(errors) => Err(DefinitionError::from_problems(
                errors.iter().cloned().collect(),
            )),
        }
    }

    pub fn definition(&self) -> &MachineDefinition<M> {
        &self.definition
    }

    pub fn actions(&self) -> &dyn ActionRegistry<M> {
        self.actions.as_ref()
    }

    pub fn id(&self) -> &str {
        self.definition.id()
    }

    /// Create a fresh interpreter for this machine, not yet started.
    pub fn interpret(&self) -> Interpreter<M> {
        Interpreter::new(self.clone())
    }

    /// Create a fresh interpreter with explicit options.
    pub fn interpret_with(&self, options: InterpreterOptions) -> Interpreter<M> {
        Interpreter::with_options(self.clone(), options)
    }
}

impl<M: Schema> Clone for Machine<M> {
    fn clone(&self) -> Self {
        Self {
            definition: Arc::clone(&self.definition),
            actions: Arc::clone(&self.actions),
        }
    }
}

impl<M: Schema> fmt::Debug for Machine<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Machine")
            .field("definition", &self.definition)
            .finish_non_exhaustive()
    }
}

/// Bind a definition to its actions. See [`Machine::new`].
pub fn create_machine<M, A>(
    definition: MachineDefinition<M>,
    actions: A,
) -> Result<Machine<M>, DefinitionError>
where
    M: Schema,
    A: ActionRegistry<M> + 'static,
{
    Machine::new(definition, actions)
}

/// Create an interpreter for `machine`. See [`Machine::interpret`].
pub fn interpret<M: Schema>(machine: &Machine<M>) -> Interpreter<M> {
    machine.interpret()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{from_fn, ActionError};
    use crate::auth::{auth_definition, Auth, AuthAction, AuthContext};
    use crate::core::Trigger;

    struct PartialActions;

    impl ActionRegistry<Auth> for PartialActions {
        fn run(
            &self,
            action: AuthAction,
            _context: AuthContext,
            _trigger: Trigger<'_, crate::auth::AuthEvent>,
        ) -> Result<AuthContext, ActionError> {
            Err(ActionError::failed(action, "not wired"))
        }

        fn implements(&self, action: AuthAction) -> bool {
            action == AuthAction::SayHello
        }
    }

    #[test]
    fn unimplemented_actions_are_rejected() {
        let result = create_machine(auth_definition().unwrap(), PartialActions);

        let err = result.unwrap_err();
        let problems = err.problems();
        assert_eq!(problems.len(), 2);
        assert!(problems.contains(&&DefinitionError::UnknownAction {
            action: "SendTelemetry".to_string()
        }));
        assert!(problems.contains(&&DefinitionError::UnknownAction {
            action: "SayGoodbye".to_string()
        }));
    }

    #[test]
    fn machines_share_their_parts() {
        let machine = create_machine(
            auth_definition().unwrap(),
            from_fn::<Auth, _>(|_, context: AuthContext, _| Ok(context)),
        )
        .unwrap();
        let clone = machine.clone();

        assert_eq!(clone.id(), "auth");
        assert!(std::ptr::eq(machine.definition(), clone.definition()));
    }
}
