//! Errors raised while building a machine definition.

use thiserror::Error;

/// Problems detected when a machine definition or machine is constructed.
///
/// A definition that fails with any of these is never produced.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DefinitionError {
    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error("Initial state '{state}' is not declared")]
    UndeclaredInitialState { state: String },

    #[error("State '{state}' is declared more than once")]
    DuplicateState { state: String },

    #[error("State '{state}' has more than one transition for event {event}")]
    DuplicateTransition { state: String, event: String },

    #[error("Transition from '{state}' on {event} targets undeclared state '{target}'")]
    UnknownTarget {
        state: String,
        event: String,
        target: String,
    },

    #[error("Action {action} is referenced but not implemented")]
    UnknownAction { action: String },

    #[error("{} problems in machine definition: {}", .0.len(), join(.0))]
    Multiple(Vec<DefinitionError>),
}

impl DefinitionError {
    /// Collapse a list of problems into one error.
    pub(crate) fn from_problems(mut problems: Vec<DefinitionError>) -> Self {
        if problems.len() == 1 {
            problems.remove(0)
        } else {
            DefinitionError::Multiple(problems)
        }
    }

    /// Every individual problem this error stands for.
    pub fn problems(&self) -> Vec<&DefinitionError> {
        match self {
            DefinitionError::Multiple(problems) => problems.iter().collect(),
            other => vec![other],
        }
    }
}

fn join(problems: &[DefinitionError]) -> String {
    problems
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_problem_is_not_wrapped() {
        let err = DefinitionError::from_problems(vec![DefinitionError::MissingInitialState]);
        assert_eq!(err, DefinitionError::MissingInitialState);
        assert_eq!(err.problems().len(), 1);
    }

    #[test]
    fn multiple_problems_are_listed() {
        let err = DefinitionError::from_problems(vec![
            DefinitionError::DuplicateState {
                state: "Idle".to_string(),
            },
            DefinitionError::UnknownAction {
                action: "Beep".to_string(),
            },
        ]);

        assert_eq!(err.problems().len(), 2);
        assert_eq!(
            err.to_string(),
            "2 problems in machine definition: State 'Idle' is declared more than once; \
             Action Beep is referenced but not implemented"
        );
    }
}
