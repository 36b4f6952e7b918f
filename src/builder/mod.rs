//! Builder API for ergonomic machine construction.
//!
//! This module provides fluent builders and macros for declaring machine
//! definitions with minimal boilerplate while keeping every reference
//! checked at build time.

pub mod machine;
pub mod macros;
pub mod state;

pub use machine::MachineBuilder;
pub use state::StateBuilder;

use crate::definition::DefinitionError;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Outcome of one construction check; failures accumulate.
pub(crate) type Check = Validation<(), NonEmptyVec<DefinitionError>>;

/// Pass when `ok`, otherwise fail with the error built by `problem`.
pub(crate) fn check<F>(ok: bool, problem: F) -> Check
where
    F: FnOnce() -> DefinitionError,
{
    if ok {
        Validation::success(())
    } else {
        Validation::fail(problem())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_accumulates_failures() {
        let checks = vec![
            check(true, || DefinitionError::MissingInitialState),
            check(false, || DefinitionError::MissingInitialState),
            check(false, || DefinitionError::UnknownAction {
                action: "Beep".to_string(),
            }),
        ];

        match Validation::all_vec(checks) {
            Validation::Failure(errors) => assert_eq!(errors.len(), 2),
            Validation::Success(_) => panic!("Expected failures, got success"),
        }
    }
}
