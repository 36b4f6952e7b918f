//! Interpreter error types.

use super::inbox::Status;
use crate::actions::ActionError;
use crate::checkpoint::CheckpointError;
use thiserror::Error;

/// Errors returned by interpreter operations.
///
/// None of these leave the interpreter in an inconsistent state; the caller
/// may keep using it.
#[derive(Debug, Error)]
pub enum InterpreterError {
    /// `send`, `flush` or `stop` on an interpreter that is not running.
    #[error("Interpreter is not running (status: {status:?})")]
    NotStarted { status: Status },

    /// `start` on an interpreter that was already started.
    #[error("Interpreter was already started (status: {status:?})")]
    AlreadyStarted { status: Status },

    /// An action failed; the event that triggered it was abandoned.
    #[error("Action failed while processing {event}: {source}")]
    Action {
        event: String,
        #[source]
        source: ActionError,
    },

    #[error(transparent)]
    Checkpoint(#[from] CheckpointError),
}
