//! Checkpoint error types.

use thiserror::Error;

/// Errors raised while encoding, decoding or resuming checkpoints
#[derive(Debug, Error)]
pub enum CheckpointError {
    /// Serialization to JSON or binary format failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// Deserialization from JSON or binary format failed
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    /// Checkpoint version is not supported by this version
    #[error("Unsupported checkpoint version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Checkpoint was taken from a session of a different machine
    #[error("Checkpoint belongs to machine '{found}', expected '{expected}'")]
    MachineMismatch { expected: String, found: String },

    /// Checkpointed state is not declared by the machine
    #[error("State '{state}' is not declared by machine '{machine}'")]
    UnknownState { machine: String, state: String },
}
