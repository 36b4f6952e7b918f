//! Checkpoint and resume for interpreters.
//!
//! A checkpoint captures the session id, current snapshot and transition
//! history of an interpreter so it can be resumed after a restart with
//! [`Interpreter::resume`](crate::interpreter::Interpreter::resume). Queued
//! events and observers are not part of a checkpoint.

use crate::core::{Snapshot, State, StateHistory};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable capture of a running interpreter.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound(serialize = "C: Serialize", deserialize = "C: DeserializeOwned"))]
pub struct Checkpoint<S: State, C> {
    /// Checkpoint format version
    pub version: u32,

    /// Session the checkpoint was taken from
    pub session_id: Uuid,

    /// Id of the machine definition the session runs
    pub machine_id: String,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    /// State and context at capture time
    pub snapshot: Snapshot<S, C>,

    /// Transitions taken so far
    pub history: StateHistory<S>,
}

impl<S: State, C: Serialize + DeserializeOwned> Checkpoint<S, C> {
    pub fn new(
        session_id: Uuid,
        machine_id: &str,
        snapshot: Snapshot<S, C>,
        history: StateHistory<S>,
    ) -> Self {
        Self {
            version: CHECKPOINT_VERSION,
            session_id,
            machine_id: machine_id.to_string(),
            timestamp: Utc::now(),
            snapshot,
            history,
        }
    }

    /// Reject checkpoints written by an incompatible format version.
    pub fn validate(&self) -> Result<(), CheckpointError> {
        if self.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn to_json_pretty(&self) -> Result<String, CheckpointError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        let checkpoint: Self = serde_json::from_str(json)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.validate()?;
        Ok(checkpoint)
    }

    /// Compact binary encoding.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CheckpointError> {
        let checkpoint: Self = bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.validate()?;
        Ok(checkpoint)
    }
}
