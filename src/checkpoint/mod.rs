//! Session checkpoints.
//!
//! A checkpoint captures the calculator state, its transition history and
//! session metadata so a session can be written on exit and resumed later.
//! Checkpoints are stored as JSON, or as bincode when the file name ends in
//! `.bin`.

use crate::core::{CalculatorState, StateHistory};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Metadata tracked by the calculator shell
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionMetadata {
    /// When the session started
    pub created_at: DateTime<Utc>,

    /// Last dispatch time
    pub updated_at: DateTime<Utc>,

    /// Number of actions dispatched, including ones that changed nothing
    pub actions_dispatched: usize,

    /// Dispatch count per action kind
    pub action_counts: HashMap<String, usize>,
}

impl Default for SessionMetadata {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            created_at: now,
            updated_at: now,
            actions_dispatched: 0,
            action_counts: HashMap::new(),
        }
    }
}

impl SessionMetadata {
    /// Count one dispatched action of the given kind.
    pub fn count(&mut self, kind: &str) {
        self.actions_dispatched += 1;
        *self.action_counts.entry(kind.to_string()).or_insert(0) += 1;
        self.updated_at = Utc::now();
    }
}

/// Serializable snapshot of a calculator session.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: Uuid,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    /// Calculator state at checkpoint time
    pub state: CalculatorState,

    /// Transition history
    pub history: StateHistory,

    /// Session metadata
    pub metadata: SessionMetadata,
}

impl Checkpoint {
    /// Snapshot the given session parts under a fresh id.
    pub fn new(state: CalculatorState, history: StateHistory, metadata: SessionMetadata) -> Self {
        Self {
            version: CHECKPOINT_VERSION,
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            state,
            history,
            metadata,
        }
    }

    /// Check version and state invariants.
    pub fn validate(&self) -> Result<(), CheckpointError> {
        if self.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }

        if !self.state.is_well_formed() {
            return Err(CheckpointError::ValidationFailed(format!(
                "malformed calculator state: {:?}",
                self.state
            )));
        }

        if let Some(bad) = self
            .history
            .transitions()
            .iter()
            .find(|t| !t.from.is_well_formed() || !t.to.is_well_formed())
        {
            return Err(CheckpointError::ValidationFailed(format!(
                "malformed transition recorded at {}",
                bad.timestamp
            )));
        }

        Ok(())
    }

    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        let checkpoint: Self = serde_json::from_str(json)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.validate()?;
        Ok(checkpoint)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CheckpointError> {
        let checkpoint: Self = bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.validate()?;
        Ok(checkpoint)
    }

    /// Write the checkpoint, replacing any existing file atomically.
    pub fn save(&self, path: &Path) -> Result<(), CheckpointError> {
        let bytes = if is_binary(path) {
            self.to_bytes()?
        } else {
            self.to_json()?.into_bytes()
        };

        let temp_path = temp_path_for(path);
        fs::write(&temp_path, bytes)?;
        fs::rename(&temp_path, path)?;

        tracing::debug!(path = %path.display(), id = %self.id, "checkpoint saved");
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, CheckpointError> {
        let checkpoint = if is_binary(path) {
            Self::from_bytes(&fs::read(path)?)?
        } else {
            Self::from_json(&fs::read_to_string(path)?)?
        };

        tracing::debug!(path = %path.display(), id = %checkpoint.id, "checkpoint loaded");
        Ok(checkpoint)
    }
}

fn is_binary(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "bin")
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}
