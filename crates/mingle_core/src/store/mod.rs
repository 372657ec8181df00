//! Snapshot persistence contracts and implementations.
//!
//! # Responsibility
//! - Define the persisted snapshot shape and the store seam the scheduler
//!   writes through.
//! - Keep serialization details out of the service layer.
//!
//! # Invariants
//! - Persistence is full-snapshot: every save rewrites the complete state.
//! - A store with no prior snapshot loads as `None`, never as an error.

use crate::model::meeting::{Meeting, MeetingSerial};
use crate::model::participant::Participant;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod json_file;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence-layer error for snapshot load and save operations.
#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Serde(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "snapshot i/o failure: {err}"),
            Self::Serde(err) => write!(f, "snapshot encoding failure: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Serde(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serde(value)
    }
}

/// Complete persisted state of one scheduler instance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Roster records.
    #[serde(default)]
    pub participants: Vec<Participant>,
    /// Meeting log in stored order.
    #[serde(default)]
    pub meetings: Vec<Meeting>,
    /// Known affiliation labels.
    #[serde(default)]
    pub affiliations: Vec<String>,
    /// Highest meeting serial ever assigned.
    #[serde(default)]
    pub last_serial: MeetingSerial,
    /// Opaque caller-owned metadata carried through persistence.
    #[serde(default)]
    pub history_metadata: BTreeMap<String, String>,
}

/// Storage seam for scheduler state.
///
/// Implementations must treat `save` as a full rewrite; there is no
/// incremental or partial update path.
pub trait SnapshotStore {
    /// Loads the last saved snapshot, or `None` when nothing was ever saved.
    fn load(&self) -> StoreResult<Option<Snapshot>>;
    /// Replaces the stored snapshot with `snapshot`.
    fn save(&self, snapshot: &Snapshot) -> StoreResult<()>;
}
