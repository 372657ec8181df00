//! JSON-file snapshot store.
//!
//! # Responsibility
//! - Persist the full snapshot as one JSON document on every save.
//!
//! # Invariants
//! - A missing file loads as `None`; a present-but-corrupt file is a
//!   decode error, never silently discarded.
//! - Saves are plain rewrites. There is no atomic replace or journaling;
//!   callers own crash-consistency expectations.

use crate::store::{Snapshot, SnapshotStore, StoreResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Snapshot store backed by a single JSON file.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store writing to `path`. The file need not exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file this store reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for JsonFileStore {
    fn load(&self) -> StoreResult<Option<Snapshot>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let text = fs::read_to_string(&self.path)?;
        let snapshot = serde_json::from_str(&text)?;
        Ok(Some(snapshot))
    }

    fn save(&self, snapshot: &Snapshot) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let text = serde_json::to_string(snapshot)?;
        fs::write(&self.path, text)?;
        Ok(())
    }
}
