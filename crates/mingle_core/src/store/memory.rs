//! In-memory snapshot store.
//!
//! Serves tests and embedding callers that manage persistence themselves,
//! mirroring the file store's load/save contract without touching disk.

use crate::store::{Snapshot, SnapshotStore, StoreResult};
use std::cell::RefCell;

/// Snapshot store holding at most one snapshot in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    snapshot: RefCell<Option<Snapshot>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with a snapshot, as if previously saved.
    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            snapshot: RefCell::new(Some(snapshot)),
        }
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self) -> StoreResult<Option<Snapshot>> {
        Ok(self.snapshot.borrow().clone())
    }

    fn save(&self, snapshot: &Snapshot) -> StoreResult<()> {
        *self.snapshot.borrow_mut() = Some(snapshot.clone());
        Ok(())
    }
}
