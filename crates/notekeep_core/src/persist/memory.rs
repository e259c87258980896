//! Volatile snapshot backend.

use super::snapshot::Snapshot;
use super::{PersistResult, SnapshotStore};

/// Keeps the last saved snapshot in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySnapshotStore {
    saved: Option<Snapshot>,
    save_count: usize,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing snapshot, as if it had been saved before.
    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            saved: Some(snapshot),
            save_count: 0,
        }
    }

    pub fn saved(&self) -> Option<&Snapshot> {
        self.saved.as_ref()
    }

    /// Number of successful saves since construction.
    pub fn save_count(&self) -> usize {
        self.save_count
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn load(&mut self) -> PersistResult<Option<Snapshot>> {
        self.saved.clone().map(super::checked).transpose()
    }

    fn save(&mut self, snapshot: &Snapshot) -> PersistResult<()> {
        self.saved = Some(snapshot.clone());
        self.save_count += 1;
        Ok(())
    }

    fn describe(&self) -> &'static str {
        "memory"
    }
}
