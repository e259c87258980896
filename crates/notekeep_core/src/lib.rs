//! Core domain logic for NoteKeep.
//! This crate is the single source of truth for note and category invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod persist;
pub mod presentation;
pub mod search;
pub mod service;
pub mod store;

pub use config::{ConfigError, CoreConfig, StorageConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::category::{CategorySet, DEFAULT_CATEGORIES};
pub use model::note::{Note, NoteDraft, NoteId, NotePatch, UNCATEGORIZED};
pub use model::timestamp::Timestamp;
pub use persist::snapshot::Snapshot;
pub use persist::{
    JsonFileSnapshotStore, MemorySnapshotStore, PersistError, PersistResult, SnapshotStore,
    SqliteSnapshotStore,
};
pub use presentation::card::{build_cards, CardLayout, NoteCard};
pub use presentation::palette::{CategoryPalette, FALLBACK_COLOR};
pub use search::filter::{filter_notes, NoteFilter};
pub use service::note_service::{CategorySummary, NoteService, ServiceError};
pub use store::clock::{Clock, ManualClock, SystemClock};
pub use store::note_store::{CategoryRemoval, NoteStore};
pub use store::{StoreError, StoreResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
