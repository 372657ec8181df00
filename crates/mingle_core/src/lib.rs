//! Core grouping engine for recurring small-group meetings.
//! This crate is the single source of truth for allocation invariants.

pub mod affiliation;
pub mod alloc;
pub mod ledger;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;
pub mod tabular;

pub use affiliation::AffiliationRegistry;
pub use alloc::shuffle::{shuffle_groups, ShuffleOutcome};
pub use alloc::suggest::suggest_groups;
pub use alloc::MIN_GROUP_SIZE;
pub use ledger::PairingLedger;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::meeting::{Meeting, MeetingSerial};
pub use model::participant::{Participant, ParticipantId, UNASSIGNED_AFFILIATION};
pub use service::scheduler::Scheduler;
pub use store::{JsonFileStore, MemoryStore, Snapshot, SnapshotStore, StoreError, StoreResult};
pub use tabular::{
    export_meeting, export_meetings, import_roster, meeting_rows, ImportOutcome, MeetingRow,
    TabularError, TabularResult,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
