//! Meeting domain model.
//!
//! # Responsibility
//! - Define the stored record for one past meeting.
//! - Derive the presentation label from stored fields.
//!
//! # Invariants
//! - `serial` is assigned at creation, monotonically increasing, never
//!   reused, and immutable afterwards.
//! - `display_number` is mutable; renumbering reassigns 1..N in stored
//!   order.
//! - `groups` holds participant IDs, not names.

use crate::model::participant::ParticipantId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Immutable creation-order identifier for meetings.
pub type MeetingSerial = u64;

/// One past meeting: its grouping snapshot plus numbering metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meeting {
    /// Creation-order identifier, never reused even after deletions.
    pub serial: MeetingSerial,
    /// Human-facing number. May be rewritten by renumbering. Older
    /// snapshots lack the field; it decodes as 0 and load normalizes it.
    #[serde(default)]
    pub display_number: u32,
    /// Calendar date the meeting took place.
    pub date: NaiveDate,
    /// Ordered groups of participant IDs.
    pub groups: Vec<Vec<ParticipantId>>,
}

impl Meeting {
    /// Presentation label, e.g. `Meeting 3 - 14 March 2026`.
    ///
    /// Derived on demand; the label is a pure function of stored fields.
    pub fn label(&self) -> String {
        format!("Meeting {} - {}", self.display_number, self.formatted_date())
    }

    /// Long-form date used in labels and exports.
    pub fn formatted_date(&self) -> String {
        self.date.format("%-d %B %Y").to_string()
    }

    /// IDs of everyone who attended, in group order, without duplicates.
    pub fn attendees(&self) -> Vec<ParticipantId> {
        let mut seen = std::collections::HashSet::new();
        let mut out = Vec::new();
        for group in &self.groups {
            for id in group {
                if seen.insert(*id) {
                    out.push(*id);
                }
            }
        }
        out
    }
}
