//! Participant domain model.
//!
//! # Responsibility
//! - Define the canonical participant record used by roster and allocation.
//! - Provide the effective-affiliation view used as a conflict signal.
//!
//! # Invariants
//! - `id` is stable and never reused for another participant.
//! - Group membership and pairing history are keyed by `id`, never by name;
//!   the display name is resolved only at presentation time.
//! - A participant with no declared affiliation still contributes the
//!   `UNASSIGNED_AFFILIATION` sentinel to conflict calculations.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

/// Stable identifier for a participant.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type ParticipantId = Uuid;

/// Sentinel affiliation label for participants with no declared affiliation.
///
/// Ensures every participant contributes at least one label to footprint
/// intersection counts, so "no affiliation" people still spread apart.
pub const UNASSIGNED_AFFILIATION: &str = "unassigned";

/// Canonical record for one recurring participant.
///
/// Contact fields are carried for import/export round-trips; only `name`
/// and `affiliations` participate in allocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Stable global ID used for group membership and pairing history.
    pub id: ParticipantId,
    /// Display name, unique within the roster.
    pub name: String,
    /// Declared affiliation labels. May be empty; see
    /// [`Participant::effective_affiliations`].
    pub affiliations: BTreeSet<String>,
    /// Contact email, if known.
    pub email: Option<String>,
    /// Organization the participant represents.
    pub organization: Option<String>,
    /// Job role or title.
    pub role: Option<String>,
    /// Industry sector.
    pub sector: Option<String>,
}

impl Participant {
    /// Creates a participant with a generated stable ID and no affiliations.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), name)
    }

    /// Creates a participant with a caller-provided stable ID.
    ///
    /// Used by import paths where identity already exists externally.
    pub fn with_id(id: ParticipantId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            affiliations: BTreeSet::new(),
            email: None,
            organization: None,
            role: None,
            sector: None,
        }
    }

    /// Adds one affiliation label. Blank labels are ignored.
    pub fn add_affiliation(&mut self, label: impl Into<String>) {
        let label = label.into();
        let trimmed = label.trim();
        if !trimmed.is_empty() {
            self.affiliations.insert(trimmed.to_string());
        }
    }

    /// Returns the affiliation set used for conflict calculations.
    ///
    /// Falls back to the `UNASSIGNED_AFFILIATION` sentinel when the
    /// participant declared nothing.
    pub fn effective_affiliations(&self) -> BTreeSet<String> {
        if self.affiliations.is_empty() {
            let mut set = BTreeSet::new();
            set.insert(UNASSIGNED_AFFILIATION.to_string());
            set
        } else {
            self.affiliations.clone()
        }
    }

    /// Affiliation labels joined for tabular presentation.
    pub fn affiliations_joined(&self) -> String {
        if self.affiliations.is_empty() {
            UNASSIGNED_AFFILIATION.to_string()
        } else {
            self.affiliations
                .iter()
                .cloned()
                .collect::<Vec<_>>()
                .join(", ")
        }
    }
}
