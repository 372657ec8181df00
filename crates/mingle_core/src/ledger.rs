//! Pairing history derived from the meeting log.
//!
//! # Responsibility
//! - Count how often each pair of participants has shared a group.
//! - Track per-participant pairing totals and meetings attended.
//!
//! # Invariants
//! - Pair counts are symmetric: `pairing_weight(a, b) == pairing_weight(b, a)`.
//! - Self-pairs are never counted.
//! - The ledger is derived state: it is rebuilt by replaying the meeting log,
//!   so deleting or editing a meeting can never leave stale counts behind.

use crate::model::meeting::Meeting;
use crate::model::participant::ParticipantId;
use std::collections::HashMap;

/// Normalized unordered pair key. Construction orders the two IDs so each
/// pair has exactly one representation in the count map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct PairKey(ParticipantId, ParticipantId);

impl PairKey {
    /// Returns `None` for self-pairs, which are excluded by contract.
    fn new(a: ParticipantId, b: ParticipantId) -> Option<Self> {
        if a == b {
            return None;
        }
        if a < b {
            Some(Self(a, b))
        } else {
            Some(Self(b, a))
        }
    }
}

/// Derived pairing-history counters for a meeting log.
#[derive(Debug, Clone, Default)]
pub struct PairingLedger {
    pair_counts: HashMap<PairKey, u32>,
    total_pairings: HashMap<ParticipantId, u32>,
    meetings_attended: HashMap<ParticipantId, u32>,
}

impl PairingLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the ledger by replaying every meeting in the log.
    pub fn replay(meetings: &[Meeting]) -> Self {
        let mut ledger = Self::new();
        for meeting in meetings {
            ledger.record_meeting(meeting);
        }
        ledger
    }

    /// Records one group: every unordered pair within it gains one shared
    /// meeting. Unknown IDs are counted like any other; callers that care
    /// about roster membership filter upstream.
    pub fn record_grouping(&mut self, group: &[ParticipantId]) {
        for (i, a) in group.iter().enumerate() {
            for b in group.iter().skip(i + 1) {
                let Some(key) = PairKey::new(*a, *b) else {
                    continue;
                };
                *self.pair_counts.entry(key).or_insert(0) += 1;
                *self.total_pairings.entry(*a).or_insert(0) += 1;
                *self.total_pairings.entry(*b).or_insert(0) += 1;
            }
        }
    }

    /// Records a full meeting: each group's pairings plus one attendance
    /// per distinct participant.
    pub fn record_meeting(&mut self, meeting: &Meeting) {
        for group in &meeting.groups {
            self.record_grouping(group);
        }
        for id in meeting.attendees() {
            *self.meetings_attended.entry(id).or_insert(0) += 1;
        }
    }

    /// Number of meetings in which `a` and `b` shared a group. Zero for
    /// participants who never met, and for self-pairs.
    pub fn pairing_weight(&self, a: ParticipantId, b: ParticipantId) -> u32 {
        PairKey::new(a, b)
            .and_then(|key| self.pair_counts.get(&key))
            .copied()
            .unwrap_or(0)
    }

    /// Sum of this participant's pairing counts over all partners.
    pub fn total_pairings(&self, id: ParticipantId) -> u32 {
        self.total_pairings.get(&id).copied().unwrap_or(0)
    }

    /// Number of meetings this participant appeared in.
    pub fn meetings_attended(&self, id: ParticipantId) -> u32 {
        self.meetings_attended.get(&id).copied().unwrap_or(0)
    }

    /// Pair counts involving `id`, as (partner, count) pairs in arbitrary
    /// order. Used by stats views.
    pub fn pair_counts_for(
        &self,
        id: ParticipantId,
    ) -> impl Iterator<Item = (ParticipantId, u32)> + '_ {
        self.pair_counts.iter().filter_map(move |(key, count)| {
            if key.0 == id {
                Some((key.1, *count))
            } else if key.1 == id {
                Some((key.0, *count))
            } else {
                None
            }
        })
    }
}
