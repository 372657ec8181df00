//! Scheduler: roster registry plus meeting log behind one coordinator.
//!
//! # Responsibility
//! - Own the process-wide state: roster, meeting log, affiliation registry,
//!   serial counter and opaque history metadata.
//! - Persist the full snapshot after every mutation.
//! - Expose allocation entry points and derived statistics.
//!
//! # Invariants
//! - Exactly one caller at a time; there is no internal locking.
//! - Store failures propagate; not-found conditions are reported as
//!   `Ok(false)` or `None`, never as errors.
//! - Participant names stay unique within the roster.
//! - Pairing history and attendance are derived from the meeting log on
//!   demand; no mutation path updates them directly.

use crate::affiliation::AffiliationRegistry;
use crate::alloc::shuffle::{shuffle_groups, ShuffleOutcome};
use crate::alloc::suggest::suggest_groups;
use crate::ledger::PairingLedger;
use crate::model::meeting::{Meeting, MeetingSerial};
use crate::model::participant::{Participant, ParticipantId};
use crate::store::{Snapshot, SnapshotStore, StoreResult};
use chrono::NaiveDate;
use log::info;
use rand::Rng;
use std::collections::BTreeMap;

/// Coordinating object owning all scheduler state.
///
/// Generic over the snapshot store so tests and embedders can swap the
/// JSON-file persistence for an in-memory one.
pub struct Scheduler<S: SnapshotStore> {
    store: S,
    participants: Vec<Participant>,
    meetings: Vec<Meeting>,
    affiliations: AffiliationRegistry,
    last_serial: MeetingSerial,
    history_metadata: BTreeMap<String, String>,
}

impl<S: SnapshotStore> Scheduler<S> {
    /// Loads scheduler state from the store, starting empty when the store
    /// holds no snapshot yet.
    ///
    /// Meetings persisted without a display number (older snapshots) get
    /// sequential numbers assigned in stored order.
    pub fn load(store: S) -> StoreResult<Self> {
        let snapshot = store.load()?.unwrap_or_default();
        let mut scheduler = Self {
            store,
            participants: snapshot.participants,
            meetings: snapshot.meetings,
            affiliations: AffiliationRegistry::from_labels(snapshot.affiliations),
            last_serial: snapshot.last_serial,
            history_metadata: snapshot.history_metadata,
        };
        scheduler.ensure_display_numbers();
        Ok(scheduler)
    }

    fn ensure_display_numbers(&mut self) {
        for (index, meeting) in self.meetings.iter_mut().enumerate() {
            if meeting.display_number == 0 {
                meeting.display_number = index as u32 + 1;
            }
        }
    }

    fn persist(&self) -> StoreResult<()> {
        let snapshot = Snapshot {
            participants: self.participants.clone(),
            meetings: self.meetings.clone(),
            affiliations: self.affiliations.iter().map(str::to_string).collect(),
            last_serial: self.last_serial,
            history_metadata: self.history_metadata.clone(),
        };
        self.store.save(&snapshot)
    }

    // ---- roster ----

    /// Adds a participant, registering their affiliations.
    ///
    /// Returns `Ok(false)` without persisting when the name already exists;
    /// names are the presentation join key and must stay unambiguous.
    pub fn add_participant(&mut self, participant: Participant) -> StoreResult<bool> {
        if self.participant_by_name(&participant.name).is_some() {
            return Ok(false);
        }
        for label in &participant.affiliations {
            self.affiliations.register(label);
        }
        self.participants.push(participant);
        self.persist()?;
        Ok(true)
    }

    /// Replaces the record for `id`, keeping the stable ID itself.
    ///
    /// Returns `Ok(false)` when the ID is unknown or the new name collides
    /// with a different participant.
    pub fn update_participant(
        &mut self,
        id: ParticipantId,
        mut participant: Participant,
    ) -> StoreResult<bool> {
        let name_taken = self
            .participants
            .iter()
            .any(|p| p.id != id && p.name == participant.name);
        if name_taken {
            return Ok(false);
        }
        let Some(slot) = self.participants.iter_mut().find(|p| p.id == id) else {
            return Ok(false);
        };
        participant.id = id;
        let labels: Vec<String> = participant.affiliations.iter().cloned().collect();
        *slot = participant;
        for label in labels {
            self.affiliations.register(label);
        }
        self.persist()?;
        Ok(true)
    }

    /// Removes a participant. Past meetings keep their ID in group
    /// snapshots; exports simply stop resolving it.
    pub fn remove_participant(&mut self, id: ParticipantId) -> StoreResult<bool> {
        let before = self.participants.len();
        self.participants.retain(|p| p.id != id);
        if self.participants.len() == before {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    /// Clears the roster and the meeting log together.
    pub fn remove_all_participants(&mut self) -> StoreResult<()> {
        self.participants.clear();
        self.meetings.clear();
        self.persist()
    }

    /// The current roster in insertion order.
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    /// Looks up a participant by stable ID.
    pub fn participant(&self, id: ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == id)
    }

    /// Looks up a participant by display name (exact match).
    pub fn participant_by_name(&self, name: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.name == name)
    }

    /// Resolves an ID to its display name, if the participant still exists.
    pub fn resolve_name(&self, id: ParticipantId) -> Option<&str> {
        self.participant(id).map(|p| p.name.as_str())
    }

    // ---- affiliations ----

    /// Registers an affiliation label, persisting only when newly added.
    pub fn register_affiliation(&mut self, label: &str) -> StoreResult<bool> {
        if !self.affiliations.register(label) {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    /// The append-only affiliation registry.
    pub fn affiliations(&self) -> &AffiliationRegistry {
        &self.affiliations
    }

    // ---- meeting log ----

    /// Records a meeting, assigning the next serial.
    ///
    /// `display_number` defaults to the serial. Group membership is
    /// snapshotted by ID as given; pairing history needs no explicit update
    /// because it is derived from the log.
    pub fn create_meeting(
        &mut self,
        groups: Vec<Vec<ParticipantId>>,
        date: NaiveDate,
        display_number: Option<u32>,
    ) -> StoreResult<MeetingSerial> {
        self.last_serial += 1;
        let serial = self.last_serial;
        let display_number =
            display_number.unwrap_or_else(|| u32::try_from(serial).unwrap_or(u32::MAX));
        let meeting = Meeting {
            serial,
            display_number,
            date,
            groups,
        };
        info!(
            "event=meeting_created module=scheduler status=ok serial={} groups={} date={}",
            serial,
            meeting.groups.len(),
            meeting.date
        );
        self.meetings.push(meeting);
        self.persist()?;
        Ok(serial)
    }

    /// The meeting log in stored order.
    pub fn meetings(&self) -> &[Meeting] {
        &self.meetings
    }

    /// Presentation label for the meeting at `index`.
    pub fn meeting_label(&self, index: usize) -> Option<String> {
        self.meetings.get(index).map(Meeting::label)
    }

    /// Changes a meeting's date. `Ok(false)` when the index is out of range.
    pub fn update_meeting_date(&mut self, index: usize, date: NaiveDate) -> StoreResult<bool> {
        let Some(meeting) = self.meetings.get_mut(index) else {
            return Ok(false);
        };
        meeting.date = date;
        self.persist()?;
        Ok(true)
    }

    /// Replaces a meeting's groups. Derived pairing history reflects only
    /// the new grouping after this call.
    pub fn update_meeting_groups(
        &mut self,
        index: usize,
        groups: Vec<Vec<ParticipantId>>,
    ) -> StoreResult<bool> {
        let Some(meeting) = self.meetings.get_mut(index) else {
            return Ok(false);
        };
        meeting.groups = groups;
        self.persist()?;
        Ok(true)
    }

    /// Deletes the meeting at `index`. Attendance and pairing statistics
    /// adjust automatically since they replay the remaining log.
    pub fn delete_meeting(&mut self, index: usize) -> StoreResult<bool> {
        if index >= self.meetings.len() {
            return Ok(false);
        }
        let removed = self.meetings.remove(index);
        info!(
            "event=meeting_deleted module=scheduler status=ok serial={}",
            removed.serial
        );
        self.persist()?;
        Ok(true)
    }

    /// Reassigns display numbers 1..N in stored order. Serials are untouched.
    pub fn renumber_meetings(&mut self) -> StoreResult<()> {
        for (index, meeting) in self.meetings.iter_mut().enumerate() {
            meeting.display_number = index as u32 + 1;
        }
        self.persist()
    }

    // ---- derived views ----

    /// Pairing history rebuilt from the current meeting log.
    pub fn ledger(&self) -> PairingLedger {
        PairingLedger::replay(&self.meetings)
    }

    /// Meetings attended per participant, keyed by display name.
    pub fn participation_stats(&self) -> BTreeMap<String, u32> {
        let ledger = self.ledger();
        self.participants
            .iter()
            .map(|p| (p.name.clone(), ledger.meetings_attended(p.id)))
            .collect()
    }

    /// Pairing counts for one participant, keyed by partner display name.
    /// Partners no longer in the roster are omitted.
    pub fn pairing_stats(&self, id: ParticipantId) -> BTreeMap<String, u32> {
        let ledger = self.ledger();
        ledger
            .pair_counts_for(id)
            .filter_map(|(partner, count)| {
                self.resolve_name(partner)
                    .map(|name| (name.to_string(), count))
            })
            .collect()
    }

    // ---- allocation ----

    /// Affiliation-balanced greedy packing over the whole roster.
    pub fn shuffle_groups<R: Rng + ?Sized>(
        &self,
        group_size: usize,
        rng: &mut R,
    ) -> ShuffleOutcome {
        shuffle_groups(&self.participants, group_size, rng)
    }

    /// Weighted partition over an explicit candidate list, using the
    /// derived pairing ledger.
    pub fn suggest_groups<R: Rng + ?Sized>(
        &self,
        candidates: &[ParticipantId],
        rng: &mut R,
    ) -> Vec<Vec<ParticipantId>> {
        suggest_groups(candidates, &self.ledger(), rng)
    }

    // ---- metadata ----

    /// Opaque caller-owned metadata carried through persistence.
    pub fn history_metadata(&self) -> &BTreeMap<String, String> {
        &self.history_metadata
    }

    /// Sets one metadata entry and persists.
    pub fn set_history_metadata(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> StoreResult<()> {
        self.history_metadata.insert(key.into(), value.into());
        self.persist()
    }
}
