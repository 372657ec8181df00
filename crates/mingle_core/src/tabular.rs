//! CSV roster import and meeting export.
//!
//! # Responsibility
//! - Import a roster from tabular rows with replace semantics.
//! - Export the meeting log as one row per (meeting, group, participant).
//!
//! # Invariants
//! - Import clears the existing roster and meeting log first.
//! - Malformed rows are skipped individually with a diagnostic; the import
//!   as a whole never aborts on row content.
//! - Export resolves IDs to names; rows for participants no longer in the
//!   roster are omitted.

use crate::model::meeting::MeetingSerial;
use crate::model::participant::Participant;
use crate::service::scheduler::Scheduler;
use crate::store::{SnapshotStore, StoreError};
use chrono::NaiveDate;
use log::info;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;

pub type TabularResult<T> = Result<T, TabularError>;

/// Import/export-layer error wrapping CSV and persistence failures.
#[derive(Debug)]
pub enum TabularError {
    Csv(csv::Error),
    Store(StoreError),
}

impl Display for TabularError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Csv(err) => write!(f, "csv failure: {err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TabularError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Csv(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<csv::Error> for TabularError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

impl From<StoreError> for TabularError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Outcome of a roster import: successes plus per-row skip diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportOutcome {
    /// Number of participants added.
    pub imported: usize,
    /// One human-readable diagnostic per skipped row.
    pub skipped: Vec<String>,
}

/// Recognized import columns, matched case-insensitively against the
/// header row. Only `name` is required per row.
#[derive(Debug, Clone, Copy, Default)]
struct ColumnMap {
    name: Option<usize>,
    affiliations: Option<usize>,
    email: Option<usize>,
    organization: Option<usize>,
    role: Option<usize>,
    sector: Option<usize>,
}

impl ColumnMap {
    fn from_headers(headers: &csv::StringRecord) -> Self {
        let mut map = Self::default();
        for (index, header) in headers.iter().enumerate() {
            match header.trim().to_ascii_lowercase().as_str() {
                "name" => map.name = Some(index),
                "affiliations" => map.affiliations = Some(index),
                "email" => map.email = Some(index),
                "organization" => map.organization = Some(index),
                "role" => map.role = Some(index),
                "sector" => map.sector = Some(index),
                _ => {}
            }
        }
        map
    }
}

/// Imports a roster from CSV, replacing the current roster and meeting log.
///
/// Rows without a usable name, rows duplicating an already-imported name,
/// and rows the CSV reader cannot parse are skipped with a diagnostic.
/// Persistence failures propagate.
pub fn import_roster<S: SnapshotStore, R: io::Read>(
    scheduler: &mut Scheduler<S>,
    reader: R,
) -> TabularResult<ImportOutcome> {
    let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let columns = ColumnMap::from_headers(csv_reader.headers()?);

    scheduler.remove_all_participants()?;

    let mut imported = 0usize;
    let mut skipped = Vec::new();

    // Header is row 1; the first data row reports as row 2.
    for (offset, record) in csv_reader.records().enumerate() {
        let row = offset + 2;
        let record = match record {
            Ok(record) => record,
            Err(err) => {
                skipped.push(format!("row {row}: unreadable record ({err})"));
                continue;
            }
        };

        let name = columns
            .name
            .and_then(|index| record.get(index))
            .map(str::trim)
            .unwrap_or_default();
        if name.is_empty() {
            skipped.push(format!("row {row}: missing name"));
            continue;
        }

        let mut participant = Participant::new(name);
        if let Some(labels) = field(&record, columns.affiliations) {
            for label in labels.split(',') {
                participant.add_affiliation(label);
            }
        }
        participant.email = field(&record, columns.email);
        participant.organization = field(&record, columns.organization);
        participant.role = field(&record, columns.role);
        participant.sector = field(&record, columns.sector);

        if scheduler.add_participant(participant)? {
            imported += 1;
        } else {
            skipped.push(format!("row {row}: duplicate name `{name}`"));
        }
    }

    info!(
        "event=roster_imported module=tabular status=ok imported={} skipped={}",
        imported,
        skipped.len()
    );

    Ok(ImportOutcome { imported, skipped })
}

fn field(record: &csv::StringRecord, index: Option<usize>) -> Option<String> {
    index
        .and_then(|i| record.get(i))
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// One export row: a participant's seat in one group of one meeting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MeetingRow {
    /// Meeting serial; the stable join key across exports.
    pub meeting_id: MeetingSerial,
    /// Presentation label of the meeting.
    pub meeting_name: String,
    /// Meeting date (ISO 8601 in CSV output).
    pub date: NaiveDate,
    /// Group label within the meeting, e.g. `Group 2`.
    pub group: String,
    /// Participant display name.
    pub participant: String,
    /// Affiliation labels joined by `, `.
    pub affiliations: String,
}

/// Flattens the meeting log into export rows, resolving IDs to names.
/// Seats held by IDs that no longer resolve are dropped.
pub fn meeting_rows<S: SnapshotStore>(scheduler: &Scheduler<S>) -> Vec<MeetingRow> {
    let mut rows = Vec::new();
    for meeting in scheduler.meetings() {
        for (group_index, group) in meeting.groups.iter().enumerate() {
            for id in group {
                let Some(participant) = scheduler.participant(*id) else {
                    continue;
                };
                rows.push(MeetingRow {
                    meeting_id: meeting.serial,
                    meeting_name: meeting.label(),
                    date: meeting.date,
                    group: format!("Group {}", group_index + 1),
                    participant: participant.name.clone(),
                    affiliations: participant.affiliations_joined(),
                });
            }
        }
    }
    rows
}

/// Writes the whole meeting log as CSV, one row per seat.
pub fn export_meetings<S: SnapshotStore, W: io::Write>(
    scheduler: &Scheduler<S>,
    writer: W,
) -> TabularResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in meeting_rows(scheduler) {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Writes one meeting as a contact sheet: group, name, email, organization,
/// affiliations. Returns `Ok(false)` when the index is out of range.
pub fn export_meeting<S: SnapshotStore, W: io::Write>(
    scheduler: &Scheduler<S>,
    index: usize,
    writer: W,
) -> TabularResult<bool> {
    let Some(meeting) = scheduler.meetings().get(index) else {
        return Ok(false);
    };

    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(["group", "name", "email", "organization", "affiliations"])?;
    for (group_index, group) in meeting.groups.iter().enumerate() {
        for id in group {
            let Some(participant) = scheduler.participant(*id) else {
                continue;
            };
            csv_writer.write_record([
                format!("Group {}", group_index + 1),
                participant.name.clone(),
                participant.email.clone().unwrap_or_default(),
                participant.organization.clone().unwrap_or_default(),
                participant.affiliations_joined(),
            ])?;
        }
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(true)
}
