use chrono::NaiveDate;
use mingle_core::{
    MemoryStore, Meeting, Participant, ParticipantId, Scheduler, Snapshot, SnapshotStore,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 5, day).unwrap()
}

fn scheduler_with(names: &[&str]) -> (Scheduler<MemoryStore>, Vec<ParticipantId>) {
    let mut scheduler = Scheduler::load(MemoryStore::new()).unwrap();
    let mut ids = Vec::new();
    for name in names {
        let participant = Participant::new(*name);
        ids.push(participant.id);
        assert!(scheduler.add_participant(participant).unwrap());
    }
    (scheduler, ids)
}

#[test]
fn add_participant_rejects_duplicate_name() {
    let (mut scheduler, _) = scheduler_with(&["Ada"]);
    assert!(!scheduler.add_participant(Participant::new("Ada")).unwrap());
    assert_eq!(scheduler.participants().len(), 1);
}

#[test]
fn update_participant_keeps_stable_id_and_registers_affiliations() {
    let (mut scheduler, ids) = scheduler_with(&["Ada"]);

    let mut updated = Participant::new("Ada Lovelace");
    updated.add_affiliation("Mathematics");
    assert!(scheduler.update_participant(ids[0], updated).unwrap());

    let stored = scheduler.participant(ids[0]).unwrap();
    assert_eq!(stored.name, "Ada Lovelace");
    assert_eq!(stored.id, ids[0]);
    assert!(scheduler.affiliations().contains("Mathematics"));
}

#[test]
fn update_participant_rejects_name_collision_and_unknown_id() {
    let (mut scheduler, ids) = scheduler_with(&["Ada", "Grace"]);
    assert!(!scheduler
        .update_participant(ids[1], Participant::new("Ada"))
        .unwrap());
    assert!(!scheduler
        .update_participant(ParticipantId::new_v4(), Participant::new("Alan"))
        .unwrap());
}

#[test]
fn remove_participant_reports_not_found() {
    let (mut scheduler, ids) = scheduler_with(&["Ada"]);
    assert!(scheduler.remove_participant(ids[0]).unwrap());
    assert!(!scheduler.remove_participant(ids[0]).unwrap());
}

#[test]
fn remove_all_participants_clears_meetings_too() {
    let (mut scheduler, ids) = scheduler_with(&["Ada", "Grace", "Alan"]);
    scheduler
        .create_meeting(vec![ids.clone()], date(1), None)
        .unwrap();
    scheduler.remove_all_participants().unwrap();
    assert!(scheduler.participants().is_empty());
    assert!(scheduler.meetings().is_empty());
}

#[test]
fn serials_increase_and_are_never_reused_after_deletion() {
    let (mut scheduler, ids) = scheduler_with(&["Ada", "Grace", "Alan"]);
    let first = scheduler
        .create_meeting(vec![ids.clone()], date(1), None)
        .unwrap();
    let second = scheduler
        .create_meeting(vec![ids.clone()], date(2), None)
        .unwrap();
    assert_eq!(second, first + 1);

    assert!(scheduler.delete_meeting(1).unwrap());
    let third = scheduler
        .create_meeting(vec![ids.clone()], date(3), None)
        .unwrap();
    assert_eq!(third, second + 1);
}

#[test]
fn derived_ledger_tracks_create_delete_and_edit() {
    let (mut scheduler, ids) = scheduler_with(&["Ada", "Grace", "Alan", "Joan"]);
    scheduler
        .create_meeting(vec![vec![ids[0], ids[1]], vec![ids[2], ids[3]]], date(1), None)
        .unwrap();

    let ledger = scheduler.ledger();
    assert_eq!(ledger.pairing_weight(ids[0], ids[1]), 1);
    assert_eq!(ledger.pairing_weight(ids[0], ids[2]), 0);

    // Editing replaces the old grouping entirely; no additive double count.
    assert!(scheduler
        .update_meeting_groups(0, vec![vec![ids[0], ids[2]], vec![ids[1], ids[3]]])
        .unwrap());
    let ledger = scheduler.ledger();
    assert_eq!(ledger.pairing_weight(ids[0], ids[1]), 0);
    assert_eq!(ledger.pairing_weight(ids[0], ids[2]), 1);

    assert!(scheduler.delete_meeting(0).unwrap());
    let ledger = scheduler.ledger();
    assert_eq!(ledger.pairing_weight(ids[0], ids[2]), 0);
    assert_eq!(ledger.meetings_attended(ids[0]), 0);
}

#[test]
fn deleting_a_meeting_decrements_attendance_exactly_once() {
    let (mut scheduler, ids) = scheduler_with(&["Ada", "Grace", "Alan"]);
    scheduler
        .create_meeting(vec![ids.clone()], date(1), None)
        .unwrap();
    scheduler
        .create_meeting(vec![ids.clone()], date(2), None)
        .unwrap();
    assert_eq!(scheduler.ledger().meetings_attended(ids[0]), 2);

    assert!(scheduler.delete_meeting(0).unwrap());
    assert_eq!(scheduler.ledger().meetings_attended(ids[0]), 1);

    // A second delete of the same index removes the remaining meeting;
    // attendance bottoms out at zero and cannot go negative.
    assert!(scheduler.delete_meeting(0).unwrap());
    assert!(!scheduler.delete_meeting(0).unwrap());
    assert_eq!(scheduler.ledger().meetings_attended(ids[0]), 0);
}

#[test]
fn meeting_operations_report_out_of_range_as_false() {
    let (mut scheduler, _) = scheduler_with(&["Ada"]);
    assert!(!scheduler.update_meeting_date(0, date(1)).unwrap());
    assert!(!scheduler.update_meeting_groups(0, Vec::new()).unwrap());
    assert!(!scheduler.delete_meeting(0).unwrap());
    assert!(scheduler.meeting_label(0).is_none());
}

#[test]
fn renumber_meetings_assigns_sequential_display_numbers() {
    let (mut scheduler, ids) = scheduler_with(&["Ada", "Grace", "Alan"]);
    for day in 1..=3 {
        scheduler
            .create_meeting(vec![ids.clone()], date(day), Some(day * 10))
            .unwrap();
    }
    scheduler.delete_meeting(0).unwrap();
    scheduler.renumber_meetings().unwrap();

    let numbers: Vec<u32> = scheduler
        .meetings()
        .iter()
        .map(|m| m.display_number)
        .collect();
    assert_eq!(numbers, vec![1, 2]);
    // Serials stay untouched by renumbering.
    let serials: Vec<u64> = scheduler.meetings().iter().map(|m| m.serial).collect();
    assert_eq!(serials, vec![2, 3]);
}

#[test]
fn meeting_label_uses_display_number_and_long_date() {
    let (mut scheduler, ids) = scheduler_with(&["Ada", "Grace", "Alan"]);
    scheduler
        .create_meeting(vec![ids.clone()], date(14), Some(2))
        .unwrap();
    assert_eq!(
        scheduler.meeting_label(0).unwrap(),
        "Meeting 2 - 14 May 2026"
    );
}

#[test]
fn participation_and_pairing_stats_resolve_names() {
    let (mut scheduler, ids) = scheduler_with(&["Ada", "Grace", "Alan"]);
    scheduler
        .create_meeting(vec![vec![ids[0], ids[1]]], date(1), None)
        .unwrap();

    let participation = scheduler.participation_stats();
    assert_eq!(participation["Ada"], 1);
    assert_eq!(participation["Grace"], 1);
    assert_eq!(participation["Alan"], 0);

    let pairing = scheduler.pairing_stats(ids[0]);
    assert_eq!(pairing["Grace"], 1);
    assert!(!pairing.contains_key("Alan"));
}

#[test]
fn pairing_stats_omit_removed_partners() {
    let (mut scheduler, ids) = scheduler_with(&["Ada", "Grace"]);
    scheduler
        .create_meeting(vec![vec![ids[0], ids[1]]], date(1), None)
        .unwrap();
    scheduler.remove_participant(ids[1]).unwrap();
    assert!(scheduler.pairing_stats(ids[0]).is_empty());
}

#[test]
fn register_affiliation_reports_newly_added() {
    let (mut scheduler, _) = scheduler_with(&[]);
    assert!(scheduler.register_affiliation("Board").unwrap());
    assert!(!scheduler.register_affiliation("Board").unwrap());
    assert!(!scheduler.register_affiliation("  ").unwrap());
}

#[test]
fn load_assigns_display_numbers_to_unnumbered_meetings() {
    let meetings = vec![
        Meeting {
            serial: 1,
            display_number: 0,
            date: date(1),
            groups: Vec::new(),
        },
        Meeting {
            serial: 2,
            display_number: 7,
            date: date(2),
            groups: Vec::new(),
        },
    ];
    let snapshot = Snapshot {
        meetings,
        last_serial: 2,
        ..Snapshot::default()
    };
    let scheduler = Scheduler::load(MemoryStore::with_snapshot(snapshot)).unwrap();
    assert_eq!(scheduler.meetings()[0].display_number, 1);
    assert_eq!(scheduler.meetings()[1].display_number, 7);
}

#[test]
fn load_restores_a_seeded_snapshot() {
    let participant = Participant::new("Ada");
    let id = participant.id;
    let snapshot = Snapshot {
        participants: vec![participant],
        affiliations: vec!["Board".to_string()],
        last_serial: 4,
        history_metadata: [("source".to_string(), "seed".to_string())].into(),
        ..Snapshot::default()
    };

    let scheduler = Scheduler::load(MemoryStore::with_snapshot(snapshot)).unwrap();
    assert_eq!(scheduler.participant(id).unwrap().name, "Ada");
    assert!(scheduler.affiliations().contains("Board"));
    assert_eq!(scheduler.history_metadata()["source"], "seed");
}

#[test]
fn scheduler_allocation_wrappers_use_roster_and_ledger() {
    let (mut scheduler, ids) = scheduler_with(&["A", "B", "C", "D", "E", "F", "G"]);
    let mut rng = ChaCha8Rng::seed_from_u64(5);

    let outcome = scheduler.shuffle_groups(4, &mut rng);
    let total: usize = outcome.groups.iter().map(Vec::len).sum();
    assert_eq!(total, 7);

    scheduler
        .create_meeting(outcome.groups.clone(), date(1), None)
        .unwrap();
    let suggested = scheduler.suggest_groups(&ids, &mut rng);
    let total: usize = suggested.iter().map(Vec::len).sum();
    assert_eq!(total, 7);
}

#[test]
fn memory_store_round_trips_snapshots() {
    let store = MemoryStore::new();
    assert!(store.load().unwrap().is_none());
    let snapshot = Snapshot {
        last_serial: 9,
        ..Snapshot::default()
    };
    store.save(&snapshot).unwrap();
    assert_eq!(store.load().unwrap().unwrap().last_serial, 9);
}
