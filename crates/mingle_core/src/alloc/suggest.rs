//! Weighted partition over an explicit candidate list.
//!
//! # Responsibility
//! - Split a chosen subset of participants into groups of four (plus
//!   remainder fix-ups), spreading over-paired people apart.
//!
//! # Invariants
//! - Candidates are distributed in ascending order of history overlap with
//!   the rest of the candidate pool; randomness only breaks ties between
//!   equal weights (shuffle before a stable sort).
//! - Fewer than three candidates yields an empty result.
//! - Only pairing history feeds the weights; affiliations are not consulted.

use crate::alloc::MIN_GROUP_SIZE;
use crate::ledger::PairingLedger;
use crate::model::participant::ParticipantId;
use rand::seq::SliceRandom;
use rand::Rng;

/// Base group size for the weighted partition.
const BASE_GROUP_SIZE: usize = 4;

/// Partitions `candidates` into groups of four with remainder fix-ups,
/// using pairing history to spread frequently-paired people apart.
///
/// The weight of a candidate is the fraction of their recorded pairings
/// spent with people who are also in the candidate pool; low-weight
/// (least-seen-together) candidates are distributed first.
pub fn suggest_groups<R: Rng + ?Sized>(
    candidates: &[ParticipantId],
    ledger: &PairingLedger,
    rng: &mut R,
) -> Vec<Vec<ParticipantId>> {
    if candidates.len() < MIN_GROUP_SIZE {
        return Vec::new();
    }

    let mut pool: Vec<ParticipantId> = candidates.to_vec();
    pool.shuffle(rng);

    let mut weighted: Vec<(ParticipantId, f64)> = pool
        .into_iter()
        .map(|id| (id, pool_overlap_weight(id, candidates, ledger)))
        .collect();
    // Stable sort preserves the shuffled order within equal weights.
    weighted.sort_by(|a, b| a.1.total_cmp(&b.1));
    let sorted: Vec<ParticipantId> = weighted.into_iter().map(|(id, _)| id).collect();

    partition_round_robin(&sorted)
}

/// Fraction of this candidate's pairing history spent with other members of
/// the candidate pool. Zero when they have no recorded pairings at all.
fn pool_overlap_weight(
    id: ParticipantId,
    candidates: &[ParticipantId],
    ledger: &PairingLedger,
) -> f64 {
    let total = ledger.total_pairings(id);
    if total == 0 {
        return 0.0;
    }
    let in_pool: u32 = candidates
        .iter()
        .filter(|other| **other != id)
        .map(|other| ledger.pairing_weight(id, *other))
        .sum();
    f64::from(in_pool) / f64::from(total)
}

/// Round-robin assignment into `n / 4` base groups, then remainder fix-ups:
/// one leftover joins the last group, two leftovers pull one member back
/// from the last base group to form a trailing group of three, three
/// leftovers form a trailing group directly.
fn partition_round_robin(sorted: &[ParticipantId]) -> Vec<Vec<ParticipantId>> {
    let n = sorted.len();
    let base_groups = n / BASE_GROUP_SIZE;
    if base_groups == 0 {
        // Exactly three candidates: one group.
        return vec![sorted.to_vec()];
    }

    let mut groups: Vec<Vec<ParticipantId>> =
        vec![Vec::with_capacity(BASE_GROUP_SIZE + 1); base_groups];
    let assigned = base_groups * BASE_GROUP_SIZE;
    for (i, id) in sorted[..assigned].iter().enumerate() {
        groups[i % base_groups].push(*id);
    }

    let leftovers = &sorted[assigned..];
    match leftovers.len() {
        0 => {}
        1 => {
            if let Some(last) = groups.last_mut() {
                last.push(leftovers[0]);
            }
        }
        2 => {
            let mut trailing = Vec::with_capacity(MIN_GROUP_SIZE);
            if let Some(pulled) = groups.last_mut().and_then(Vec::pop) {
                trailing.push(pulled);
            }
            trailing.extend_from_slice(leftovers);
            groups.push(trailing);
        }
        _ => groups.push(leftovers.to_vec()),
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::partition_round_robin;
    use uuid::Uuid;

    fn ids(n: usize) -> Vec<Uuid> {
        (0..n).map(|_| Uuid::new_v4()).collect()
    }

    #[test]
    fn three_candidates_form_one_group() {
        let sorted = ids(3);
        let groups = partition_round_robin(&sorted);
        assert_eq!(groups, vec![sorted]);
    }

    #[test]
    fn remainder_zero_gives_even_fours() {
        let groups = partition_round_robin(&ids(8));
        assert_eq!(groups.len(), 2);
        assert!(groups.iter().all(|g| g.len() == 4));
    }

    #[test]
    fn remainder_one_extends_last_group() {
        let groups = partition_round_robin(&ids(9));
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].len(), 4);
        assert_eq!(groups[1].len(), 5);
    }

    #[test]
    fn remainder_two_pulls_one_back_for_a_trailing_three() {
        let sorted = ids(10);
        let groups = partition_round_robin(&sorted);
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].len(), 4);
        assert_eq!(groups[1].len(), 3);
        assert_eq!(groups[2].len(), 3);
        // The pulled member is the last round-robin assignee of group 1.
        assert_eq!(groups[2][0], sorted[7]);
        assert_eq!(&groups[2][1..], &sorted[8..]);
    }

    #[test]
    fn remainder_three_forms_trailing_group_directly() {
        let groups = partition_round_robin(&ids(7));
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].len(), 4);
        assert_eq!(groups[1].len(), 3);
    }
}
