//! Affiliation-balanced greedy packing.
//!
//! # Responsibility
//! - Partition the whole roster into groups of a target size, spreading
//!   affiliation labels apart.
//! - Place every participant; never leave anyone unassigned.
//!
//! # Invariants
//! - The shuffled traversal order is the only source of non-determinism;
//!   conflict ties are broken by that order, not arbitrarily.
//! - Every participant appears in exactly one output group.
//! - Groups may exceed the target size by at most one (trailing-merge case).

use crate::alloc::MIN_GROUP_SIZE;
use crate::model::participant::{Participant, ParticipantId};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeSet;

/// Result of one greedy packing run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShuffleOutcome {
    /// Ordered groups of participant IDs.
    pub groups: Vec<Vec<ParticipantId>>,
    /// Always zero: the trailing-group policy distributes everyone.
    pub unassigned: usize,
}

/// Packs the roster into groups of roughly `group_size`, preferring members
/// whose affiliations overlap the least with the group built so far.
///
/// `group_size` below [`MIN_GROUP_SIZE`] is clamped up. An empty roster
/// yields no groups. Rosters smaller than [`MIN_GROUP_SIZE`] degenerate to
/// a single undersized group rather than dropping anyone.
pub fn shuffle_groups<R: Rng + ?Sized>(
    roster: &[Participant],
    group_size: usize,
    rng: &mut R,
) -> ShuffleOutcome {
    let group_size = group_size.max(MIN_GROUP_SIZE);

    let mut pool: Vec<(ParticipantId, BTreeSet<String>)> = roster
        .iter()
        .map(|p| (p.id, p.effective_affiliations()))
        .collect();
    pool.shuffle(rng);

    let mut groups: Vec<Vec<ParticipantId>> = Vec::new();
    while !pool.is_empty() {
        let mut group: Vec<ParticipantId> = Vec::with_capacity(group_size);
        let mut footprint: BTreeSet<String> = BTreeSet::new();

        for _ in 0..group_size {
            if pool.is_empty() {
                break;
            }
            let best_index = least_conflicting(&pool, &footprint);
            let (id, affiliations) = pool.remove(best_index);
            group.push(id);
            footprint.extend(affiliations);
        }

        place_group(&mut groups, group, group_size);
    }

    ShuffleOutcome {
        groups,
        unassigned: 0,
    }
}

/// Index of the pool entry whose affiliations share the fewest labels with
/// the footprint. Strict `<` keeps the earliest entry on ties, so the
/// shuffled traversal order decides.
fn least_conflicting(
    pool: &[(ParticipantId, BTreeSet<String>)],
    footprint: &BTreeSet<String>,
) -> usize {
    let mut best_index = 0;
    let mut min_conflicts = usize::MAX;
    for (index, (_, affiliations)) in pool.iter().enumerate() {
        let conflicts = affiliations.intersection(footprint).count();
        if conflicts < min_conflicts {
            min_conflicts = conflicts;
            best_index = index;
        }
    }
    best_index
}

/// Trailing-group policy: keep full-enough groups, merge small remainders
/// into the previous group when that stays within `group_size + 1`, and
/// otherwise spread members over the currently-smallest groups.
fn place_group(groups: &mut Vec<Vec<ParticipantId>>, group: Vec<ParticipantId>, group_size: usize) {
    if group.len() >= MIN_GROUP_SIZE || groups.is_empty() {
        groups.push(group);
        return;
    }

    let fits_previous = groups
        .last()
        .is_some_and(|last| last.len() + group.len() <= group_size + 1);
    if fits_previous {
        if let Some(last) = groups.last_mut() {
            last.extend(group);
        }
        return;
    }

    for id in group {
        // min_by_key keeps the first of equal-length groups, so ties break
        // by group index order.
        if let Some(smallest) = groups.iter_mut().min_by_key(|g| g.len()) {
            smallest.push(id);
        }
    }
}
