//! Group allocation algorithms.
//!
//! # Responsibility
//! - Partition participants into discussion groups.
//! - Keep all randomness injected so allocation stays reproducible in tests.
//!
//! # Invariants
//! - Both algorithms take `&mut impl Rng`; nothing here touches a global
//!   random source.
//! - No produced group is smaller than [`MIN_GROUP_SIZE`] except on
//!   degenerate input (fewer than three people overall).

pub mod shuffle;
pub mod suggest;

/// Smallest group either algorithm will emit for non-degenerate input.
pub const MIN_GROUP_SIZE: usize = 3;
