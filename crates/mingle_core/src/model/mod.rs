//! Domain model for the grouping engine.
//!
//! # Responsibility
//! - Define the canonical participant and meeting records.
//! - Keep every cross-reference keyed by stable opaque IDs.
//!
//! # Invariants
//! - Every participant is identified by a stable `ParticipantId`.
//! - A meeting `serial` is assigned once and never reused.

pub mod meeting;
pub mod participant;
