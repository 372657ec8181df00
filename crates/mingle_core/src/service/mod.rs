//! Use-case services coordinating the domain model.
//!
//! # Responsibility
//! - Expose the stable entry points UI callers invoke.
//! - Keep the service layer storage-agnostic behind the snapshot-store seam.

pub mod scheduler;
