//! Append-only registry of known affiliation labels.
//!
//! # Responsibility
//! - Track the universe of free-text affiliation labels.
//! - Report whether a registration actually added a new label.
//!
//! # Invariants
//! - Labels are trimmed before registration; blank labels are rejected.
//! - The registry only grows. There is no removal path.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The set of affiliation labels seen so far.
///
/// New labels are added implicitly whenever a participant declares one, and
/// explicitly by callers offering a label picker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffiliationRegistry {
    labels: BTreeSet<String>,
}

impl AffiliationRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from persisted labels.
    pub fn from_labels<I, T>(labels: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let mut registry = Self::new();
        for label in labels {
            registry.register(label.into());
        }
        registry
    }

    /// Registers a label, returning `true` when it was newly added.
    ///
    /// Blank or whitespace-only labels are ignored and return `false`.
    pub fn register(&mut self, label: impl AsRef<str>) -> bool {
        let trimmed = label.as_ref().trim();
        if trimmed.is_empty() {
            return false;
        }
        self.labels.insert(trimmed.to_string())
    }

    /// Whether the label is already known.
    pub fn contains(&self, label: &str) -> bool {
        self.labels.contains(label.trim())
    }

    /// Known labels in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    /// Number of known labels.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether no label has been registered yet.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::AffiliationRegistry;

    #[test]
    fn register_reports_newly_added() {
        let mut registry = AffiliationRegistry::new();
        assert!(registry.register("Board"));
        assert!(!registry.register("Board"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn register_trims_and_rejects_blank() {
        let mut registry = AffiliationRegistry::new();
        assert!(registry.register("  Finance  "));
        assert!(registry.contains("Finance"));
        assert!(!registry.register("   "));
        assert!(!registry.register(""));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn iter_is_sorted() {
        let registry = AffiliationRegistry::from_labels(["Sales", "Board", "Finance"]);
        let labels: Vec<_> = registry.iter().collect();
        assert_eq!(labels, vec!["Board", "Finance", "Sales"]);
    }
}
