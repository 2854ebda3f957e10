//! Merging dependency updates across change requests
//!
//! Each identifier ends up with one canonical record spanning the lowest
//! observed old version to the highest observed new version. The span does
//! not depend on the order records arrive in. The link comes from the first
//! record seen for an identifier, and identifiers keep first-seen order.

use crate::domain::DependencyUpdate;
use std::collections::HashMap;

/// Accumulates canonical dependency updates keyed by identifier
#[derive(Debug, Clone, Default)]
pub struct DependencyMerger {
    /// Canonical records in first-seen order
    updates: Vec<DependencyUpdate>,
    /// Identifier -> position in `updates`
    index: HashMap<String, usize>,
}

impl DependencyMerger {
    /// Create an empty merger
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one record into the canonical mapping
    pub fn add(&mut self, update: DependencyUpdate) {
        match self.index.get(&update.identifier) {
            Some(&position) => {
                let widened = self.updates[position].widen(&update);
                self.updates[position] = widened;
            }
            None => {
                self.index.insert(update.identifier.clone(), self.updates.len());
                self.updates.push(update);
            }
        }
    }

    /// Fold every record from an iterator
    pub fn extend(&mut self, updates: impl IntoIterator<Item = DependencyUpdate>) {
        for update in updates {
            self.add(update);
        }
    }

    /// Canonical record for an identifier
    pub fn get(&self, identifier: &str) -> Option<&DependencyUpdate> {
        self.index.get(identifier).map(|&i| &self.updates[i])
    }

    /// Canonical records in first-seen order
    pub fn updates(&self) -> &[DependencyUpdate] {
        &self.updates
    }

    /// Number of distinct identifiers
    pub fn len(&self) -> usize {
        self.updates.len()
    }

    /// Returns true if nothing was merged
    pub fn is_empty(&self) -> bool {
        self.updates.is_empty()
    }
}

impl FromIterator<DependencyUpdate> for DependencyMerger {
    fn from_iter<I: IntoIterator<Item = DependencyUpdate>>(iter: I) -> Self {
        let mut merger = Self::new();
        merger.extend(iter);
        merger
    }
}
