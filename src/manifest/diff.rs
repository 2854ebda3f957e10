//! Structural diff of two manifest snapshots
//!
//! An entry is new when its identifier appears in the new snapshot and in no
//! entry of the old one. Entries without their own version are skipped: they
//! are managed by a bill of materials and cannot be meaningfully diffed.

use super::{ManifestEntry, ManifestSnapshot};
use std::collections::HashSet;

/// Entries of `new` whose identifier is absent from `old`
pub fn added_dependencies<'n>(
    old: &ManifestSnapshot,
    new: &'n ManifestSnapshot,
) -> Vec<&'n ManifestEntry> {
    let known: HashSet<String> = old.entries().filter_map(|e| e.identifier()).collect();
    let mut seen = HashSet::new();

    new.entries()
        .filter(|entry| entry.has_explicit_version())
        .filter(|entry| match entry.identifier() {
            Some(identifier) => !known.contains(&identifier) && seen.insert(identifier),
            None => false,
        })
        .collect()
}

/// Identifiers of the entries returned by [`added_dependencies`]
pub fn added_identifiers(old: &ManifestSnapshot, new: &ManifestSnapshot) -> Vec<String> {
    added_dependencies(old, new)
        .into_iter()
        .filter_map(|entry| entry.identifier())
        .collect()
}
