//! Strict pre-merge validation of newly introduced dependencies
//!
//! Every dependency added between the old and new manifest must already be
//! in the dependency catalog, either excluded or included with a link.

use super::{added_dependencies, ManifestSnapshot};
use crate::catalog::{Classification, DependencyCatalog};
use crate::error::CatalogError;

/// How a newly added dependency is catalogued
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationStatus {
    /// Will never appear in release notes
    Excluded,
    /// Will appear in release notes with this link
    Included { link: String },
}

/// A newly added dependency that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedDependency {
    pub identifier: String,
    pub status: ValidationStatus,
}

/// Validate every dependency added between `old` and `new`.
///
/// Fails with `UnrecognizedDependency` naming the first identifier the
/// catalog does not know.
pub fn validate_new_dependencies(
    old: &ManifestSnapshot,
    new: &ManifestSnapshot,
    catalog: &DependencyCatalog,
) -> Result<Vec<ValidatedDependency>, CatalogError> {
    let mut validated = Vec::new();

    for entry in added_dependencies(old, new) {
        let Some(identifier) = entry.identifier() else {
            continue;
        };

        let status = match catalog.classify(&identifier) {
            Classification::Excluded => ValidationStatus::Excluded,
            Classification::Included(link) => ValidationStatus::Included {
                link: link.to_string(),
            },
            Classification::Unrecognized => return Err(CatalogError::unrecognized(identifier)),
        };

        tracing::debug!(
            identifier = %identifier,
            alias = %entry.alias,
            ?status,
            "new dependency validated"
        );
        validated.push(ValidatedDependency { identifier, status });
    }

    Ok(validated)
}
