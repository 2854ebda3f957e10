//! Dependency manifest snapshots and pre-merge validation
//!
//! This module provides:
//! - Parsing of Gradle version catalogs (`libs.versions.toml`) into snapshots
//! - Structural diffing of an old and a new snapshot
//! - Strict validation of newly introduced dependencies against the catalog

mod diff;
mod snapshot;
mod validate;

pub use diff::{added_dependencies, added_identifiers};
pub use snapshot::{ManifestEntry, ManifestSection, ManifestSnapshot, VersionReference};
pub use validate::{validate_new_dependencies, ValidatedDependency, ValidationStatus};
