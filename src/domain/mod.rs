//! Core domain models for relnotes
//!
//! This module contains the fundamental types used throughout the application:
//! - Comparable versions with a lossy sentinel fallback
//! - Dependency update records parsed from change-request tables
//! - Label sections extracted from change-request bodies
//! - Flattened dependency listings compared line by line

mod dependency_list;
mod dependency_update;
mod label_section;
mod version;

pub use dependency_list::DependencyListSnapshot;
pub use dependency_update::DependencyUpdate;
pub use label_section::LabelSection;
pub use version::{Version, SENTINEL_VERSION};
