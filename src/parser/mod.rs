//! Line-based scanners for change-request bodies
//!
//! This module provides:
//! - Label section extraction (`### <label>` blocks)
//! - Dependency update table parsing
//! - Version token parsing with the lossy sentinel fallback
//!
//! Both scanners work on exact string matches over logical lines. A
//! heading-like line inside unrelated content (a quoted code block, say)
//! ends a capture early.

mod dependency_table;
mod label_section;

pub use dependency_table::{parse_dependency_rows, DependencyTableParser, TABLE_SEPARATOR};
pub use label_section::{extract_label_content, extract_label_section};

use crate::domain::Version;

/// Parse a version token, yielding `0.0.0` for anything unparseable
pub fn parse_version(token: &str) -> Version {
    Version::parse(token)
}
