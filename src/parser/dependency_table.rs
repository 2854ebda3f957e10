//! Dependency update table parsing
//!
//! Change requests opened by dependency bots embed a six-column markdown
//! table. Capture starts on the line after the fixed separator and runs
//! while lines start with `|`:
//!
//! ```text
//! | Package | Change | Age | Adoption | Passing | Confidence |
//! |---|---|---|---|---|---|
//! | [foo:bar](http://x) | `1.0.0` -> `1.2.0` | | | | |
//! ```

use crate::catalog::{Classification, DependencyCatalog};
use crate::domain::{DependencyUpdate, Version};
use crate::error::CatalogError;

/// Separator line that opens a dependency table
pub const TABLE_SEPARATOR: &str = "|---|---|---|---|---|---|";

/// Parser that filters table rows through the dependency catalog
pub struct DependencyTableParser<'a> {
    catalog: &'a DependencyCatalog,
}

impl<'a> DependencyTableParser<'a> {
    /// Create a parser backed by the given catalog
    pub fn new(catalog: &'a DependencyCatalog) -> Self {
        Self { catalog }
    }

    /// Parse the table in `body`, dropping excluded identifiers.
    ///
    /// Fails on the first identifier the catalog does not recognize.
    pub fn parse(&self, body: &str) -> Result<Vec<DependencyUpdate>, CatalogError> {
        let mut updates = Vec::new();

        for update in parse_dependency_rows(body) {
            match self.catalog.classify(&update.identifier) {
                Classification::Excluded => {
                    tracing::debug!(identifier = %update.identifier, "excluded dependency dropped");
                }
                Classification::Included(_) => updates.push(update),
                Classification::Unrecognized => {
                    return Err(CatalogError::unrecognized(update.identifier));
                }
            }
        }

        Ok(updates)
    }
}

/// Parse every well-formed table row in `body`, without catalog filtering
pub fn parse_dependency_rows(body: &str) -> Vec<DependencyUpdate> {
    let mut updates = Vec::new();
    let mut capturing = false;

    for line in body.lines() {
        if capturing {
            if !line.starts_with('|') {
                break;
            }
            match parse_row(line) {
                Some(update) => updates.push(update),
                None => tracing::warn!(row = %line, "skipping malformed dependency row"),
            }
        } else if line == TABLE_SEPARATOR {
            capturing = true;
        }
    }

    updates
}

/// `| [id](link) | `old` -> `new` | ...`
fn parse_row(row: &str) -> Option<DependencyUpdate> {
    let mut columns = row.split('|').skip(1);
    let tag = columns.next()?;
    let change = columns.next()?;

    let identifier = between(tag, '[', ']')?;
    let link = between(tag, '(', ')')?;

    let mut tokens = change.split('`');
    let old_version = tokens.nth(1)?;
    let new_version = tokens.nth(1)?;

    Some(DependencyUpdate::new(
        identifier,
        link,
        Version::parse(old_version),
        Version::parse(new_version),
    ))
}

/// Text between the first `open` and the first following `close`
fn between(text: &str, open: char, close: char) -> Option<&str> {
    let start = text.find(open)? + open.len_utf8();
    let len = text[start..].find(close)?;
    Some(&text[start..start + len])
}
