//! Dependency catalog: the allow/deny registry of dependency identifiers
//!
//! The catalog is loaded once at startup and passed by reference to every
//! component that classifies identifiers. It is never mutated afterwards.
//!
//! File format (TOML):
//!
//! ```toml
//! excluded = ["androidx.test:core"]
//!
//! [included]
//! "com.squareup.okhttp3:okhttp" = "https://square.github.io/okhttp/"
//! ```

use crate::error::CatalogError;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;

/// How the catalog treats an identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification<'a> {
    /// Known, but never published in release notes
    Excluded,
    /// Known and publishable, with its reference link
    Included(&'a str),
    /// Absent from both lists
    Unrecognized,
}

/// On-disk representation of the catalog
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    #[serde(default)]
    excluded: Vec<String>,
    #[serde(default)]
    included: BTreeMap<String, String>,
}

/// Allow/deny registry of dependency identifiers
#[derive(Debug, Clone, Default)]
pub struct DependencyCatalog {
    excluded: HashSet<String>,
    included: HashMap<String, String>,
}

impl DependencyCatalog {
    /// Create an empty catalog (every identifier is unrecognized)
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an excluded identifier (builder pattern)
    pub fn exclude(mut self, identifier: impl Into<String>) -> Self {
        self.excluded.insert(identifier.into());
        self
    }

    /// Add an included identifier with its reference link (builder pattern)
    pub fn include(mut self, identifier: impl Into<String>, link: impl Into<String>) -> Self {
        self.included.insert(identifier.into(), link.into());
        self
    }

    /// Parse a TOML catalog
    pub fn from_toml_str(content: &str) -> Result<Self, CatalogError> {
        Self::parse_toml(content, Path::new("<inline>"))
    }

    /// Load a TOML catalog from disk
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|e| CatalogError::ReadError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::parse_toml(&content, path)
    }

    fn parse_toml(content: &str, path: &Path) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(content).map_err(|e| CatalogError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Ok(Self {
            excluded: file.excluded.into_iter().collect(),
            included: file.included.into_iter().collect(),
        })
    }

    /// Merge a plain exclusion list (one identifier per line) into the excluded set
    pub fn with_exclusion_list(mut self, content: &str) -> Self {
        self.excluded.extend(
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string),
        );
        self
    }

    /// Load and merge a plain exclusion list from disk
    pub fn with_exclusion_list_file(self, path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|e| CatalogError::ReadError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(self.with_exclusion_list(&content))
    }

    /// Classify an identifier. Exclusion wins if an identifier is on both lists.
    pub fn classify(&self, identifier: &str) -> Classification<'_> {
        if self.excluded.contains(identifier) {
            return Classification::Excluded;
        }
        match self.included.get(identifier) {
            Some(link) => Classification::Included(link),
            None => Classification::Unrecognized,
        }
    }

    /// Classify, failing with `UnrecognizedDependency` for unknown identifiers
    pub fn require_known(&self, identifier: &str) -> Result<Classification<'_>, CatalogError> {
        match self.classify(identifier) {
            Classification::Unrecognized => Err(CatalogError::unrecognized(identifier)),
            known => Ok(known),
        }
    }

    /// Returns true if the identifier is on the excluded list
    pub fn is_excluded(&self, identifier: &str) -> bool {
        self.excluded.contains(identifier)
    }

    /// Total number of catalogued identifiers
    pub fn len(&self) -> usize {
        self.excluded.len() + self.included.len()
    }

    /// Returns true if the catalog has no entries
    pub fn is_empty(&self) -> bool {
        self.excluded.is_empty() && self.included.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const CATALOG: &str = r#"
excluded = ["androidx.test:core", "org.jetbrains.kotlin.android"]

[included]
"com.squareup.okhttp3:okhttp" = "https://square.github.io/okhttp/"
"androidx.core:core-ktx" = "https://developer.android.com/jetpack/androidx/releases/core"
"#;

    #[test]
    fn test_classify_from_toml() {
        let catalog = DependencyCatalog::from_toml_str(CATALOG).unwrap();
        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog.classify("androidx.test:core"), Classification::Excluded);
        assert_eq!(
            catalog.classify("com.squareup.okhttp3:okhttp"),
            Classification::Included("https://square.github.io/okhttp/")
        );
        assert_eq!(catalog.classify("com.example:unknown"), Classification::Unrecognized);
    }

    #[test]
    fn test_empty_catalog_recognizes_nothing() {
        let catalog = DependencyCatalog::new();
        assert!(catalog.is_empty());
        assert_eq!(catalog.classify("anything"), Classification::Unrecognized);
    }

    #[test]
    fn test_exclusion_wins_over_inclusion() {
        let catalog = DependencyCatalog::new()
            .include("a:b", "http://a")
            .exclude("a:b");
        assert_eq!(catalog.classify("a:b"), Classification::Excluded);
    }

    #[test]
    fn test_require_known() {
        let catalog = DependencyCatalog::new().exclude("a:b").include("c:d", "http://c");
        assert!(catalog.require_known("a:b").is_ok());
        assert_eq!(
            catalog.require_known("c:d").unwrap(),
            Classification::Included("http://c")
        );

        let err = catalog.require_known("e:f").unwrap_err();
        assert_eq!(err, CatalogError::unrecognized("e:f"));
    }

    #[test]
    fn test_with_exclusion_list_skips_blank_lines() {
        let catalog = DependencyCatalog::new().with_exclusion_list("a:b\n\n  c:d  \n");
        assert!(catalog.is_excluded("a:b"));
        assert!(catalog.is_excluded("c:d"));
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = DependencyCatalog::from_toml_str("allowed = [\"x\"]").unwrap_err();
        assert!(matches!(err, CatalogError::ParseError { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CATALOG.as_bytes()).unwrap();

        let catalog = DependencyCatalog::load(file.path()).unwrap();
        assert!(catalog.require_known("androidx.core:core-ktx").is_ok());
    }

    #[test]
    fn test_load_missing_file() {
        let err = DependencyCatalog::load(Path::new("/nonexistent/catalog.toml")).unwrap_err();
        assert!(matches!(err, CatalogError::ReadError { .. }));
    }
}
