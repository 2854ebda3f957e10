//! Gradle version catalog snapshots
//!
//! Handles:
//! - `[libraries]` entries: `{ group, name }`, `{ module }`, or `"g:a:v"` shorthand
//! - `[plugins]` entries: `{ id }` or `"id:version"` shorthand
//! - `version.ref = "..."`, `version = "..."` and rich version tables
//!
//! Entries without any version are managed by a bill of materials.

use crate::error::ManifestError;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use toml::{Table, Value};

/// Which catalog table an entry was declared in
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ManifestSection {
    /// `[libraries]`
    Libraries,
    /// `[plugins]`
    Plugins,
}

impl ManifestSection {
    /// TOML table name
    pub fn table_name(&self) -> &'static str {
        match self {
            ManifestSection::Libraries => "libraries",
            ManifestSection::Plugins => "plugins",
        }
    }
}

impl fmt::Display for ManifestSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.table_name())
    }
}

/// How an entry pins its version
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionReference {
    /// `version.ref = "okhttp"`
    Ref(String),
    /// `version = "4.12.0"`, shorthand, or a rich version's `strictly`/`require`/`prefer`
    Literal(String),
}

impl fmt::Display for VersionReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionReference::Ref(name) => write!(f, "ref:{}", name),
            VersionReference::Literal(version) => write!(f, "{}", version),
        }
    }
}

/// One declared dependency or plugin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    /// Catalog alias (the TOML key)
    pub alias: String,
    /// Table this entry came from
    pub section: ManifestSection,
    pub group: Option<String>,
    pub name: Option<String>,
    pub module: Option<String>,
    pub id: Option<String>,
    /// `None` when the version is inherited from a BOM
    pub version: Option<VersionReference>,
}

impl ManifestEntry {
    fn new(alias: &str, section: ManifestSection) -> Self {
        Self {
            alias: alias.to_string(),
            section,
            group: None,
            name: None,
            module: None,
            id: None,
            version: None,
        }
    }

    /// Identifier: `group:name`, else `module`, else plugin `id`
    pub fn identifier(&self) -> Option<String> {
        match (&self.group, &self.name) {
            (Some(group), Some(name)) => Some(format!("{}:{}", group, name)),
            _ => self.module.clone().or_else(|| self.id.clone()),
        }
    }

    /// Returns true if the entry declares its own version
    pub fn has_explicit_version(&self) -> bool {
        self.version.is_some()
    }
}

/// Declared dependencies of one version catalog
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestSnapshot {
    libraries: BTreeMap<String, ManifestEntry>,
    plugins: BTreeMap<String, ManifestEntry>,
}

impl ManifestSnapshot {
    /// Create an empty snapshot
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a version catalog; `path` is only used in error messages
    pub fn from_toml_str(content: &str, path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let path = path.as_ref();
        let toml: Table = toml::from_str(content)
            .map_err(|e| ManifestError::toml_parse_error(path, e.to_string()))?;

        let mut snapshot = Self::new();

        if let Some(libraries) = toml.get("libraries").and_then(|v| v.as_table()) {
            for (alias, value) in libraries {
                let entry = parse_entry(alias, value, ManifestSection::Libraries, path)?;
                snapshot.libraries.insert(alias.clone(), entry);
            }
        }

        if let Some(plugins) = toml.get("plugins").and_then(|v| v.as_table()) {
            for (alias, value) in plugins {
                let entry = parse_entry(alias, value, ManifestSection::Plugins, path)?;
                snapshot.plugins.insert(alias.clone(), entry);
            }
        }

        Ok(snapshot)
    }

    /// Read and parse a version catalog from disk
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ManifestError::read_error(path, e))?;
        Self::from_toml_str(&content, path)
    }

    /// Add an entry (builder pattern)
    pub fn with_entry(mut self, entry: ManifestEntry) -> Self {
        match entry.section {
            ManifestSection::Libraries => self.libraries.insert(entry.alias.clone(), entry),
            ManifestSection::Plugins => self.plugins.insert(entry.alias.clone(), entry),
        };
        self
    }

    /// Look up an entry by section and alias
    pub fn get(&self, section: ManifestSection, alias: &str) -> Option<&ManifestEntry> {
        match section {
            ManifestSection::Libraries => self.libraries.get(alias),
            ManifestSection::Plugins => self.plugins.get(alias),
        }
    }

    /// Libraries then plugins, each sorted by alias
    pub fn entries(&self) -> impl Iterator<Item = &ManifestEntry> {
        self.libraries.values().chain(self.plugins.values())
    }

    /// Number of entries across both sections
    pub fn len(&self) -> usize {
        self.libraries.len() + self.plugins.len()
    }

    /// Returns true if the snapshot has no entries
    pub fn is_empty(&self) -> bool {
        self.libraries.is_empty() && self.plugins.is_empty()
    }
}

impl ManifestEntry {
    /// Library declared by group and name (builder for tests and callers)
    pub fn library(alias: &str, group: &str, name: &str) -> Self {
        let mut entry = Self::new(alias, ManifestSection::Libraries);
        entry.group = Some(group.to_string());
        entry.name = Some(name.to_string());
        entry
    }

    /// Library declared by module coordinates
    pub fn module(alias: &str, module: &str) -> Self {
        let mut entry = Self::new(alias, ManifestSection::Libraries);
        entry.module = Some(module.to_string());
        entry
    }

    /// Plugin declared by id
    pub fn plugin(alias: &str, id: &str) -> Self {
        let mut entry = Self::new(alias, ManifestSection::Plugins);
        entry.id = Some(id.to_string());
        entry
    }

    /// Set the version reference
    pub fn with_version(mut self, version: VersionReference) -> Self {
        self.version = Some(version);
        self
    }
}

fn parse_entry(
    alias: &str,
    value: &Value,
    section: ManifestSection,
    path: &Path,
) -> Result<ManifestEntry, ManifestError> {
    let mut entry = ManifestEntry::new(alias, section);

    match value {
        Value::String(notation) => parse_shorthand(&mut entry, notation),
        Value::Table(table) => {
            entry.group = string_field(table, "group");
            entry.name = string_field(table, "name");
            entry.module = string_field(table, "module");
            entry.id = string_field(table, "id");
            entry.version = table.get("version").and_then(parse_version_reference);
        }
        _ => {
            return Err(ManifestError::invalid_entry(
                PathBuf::from(path),
                alias,
                "expected a string or a table",
            ))
        }
    }

    if entry.identifier().is_none() {
        return Err(ManifestError::invalid_entry(
            PathBuf::from(path),
            alias,
            format!("missing {} coordinates", section_coordinates(section)),
        ));
    }

    Ok(entry)
}

fn section_coordinates(section: ManifestSection) -> &'static str {
    match section {
        ManifestSection::Libraries => "group/name or module",
        ManifestSection::Plugins => "id",
    }
}

/// `"group:name:version"` / `"group:name"` for libraries, `"id:version"` for plugins
fn parse_shorthand(entry: &mut ManifestEntry, notation: &str) {
    match entry.section {
        ManifestSection::Libraries => {
            let mut parts = notation.splitn(3, ':');
            let group = parts.next().filter(|s| !s.is_empty());
            let name = parts.next().filter(|s| !s.is_empty());
            if let (Some(group), Some(name)) = (group, name) {
                entry.group = Some(group.to_string());
                entry.name = Some(name.to_string());
            }
            entry.version = parts
                .next()
                .filter(|s| !s.is_empty())
                .map(|v| VersionReference::Literal(v.to_string()));
        }
        ManifestSection::Plugins => match notation.split_once(':') {
            Some((id, version)) => {
                entry.id = Some(id.to_string());
                if !version.is_empty() {
                    entry.version = Some(VersionReference::Literal(version.to_string()));
                }
            }
            None => entry.id = Some(notation.to_string()),
        },
    }
}

fn parse_version_reference(value: &Value) -> Option<VersionReference> {
    match value {
        Value::String(version) => Some(VersionReference::Literal(version.clone())),
        Value::Table(table) => {
            if let Some(name) = string_field(table, "ref") {
                return Some(VersionReference::Ref(name));
            }
            ["strictly", "require", "prefer"]
                .iter()
                .find_map(|key| string_field(table, key))
                .map(VersionReference::Literal)
        }
        _ => None,
    }
}

fn string_field(table: &Table, key: &str) -> Option<String> {
    table.get(key).and_then(|v| v.as_str()).map(str::to_string)
}
