//! Workflow coordination
//!
//! This module provides:
//! - Release notes: walk commits → fetch change requests → route → merge → compose
//! - Pre-merge validation: old manifest vs working copy against the catalog
//! - Dependency listing diff between two snapshots

use crate::catalog::DependencyCatalog;
use crate::domain::DependencyUpdate;
use crate::error::{AppError, CatalogError, ConfigError, SourceError};
use crate::manifest::{validate_new_dependencies, ManifestSnapshot, ValidatedDependency};
use crate::merge::DependencyMerger;
use crate::output::{DependencyListDiffer, LabelContents, ReleaseNotesComposer};
use crate::parser::{extract_label_section, DependencyTableParser};
use crate::progress::Progress;
use crate::source::{
    ChangeRequest, ChangeRequestSource, CommitRangeSource, DependencyListSource, ManifestReader,
    Revision,
};
use std::path::Path;

/// Label marking change requests that carry a dependency table
pub const DEFAULT_DEPENDENCY_LABEL: &str = "Dependencies";

/// Release notes configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesConfig {
    /// Labels to collect, in output order
    pub labels: Vec<String>,
    /// Change requests with this label contribute only dependency rows
    pub dependency_label: String,
    /// Section that receives the dependency table
    pub changed_label: String,
}

impl NotesConfig {
    /// Create a configuration; blank labels are dropped and at least one must remain
    pub fn new<I, S>(labels: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let labels: Vec<String> = labels
            .into_iter()
            .map(|l| l.as_ref().trim().to_string())
            .filter(|l| !l.is_empty())
            .collect();

        if labels.is_empty() {
            return Err(ConfigError::MissingLabels);
        }

        Ok(Self {
            labels,
            dependency_label: DEFAULT_DEPENDENCY_LABEL.to_string(),
            changed_label: crate::output::DEFAULT_CHANGED_LABEL.to_string(),
        })
    }

    /// Set the dependency label
    pub fn with_dependency_label(mut self, label: impl Into<String>) -> Self {
        self.dependency_label = label.into();
        self
    }

    /// Set the label that receives the dependency table
    pub fn with_changed_label(mut self, label: impl Into<String>) -> Self {
        self.changed_label = label.into();
        self
    }
}

/// Accumulates label sections and dependency rows across change requests
pub struct NotesAccumulator<'a> {
    config: &'a NotesConfig,
    parser: DependencyTableParser<'a>,
    contents: LabelContents,
    merger: DependencyMerger,
}

impl<'a> NotesAccumulator<'a> {
    pub fn new(config: &'a NotesConfig, catalog: &'a DependencyCatalog) -> Self {
        Self {
            config,
            parser: DependencyTableParser::new(catalog),
            contents: LabelContents::new(config.labels.iter().cloned()),
            merger: DependencyMerger::new(),
        }
    }

    /// Route one change request into the dependency merger or the label sections
    pub fn add(&mut self, change_request: &ChangeRequest) -> Result<(), CatalogError> {
        let body = change_request.body.as_deref();

        if change_request.has_label(&self.config.dependency_label) {
            let updates = self.parser.parse(body.unwrap_or_default())?;
            tracing::debug!(
                number = %change_request.number,
                rows = updates.len(),
                "dependency change request"
            );
            self.merger.extend(updates);
            return Ok(());
        }

        for label in &self.config.labels {
            let section = extract_label_section(body, label);
            if !section.is_empty() {
                self.contents.append(&section.label, &section.content);
            }
        }
        Ok(())
    }

    /// Label sections collected so far
    pub fn contents(&self) -> &LabelContents {
        &self.contents
    }

    /// Merged dependency updates collected so far
    pub fn dependencies(&self) -> &[DependencyUpdate] {
        self.merger.updates()
    }

    /// Compose the final document
    pub fn compose(&self) -> String {
        ReleaseNotesComposer::new(&self.config.changed_label)
            .compose(&self.contents, self.merger.updates())
    }
}

/// Release notes driver
pub struct Orchestrator<'a> {
    config: NotesConfig,
    catalog: &'a DependencyCatalog,
    show_progress: bool,
}

impl<'a> Orchestrator<'a> {
    /// Create an orchestrator with progress display enabled
    pub fn new(config: NotesConfig, catalog: &'a DependencyCatalog) -> Self {
        Self {
            config,
            catalog,
            show_progress: true,
        }
    }

    /// Enable or disable the progress display
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Generate release notes for every change request in the range.
    ///
    /// Change requests are fetched one at a time in range order. An empty
    /// string means there is nothing to publish.
    pub async fn generate(
        &self,
        range: &dyn CommitRangeSource,
        source: &dyn ChangeRequestSource,
    ) -> Result<String, AppError> {
        let mut progress = Progress::new(self.show_progress);

        progress.spinner("Walking commits...");
        let numbers = range.change_requests();
        progress.finish_and_clear();
        let numbers = numbers?;
        tracing::info!(count = numbers.len(), "change requests in range");

        let mut accumulator = NotesAccumulator::new(&self.config, self.catalog);

        progress.start(numbers.len() as u64, "Fetching change requests");
        for number in &numbers {
            progress.set_message(&format!("Fetching change request #{}", number));

            let change_request = match source.fetch(number).await {
                Ok(cr) => cr,
                Err(e) => {
                    progress.finish_and_clear();
                    return Err(e.into());
                }
            };
            if let Err(e) = accumulator.add(&change_request) {
                progress.finish_and_clear();
                return Err(e.into());
            }
            progress.inc();
        }
        progress.finish_and_clear();

        tracing::info!(
            dependencies = accumulator.dependencies().len(),
            "change requests processed"
        );
        Ok(accumulator.compose())
    }
}

/// Validate dependencies added between `base` and the working copy.
///
/// `manifest_path` only labels parse errors; the reader decides where the
/// text comes from.
pub fn validate_manifest(
    reader: &dyn ManifestReader,
    manifest_path: &Path,
    base: &str,
    catalog: &DependencyCatalog,
) -> Result<Vec<ValidatedDependency>, AppError> {
    let old_text = reader.read_manifest(&Revision::Git(base.to_string()))?;
    let new_text = reader.read_manifest(&Revision::WorkingCopy)?;

    let old_label = format!("{}:{}", base, manifest_path.display());
    let old = ManifestSnapshot::from_toml_str(&old_text, old_label)?;
    let new = ManifestSnapshot::from_toml_str(&new_text, manifest_path)?;
    tracing::info!(old = old.len(), new = new.len(), "manifest entries loaded");

    Ok(validate_new_dependencies(&old, &new, catalog)?)
}

/// Diff the old and new dependency listings; empty when unchanged
pub fn diff_listings(
    source: &dyn DependencyListSource,
    differ: &DependencyListDiffer,
) -> Result<String, SourceError> {
    let (old, new) = source.snapshots()?;
    tracing::info!(old = old.lines().len(), new = new.lines().len(), "listings loaded");
    Ok(differ.diff(&old, &new))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DependencyListSnapshot;
    use crate::manifest::ValidationStatus;
    use async_trait::async_trait;
    use std::collections::HashMap;

    const TABLE_HEADER: &str =
        "| Package | Change | Age | Adoption | Passing | Confidence |\n|---|---|---|---|---|---|\n";

    struct FakeRange(Vec<&'static str>);

    impl CommitRangeSource for FakeRange {
        fn change_requests(&self) -> Result<Vec<String>, SourceError> {
            Ok(self.0.iter().map(|s| s.to_string()).collect())
        }
    }

    #[derive(Default)]
    struct FakeHost(HashMap<String, ChangeRequest>);

    impl FakeHost {
        fn with(mut self, number: &str, body: &str, labels: &[&str]) -> Self {
            self.0.insert(
                number.to_string(),
                ChangeRequest::new(
                    number,
                    Some(body.to_string()),
                    labels.iter().map(|l| l.to_string()).collect(),
                ),
            );
            self
        }
    }

    #[async_trait]
    impl ChangeRequestSource for FakeHost {
        async fn fetch(&self, number: &str) -> Result<ChangeRequest, SourceError> {
            self.0
                .get(number)
                .cloned()
                .ok_or_else(|| SourceError::ChangeRequestNotFound {
                    number: number.to_string(),
                    repo: "acme/app".to_string(),
                })
        }
    }

    fn row(id: &str, old: &str, new: &str) -> String {
        format!("| [{id}](https://example.com/{id}) | `{old}` -> `{new}` | | | | |\n")
    }

    fn catalog() -> DependencyCatalog {
        DependencyCatalog::new()
            .include("foo:bar", "https://example.com/foo:bar")
            .include("baz:qux", "https://example.com/baz:qux")
            .exclude("androidx.test:core")
    }

    fn config() -> NotesConfig {
        NotesConfig::new(["New", "Fixed", "Changed"]).unwrap()
    }

    #[test]
    fn test_notes_config_requires_labels() {
        assert!(matches!(
            NotesConfig::new(["", "  "]),
            Err(ConfigError::MissingLabels)
        ));

        let config = NotesConfig::new([" New ", "Fixed"]).unwrap();
        assert_eq!(config.labels, vec!["New", "Fixed"]);
        assert_eq!(config.dependency_label, "Dependencies");
        assert_eq!(config.changed_label, "Changed");
    }

    #[test]
    fn test_dependency_change_request_contributes_only_rows() {
        let config = config();
        let catalog = catalog();
        let mut accumulator = NotesAccumulator::new(&config, &catalog);

        let body = format!(
            "### New\n- should not appear\n{}{}",
            TABLE_HEADER,
            row("foo:bar", "1.0.0", "1.1.0")
        );
        accumulator
            .add(&ChangeRequest::new("1", Some(body), vec!["Dependencies".to_string()]))
            .unwrap();

        assert!(accumulator.contents().is_empty());
        assert_eq!(accumulator.dependencies().len(), 1);
    }

    #[test]
    fn test_regular_change_request_contributes_only_sections() {
        let config = config();
        let catalog = catalog();
        let mut accumulator = NotesAccumulator::new(&config, &catalog);

        let body = format!(
            "### New\n- feature A\n\n{}{}",
            TABLE_HEADER,
            row("foo:bar", "1.0.0", "1.1.0")
        );
        accumulator
            .add(&ChangeRequest::new("2", Some(body), vec!["enhancement".to_string()]))
            .unwrap();

        assert!(accumulator.dependencies().is_empty());
        assert!(accumulator.contents().get("New").unwrap().starts_with("- feature A\n"));
    }

    #[test]
    fn test_change_request_without_body() {
        let config = config();
        let catalog = catalog();
        let mut accumulator = NotesAccumulator::new(&config, &catalog);

        accumulator.add(&ChangeRequest::new("3", None, vec![])).unwrap();
        accumulator
            .add(&ChangeRequest::new("4", None, vec!["Dependencies".to_string()]))
            .unwrap();

        assert_eq!(accumulator.compose(), "");
    }

    #[test]
    fn test_unrecognized_dependency_fails() {
        let config = config();
        let catalog = catalog();
        let mut accumulator = NotesAccumulator::new(&config, &catalog);

        let body = format!("{}{}", TABLE_HEADER, row("unknown:lib", "1.0", "2.0"));
        let err = accumulator
            .add(&ChangeRequest::new("5", Some(body), vec!["Dependencies".to_string()]))
            .unwrap_err();
        assert_eq!(err, CatalogError::unrecognized("unknown:lib"));
    }

    #[tokio::test]
    async fn test_generate_merges_across_change_requests() {
        let host = FakeHost::default()
            .with("10", "### New\n- feature A\n", &["enhancement"])
            .with(
                "11",
                &format!(
                    "{}{}{}",
                    TABLE_HEADER,
                    row("foo:bar", "1.0.0", "1.2.0"),
                    row("androidx.test:core", "1.0", "1.1")
                ),
                &["Dependencies"],
            )
            .with(
                "12",
                &format!("{}{}", TABLE_HEADER, row("foo:bar", "1.2.0", "1.3.0")),
                &["Dependencies"],
            )
            .with("13", "### Changed\n- Bumped min SDK\n", &[]);

        let catalog = catalog();
        let document = Orchestrator::new(config(), &catalog)
            .with_progress(false)
            .generate(&FakeRange(vec!["10", "11", "12", "13"]), &host)
            .await
            .unwrap();

        assert!(document.starts_with("### New\n- feature A\n"));
        assert!(document.contains("### Changed\n- Bumped min SDK\n"));
        assert!(document.contains("| [foo:bar](https://example.com/foo:bar) | `1.0.0` -> `1.3.0` |"));
        assert!(!document.contains("androidx.test:core"));
    }

    #[tokio::test]
    async fn test_generate_empty_range() {
        let catalog = catalog();
        let document = Orchestrator::new(config(), &catalog)
            .with_progress(false)
            .generate(&FakeRange(vec![]), &FakeHost::default())
            .await
            .unwrap();
        assert_eq!(document, "");
    }

    #[tokio::test]
    async fn test_generate_propagates_fetch_errors() {
        let catalog = catalog();
        let err = Orchestrator::new(config(), &catalog)
            .with_progress(false)
            .generate(&FakeRange(vec!["99"]), &FakeHost::default())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("#99"));
    }

    struct FakeManifests {
        old: &'static str,
        new: &'static str,
    }

    impl ManifestReader for FakeManifests {
        fn read_manifest(&self, revision: &Revision) -> Result<String, SourceError> {
            Ok(match revision {
                Revision::Git(_) => self.old.to_string(),
                Revision::WorkingCopy => self.new.to_string(),
            })
        }
    }

    #[test]
    fn test_validate_manifest() {
        let reader = FakeManifests {
            old: "[libraries]\nfoo = { module = \"foo:bar\", version = \"1.0\" }\n",
            new: "[libraries]\nfoo = { module = \"foo:bar\", version = \"1.0\" }\n\
                  baz = { group = \"baz\", name = \"qux\", version = \"2.0\" }\n\
                  test = \"androidx.test:core:1.5.0\"\n",
        };

        let validated = validate_manifest(
            &reader,
            Path::new("gradle/libs.versions.toml"),
            "origin/main",
            &catalog(),
        )
        .unwrap();

        assert_eq!(validated.len(), 2);
        assert!(validated.iter().any(|v| v.identifier == "baz:qux"
            && v.status
                == ValidationStatus::Included {
                    link: "https://example.com/baz:qux".to_string()
                }));
        assert!(validated
            .iter()
            .any(|v| v.identifier == "androidx.test:core" && v.status == ValidationStatus::Excluded));
    }

    #[test]
    fn test_validate_manifest_unrecognized() {
        let reader = FakeManifests {
            old: "[libraries]\n",
            new: "[libraries]\nnew = \"com.example:new:1.0\"\n",
        };

        let err = validate_manifest(
            &reader,
            Path::new("gradle/libs.versions.toml"),
            "origin/main",
            &catalog(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            AppError::Catalog(CatalogError::UnrecognizedDependency { ref identifier })
                if identifier == "com.example:new"
        ));
    }

    struct FakeListings(&'static str, &'static str);

    impl DependencyListSource for FakeListings {
        fn snapshots(
            &self,
        ) -> Result<(DependencyListSnapshot, DependencyListSnapshot), SourceError> {
            Ok((
                DependencyListSnapshot::from_text(self.0),
                DependencyListSnapshot::from_text(self.1),
            ))
        }
    }

    #[test]
    fn test_diff_listings() {
        let differ = DependencyListDiffer::new();
        let diff = diff_listings(&FakeListings("a\nb\nc\n", "a\nb\nd\n"), &differ).unwrap();
        assert_eq!(diff, "--- old\n+++ new\n@@ -1,3 +1,3 @@\n a\n b\n-c\n+d\n");

        let diff = diff_listings(&FakeListings("a\n", "a\n"), &differ).unwrap();
        assert_eq!(diff, "");
    }
}
