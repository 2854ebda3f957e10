//! Release notes composition
//!
//! Output shape:
//!
//! ```text
//! ### New
//! - feature A
//!
//! ### Changed
//! - something
//!
//! - Dependency versions:
//!
//! | Name | Version |
//! |------|---------|
//! | [foo:bar](http://x) | `1.0.0` -> `1.3.0` |
//! ```

use crate::domain::{DependencyUpdate, LabelSection};

/// Label that carries the dependency table by default
pub const DEFAULT_CHANGED_LABEL: &str = "Changed";

/// Per-label text accumulated across change requests, in caller order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelContents {
    sections: Vec<LabelSection>,
}

impl LabelContents {
    /// Empty sections for each label, in the given order
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            sections: labels
                .into_iter()
                .map(|label| LabelSection::new(label, String::new()))
                .collect(),
        }
    }

    /// Append text to a label's section. Unknown labels are added at the end.
    pub fn append(&mut self, label: &str, content: &str) {
        match self.sections.iter_mut().find(|s| s.label == label) {
            Some(section) => section.content.push_str(content),
            None => self.sections.push(LabelSection::new(label, content)),
        }
    }

    /// Accumulated text for a label
    pub fn get(&self, label: &str) -> Option<&str> {
        self.sections
            .iter()
            .find(|s| s.label == label)
            .map(|s| s.content.as_str())
    }

    /// Sections in composition order
    pub fn sections(&self) -> &[LabelSection] {
        &self.sections
    }

    /// Returns true if every section is empty
    pub fn is_empty(&self) -> bool {
        self.sections.iter().all(LabelSection::is_empty)
    }
}

/// Assembles the final release notes document
#[derive(Debug, Clone)]
pub struct ReleaseNotesComposer {
    changed_label: String,
}

impl Default for ReleaseNotesComposer {
    fn default() -> Self {
        Self::new(DEFAULT_CHANGED_LABEL)
    }
}

impl ReleaseNotesComposer {
    /// Create a composer that attaches the dependency table to `changed_label`
    pub fn new(changed_label: impl Into<String>) -> Self {
        Self {
            changed_label: changed_label.into(),
        }
    }

    /// Compose the document. An empty string means there is nothing to publish.
    pub fn compose(&self, contents: &LabelContents, dependencies: &[DependencyUpdate]) -> String {
        let mut output = String::new();

        for section in contents.sections() {
            let with_table = section.label == self.changed_label && !dependencies.is_empty();
            if section.is_empty() && !with_table {
                continue;
            }

            output.push_str("### ");
            output.push_str(&section.label);
            output.push('\n');

            if !section.is_empty() {
                output.push_str(&section.content);
                output.push('\n');
            }

            if with_table {
                output.push_str("- Dependency versions:\n\n");
                output.push_str(&format_dependency_table(dependencies));
                output.push_str("\n\n");
            }
        }

        output.trim().to_string()
    }
}

/// Render canonical updates as a two-column markdown table
pub fn format_dependency_table(dependencies: &[DependencyUpdate]) -> String {
    let mut table = String::from("| Name | Version |\n|------|---------|");

    for dependency in dependencies {
        table.push_str(&format!(
            "\n| [{}]({}) | `{}` -> `{}` |",
            dependency.identifier, dependency.link, dependency.old_version, dependency.new_version
        ));
    }

    table
}
