//! Unified diff of two dependency listings
//!
//! This module provides:
//! - Line-based unified diff between two flattened dependency listings
//! - A markdown comment wrapping the diff for code-review surfaces

use crate::domain::DependencyListSnapshot;
use similar::TextDiff;

/// Default number of unchanged lines shown around each change
pub const DEFAULT_CONTEXT_RADIUS: usize = 3;

/// Structure-agnostic differ for dependency listings
#[derive(Debug, Clone)]
pub struct DependencyListDiffer {
    /// Unchanged lines shown around each change
    context_radius: usize,
    /// Header names for the `---` / `+++` lines
    old_name: String,
    new_name: String,
}

impl Default for DependencyListDiffer {
    fn default() -> Self {
        Self {
            context_radius: DEFAULT_CONTEXT_RADIUS,
            old_name: "old".to_string(),
            new_name: "new".to_string(),
        }
    }
}

impl DependencyListDiffer {
    /// Create a differ with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the context radius
    pub fn with_context_radius(mut self, context_radius: usize) -> Self {
        self.context_radius = context_radius;
        self
    }

    /// Set the names printed in the diff header
    pub fn with_names(mut self, old_name: impl Into<String>, new_name: impl Into<String>) -> Self {
        self.old_name = old_name.into();
        self.new_name = new_name.into();
        self
    }

    /// Unified diff of `old` against `new`; empty when they are identical
    pub fn diff(&self, old: &DependencyListSnapshot, new: &DependencyListSnapshot) -> String {
        if old == new {
            return String::new();
        }

        let old_text = old.to_text();
        let new_text = new.to_text();
        let diff = TextDiff::from_lines(&old_text, &new_text);

        diff.unified_diff()
            .context_radius(self.context_radius)
            .header(&self.old_name, &self.new_name)
            .to_string()
    }
}

/// Wrap a diff in a markdown comment; an empty diff yields an empty comment
pub fn render_diff_comment(diff: &str) -> String {
    if diff.trim().is_empty() {
        return String::new();
    }

    let mut comment = String::from("### Dependency changes\n\n```diff\n");
    comment.push_str(diff);
    if !diff.ends_with('\n') {
        comment.push('\n');
    }
    comment.push_str("```");
    comment
}
