//! Label sections of a change-request body

/// Text captured under a `### <label>` header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelSection {
    /// The label, without the `### ` prefix
    pub label: String,
    /// Captured lines, each terminated by `\n`
    pub content: String,
}

impl LabelSection {
    /// Creates a new label section
    pub fn new(label: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            content: content.into(),
        }
    }

    /// Returns true if nothing was captured
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}
