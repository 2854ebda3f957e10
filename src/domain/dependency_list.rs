//! Flattened dependency listings

/// Ordered text lines of a resolved dependency listing.
///
/// The lines are never interpreted; two snapshots are only ever compared
/// line by line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyListSnapshot {
    lines: Vec<String>,
}

impl DependencyListSnapshot {
    /// Split `text` into lines (`\n` or `\r\n`)
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.lines().map(str::to_string).collect(),
        }
    }

    /// The snapshot's lines
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Render back to text, every line terminated by `\n`
    pub fn to_text(&self) -> String {
        let mut text = String::new();
        for line in &self.lines {
            text.push_str(line);
            text.push('\n');
        }
        text
    }

    /// Returns true if there are no lines
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
