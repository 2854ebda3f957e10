//! Label section extraction
//!
//! Two states: scanning for `### <label>`, then capturing every line until
//! the next heading (`#+ `) or end of input.

use crate::domain::LabelSection;
use regex::Regex;
use std::sync::LazyLock;

// One or more '#' followed by a space
static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^#+ ").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Scanning,
    Capturing,
}

/// Extract the text under `### <label>`, or an empty string if absent
pub fn extract_label_content(body: &str, label: &str) -> String {
    let header = format!("### {}", label);
    let mut state = ScanState::Scanning;
    let mut content = String::new();

    for line in body.lines() {
        match state {
            ScanState::Scanning => {
                if line == header {
                    state = ScanState::Capturing;
                }
            }
            ScanState::Capturing => {
                if HEADING_RE.is_match(line) {
                    break;
                }
                content.push_str(line);
                content.push('\n');
            }
        }
    }

    content
}

/// Extract a label section from an optional body
pub fn extract_label_section(body: Option<&str>, label: &str) -> LabelSection {
    let content = body
        .map(|b| extract_label_content(b, label))
        .unwrap_or_default();
    LabelSection::new(label, content)
}
