//! Output documents
//!
//! This module provides:
//! - Release notes composition from label sections and merged dependencies
//! - Unified diffs of dependency listings
//! - Sinks that publish non-empty documents

mod diff;
mod notes;
mod sink;

pub use diff::{render_diff_comment, DependencyListDiffer, DEFAULT_CONTEXT_RADIUS};
pub use notes::{
    format_dependency_table, LabelContents, ReleaseNotesComposer, DEFAULT_CHANGED_LABEL,
};
pub use sink::{FileSink, OutputSink, WriterSink};
