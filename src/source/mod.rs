//! External collaborators
//!
//! The core never talks to git, the code host, or the build tool directly.
//! It sees them through these traits:
//! - `CommitRangeSource`: ordered change-request ids between two points in history
//! - `ChangeRequestSource`: body and labels for one change request
//! - `ManifestReader`: version catalog text at a revision or in the working copy
//! - `DependencyListSource`: old and new flattened dependency listings

mod git;
mod github;
mod listing;

pub use git::{parse_merge_commit, GitCommitRange, GitManifestReader, GitRepository};
pub use github::{GitHubChangeRequests, HttpClient};
pub use listing::{CommandListSource, FileListSource};

use crate::domain::DependencyListSnapshot;
use crate::error::SourceError;
use async_trait::async_trait;

/// A change request as retrieved from the code host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRequest {
    /// Change-request number, as a string
    pub number: String,
    /// Description; `None` when the author left it blank
    pub body: Option<String>,
    /// Label names
    pub labels: Vec<String>,
}

impl ChangeRequest {
    /// Creates a new change request
    pub fn new(number: impl Into<String>, body: Option<String>, labels: Vec<String>) -> Self {
        Self {
            number: number.into(),
            body,
            labels,
        }
    }

    /// Returns true if the change request carries `label`
    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }
}

/// Which revision of a file to read
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Revision {
    /// The checked-out files on disk
    WorkingCopy,
    /// A commit-ish understood by git
    Git(String),
}

/// Ordered change-request ids for a commit range, oldest first
pub trait CommitRangeSource {
    fn change_requests(&self) -> Result<Vec<String>, SourceError>;
}

/// Retrieves change requests from the code host
#[async_trait]
pub trait ChangeRequestSource: Send + Sync {
    async fn fetch(&self, number: &str) -> Result<ChangeRequest, SourceError>;
}

/// Reads version catalog text
pub trait ManifestReader {
    fn read_manifest(&self, revision: &Revision) -> Result<String, SourceError>;
}

/// Produces the old and new dependency listings as opaque text
pub trait DependencyListSource {
    fn snapshots(&self) -> Result<(DependencyListSnapshot, DependencyListSnapshot), SourceError>;
}
