//! Git integration through the system `git` binary
//!
//! This module provides:
//! - Latest release tag lookup and merge-commit walking
//! - Reading files at historical revisions
//! - Temporary worktrees for materializing old revisions

use super::{CommitRangeSource, ManifestReader, Revision};
use crate::error::SourceError;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Subject prefix of a merge commit created by the code host
const MERGE_PREFIX: &str = "Merge pull request #";

/// A git working copy
#[derive(Debug, Clone)]
pub struct GitRepository {
    root: PathBuf,
}

impl GitRepository {
    /// Use the repository rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Repository root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Run `git <args>` in the repository and return stdout
    pub fn run(&self, args: &[&str]) -> Result<String, SourceError> {
        let command = format!("git {}", args.join(" "));
        tracing::debug!(%command, "running git");

        let output = Command::new("git")
            .args(args)
            .current_dir(&self.root)
            .output()
            .map_err(|e| SourceError::command_failed(&command, e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let message = if stderr.is_empty() {
                output.status.to_string()
            } else {
                stderr
            };
            return Err(SourceError::command_failed(command, message));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Most recent tag reachable from HEAD
    pub fn latest_tag(&self) -> Result<String, SourceError> {
        Ok(self.run(&["describe", "--tags", "--abbrev=0"])?.trim().to_string())
    }

    /// One-line log of `since..HEAD`, oldest first
    pub fn log_since(&self, since: &str) -> Result<Vec<String>, SourceError> {
        let range = format!("{}..HEAD", since);
        let log = self.run(&["log", "--oneline", "--reverse", &range])?;
        Ok(log.lines().map(str::to_string).collect())
    }

    /// Contents of `path` at `revision`
    pub fn show(&self, revision: &str, path: &Path) -> Result<String, SourceError> {
        // git wants forward slashes in the `rev:path` form
        let path = path.to_string_lossy().replace('\\', "/");
        self.run(&["show", &format!("{}:{}", revision, path)])
    }

    /// Check out `revision` into a detached worktree at `path`
    pub fn add_worktree(&self, path: &Path, revision: &str) -> Result<(), SourceError> {
        let path = path.to_string_lossy();
        self.run(&["worktree", "add", "--detach", &path, revision])?;
        Ok(())
    }

    /// Remove a worktree created by [`GitRepository::add_worktree`]
    pub fn remove_worktree(&self, path: &Path) -> Result<(), SourceError> {
        let path = path.to_string_lossy();
        self.run(&["worktree", "remove", "--force", &path])?;
        Ok(())
    }
}

/// Change-request number of a `git log --oneline` line, if it is a merge commit
pub fn parse_merge_commit(line: &str) -> Option<String> {
    let (_hash, subject) = line.split_once(' ')?;
    let rest = subject.strip_prefix(MERGE_PREFIX)?;
    let number = rest.split(' ').next()?;

    if number.is_empty() || !number.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some(number.to_string())
}

/// Merge commits between a release reference and HEAD
#[derive(Debug, Clone)]
pub struct GitCommitRange {
    repo: GitRepository,
    since: Option<String>,
}

impl GitCommitRange {
    /// Walk from `since`, or from the latest tag when `None`
    pub fn new(repo: GitRepository, since: Option<String>) -> Self {
        Self { repo, since }
    }
}

impl CommitRangeSource for GitCommitRange {
    fn change_requests(&self) -> Result<Vec<String>, SourceError> {
        let since = match self.since {
            Some(ref since) => since.clone(),
            None => self.repo.latest_tag()?,
        };

        let commits = self.repo.log_since(&since)?;
        tracing::info!(since = %since, commits = commits.len(), "walked commit range");

        Ok(commits
            .iter()
            .filter_map(|line| parse_merge_commit(line))
            .collect())
    }
}

/// Reads a version catalog from the working copy or from git history
#[derive(Debug, Clone)]
pub struct GitManifestReader {
    repo: GitRepository,
    /// Path relative to the repository root
    path: PathBuf,
}

impl GitManifestReader {
    /// Read `path` (relative to the repository root)
    pub fn new(repo: GitRepository, path: impl Into<PathBuf>) -> Self {
        Self {
            repo,
            path: path.into(),
        }
    }

    /// Manifest path relative to the repository root
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ManifestReader for GitManifestReader {
    fn read_manifest(&self, revision: &Revision) -> Result<String, SourceError> {
        match revision {
            Revision::WorkingCopy => {
                let full = self.repo.root().join(&self.path);
                std::fs::read_to_string(&full)
                    .map_err(|e| SourceError::ReadError { path: full, source: e })
            }
            Revision::Git(revision) => self.repo.show(revision, &self.path),
        }
    }
}
