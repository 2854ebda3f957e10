//! Dependency listing sources
//!
//! - `FileListSource`: two listings already saved to disk
//! - `CommandListSource`: run the build tool's dependency report at a base
//!   revision (inside a temporary worktree) and at the working copy

use super::{DependencyListSource, GitRepository};
use crate::domain::DependencyListSnapshot;
use crate::error::SourceError;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Reads the old and new listings from files
#[derive(Debug, Clone)]
pub struct FileListSource {
    old: PathBuf,
    new: PathBuf,
}

impl FileListSource {
    pub fn new(old: impl Into<PathBuf>, new: impl Into<PathBuf>) -> Self {
        Self {
            old: old.into(),
            new: new.into(),
        }
    }
}

fn read_snapshot(path: &Path) -> Result<DependencyListSnapshot, SourceError> {
    std::fs::read_to_string(path)
        .map(|text| DependencyListSnapshot::from_text(&text))
        .map_err(|e| SourceError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })
}

impl DependencyListSource for FileListSource {
    fn snapshots(&self) -> Result<(DependencyListSnapshot, DependencyListSnapshot), SourceError> {
        Ok((read_snapshot(&self.old)?, read_snapshot(&self.new)?))
    }
}

/// Runs a listing command at `base_ref` and at the working copy
#[derive(Debug, Clone)]
pub struct CommandListSource {
    repo: GitRepository,
    base_ref: String,
    /// Program followed by its arguments
    command: Vec<String>,
}

impl CommandListSource {
    pub fn new(repo: GitRepository, base_ref: impl Into<String>, command: Vec<String>) -> Self {
        Self {
            repo,
            base_ref: base_ref.into(),
            command,
        }
    }

    fn command_line(&self) -> String {
        self.command.join(" ")
    }

    /// Run the listing command in `dir` and capture stdout
    fn run_in(&self, dir: &Path) -> Result<DependencyListSnapshot, SourceError> {
        let (program, args) = self
            .command
            .split_first()
            .ok_or_else(|| SourceError::command_failed("", "empty listing command"))?;

        tracing::info!(command = %self.command_line(), dir = %dir.display(), "listing dependencies");

        let output = Command::new(program)
            .args(args)
            .current_dir(dir)
            .output()
            .map_err(|e| SourceError::command_failed(self.command_line(), e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let message = if stderr.is_empty() {
                output.status.to_string()
            } else {
                stderr
            };
            return Err(SourceError::command_failed(self.command_line(), message));
        }

        Ok(DependencyListSnapshot::from_text(&String::from_utf8_lossy(
            &output.stdout,
        )))
    }

    fn base_snapshot(&self) -> Result<DependencyListSnapshot, SourceError> {
        let scratch = tempfile::tempdir().map_err(|e| {
            SourceError::command_failed("git worktree add", format!("temporary directory: {}", e))
        })?;
        let worktree = scratch.path().join("base");

        self.repo.add_worktree(&worktree, &self.base_ref)?;
        let snapshot = self.run_in(&worktree);

        // Remove the worktree even when the listing failed
        if let Err(e) = self.repo.remove_worktree(&worktree) {
            tracing::warn!(error = %e, "failed to remove temporary worktree");
        }

        snapshot
    }
}

impl DependencyListSource for CommandListSource {
    fn snapshots(&self) -> Result<(DependencyListSnapshot, DependencyListSnapshot), SourceError> {
        let old = self.base_snapshot()?;
        let new = self.run_in(self.repo.root())?;
        Ok((old, new))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_list_source() {
        let dir = tempfile::tempdir().unwrap();
        let old = dir.path().join("old.txt");
        let new = dir.path().join("new.txt");
        std::fs::write(&old, "a\nb\n").unwrap();
        std::fs::write(&new, "a\nc\n").unwrap();

        let (old, new) = FileListSource::new(old, new).snapshots().unwrap();
        assert_eq!(old.lines(), ["a", "b"]);
        assert_eq!(new.lines(), ["a", "c"]);
    }

    #[test]
    fn test_file_list_source_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let old = dir.path().join("old.txt");
        std::fs::write(&old, "a\n").unwrap();

        let err = FileListSource::new(&old, dir.path().join("missing.txt"))
            .snapshots()
            .unwrap_err();
        assert!(matches!(err, SourceError::ReadError { .. }));
    }

    #[test]
    fn test_empty_command_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let source = CommandListSource::new(GitRepository::new(dir.path()), "HEAD", vec![]);
        let err = source.run_in(dir.path()).unwrap_err();
        assert!(matches!(err, SourceError::CommandFailed { .. }));
    }

    #[test]
    fn test_missing_program_fails() {
        let dir = tempfile::tempdir().unwrap();
        let source = CommandListSource::new(
            GitRepository::new(dir.path()),
            "HEAD",
            vec!["relnotes-no-such-program".to_string()],
        );
        let err = source.run_in(dir.path()).unwrap_err();
        assert!(err.to_string().contains("relnotes-no-such-program"));
    }
}
