//! CLI argument parsing module for relnotes

use crate::orchestrator::DEFAULT_DEPENDENCY_LABEL;
use crate::output::{DEFAULT_CHANGED_LABEL, DEFAULT_CONTEXT_RADIUS};
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

/// Default location of the Gradle version catalog
pub const DEFAULT_MANIFEST: &str = "gradle/libs.versions.toml";

/// Release notes generator and dependency gatekeeper
#[derive(Parser, Debug, Clone)]
#[command(
    name = "relnotes",
    version,
    about = "Release notes generator with dependency catalog validation"
)]
pub struct CliArgs {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Enable quiet mode - no progress display, errors only
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Generate release notes from merged change requests since the last release
    Notes(NotesArgs),
    /// Check that every newly added dependency is in the dependency catalog
    Validate(ValidateArgs),
    /// Show a unified diff of two dependency listings
    Diff(DiffArgs),
}

/// Dependency catalog options shared by `notes` and `validate`
#[derive(Args, Debug, Clone, Default)]
pub struct CatalogArgs {
    /// Dependency catalog (TOML with `excluded` and `[included]`)
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Plain exclusion list, one identifier per line
    #[arg(long)]
    pub exclusion_list: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct NotesArgs {
    /// File to write the release notes to
    pub output: PathBuf,

    /// Labels to collect, in output order (comma separated)
    #[arg(long, env = "ALLOWED_LABELS", value_delimiter = ',')]
    pub labels: Vec<String>,

    /// Repository as owner/name
    #[arg(long, env = "GITHUB_REPO")]
    pub repo: String,

    /// API token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Start of the commit range (default: latest tag)
    #[arg(long)]
    pub since: Option<String>,

    /// Repository root
    #[arg(long, default_value = ".")]
    pub path: PathBuf,

    /// Label marking dependency update change requests
    #[arg(long, default_value = DEFAULT_DEPENDENCY_LABEL)]
    pub dependency_label: String,

    /// Section that receives the dependency table
    #[arg(long, default_value = DEFAULT_CHANGED_LABEL)]
    pub changed_label: String,

    /// Also append the notes to this file (CI step summary)
    #[arg(long, env = "GITHUB_STEP_SUMMARY")]
    pub step_summary: Option<PathBuf>,

    #[command(flatten)]
    pub catalog: CatalogArgs,
}

#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    /// Revision to compare the working copy against
    #[arg(long, default_value = "origin/main")]
    pub base: String,

    /// Version catalog, relative to the repository root
    #[arg(long, default_value = DEFAULT_MANIFEST)]
    pub manifest: PathBuf,

    /// Repository root
    #[arg(long, default_value = ".")]
    pub path: PathBuf,

    #[command(flatten)]
    pub catalog: CatalogArgs,
}

#[derive(Args, Debug, Clone)]
pub struct DiffArgs {
    /// Old listing file
    #[arg(long, requires = "new", conflicts_with_all = ["base", "command"])]
    pub old: Option<PathBuf>,

    /// New listing file
    #[arg(long, requires = "old")]
    pub new: Option<PathBuf>,

    /// Revision whose listing is produced in a temporary worktree
    #[arg(long, requires = "command")]
    pub base: Option<String>,

    /// Command that prints the dependency listing
    #[arg(long, num_args = 1.., allow_hyphen_values = true, requires = "base")]
    pub command: Vec<String>,

    /// Repository root
    #[arg(long, default_value = ".")]
    pub path: PathBuf,

    /// Write the diff here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Wrap the diff in a markdown comment
    #[arg(long)]
    pub markdown: bool,

    /// Unchanged lines shown around each change
    #[arg(long, default_value_t = DEFAULT_CONTEXT_RADIUS)]
    pub context: usize,
}

impl CliArgs {
    /// Default tracing filter directive for the verbosity flags
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

impl NotesArgs {
    /// Labels with surrounding whitespace removed and blanks dropped
    pub fn labels(&self) -> Vec<String> {
        self.labels
            .iter()
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .collect()
    }
}
