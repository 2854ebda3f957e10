//! relnotes - release notes generator CLI tool
//!
//! Subcommands:
//! - `notes`: compose release notes from change requests merged since the last tag
//! - `validate`: gate newly added dependencies on the dependency catalog
//! - `diff`: unified diff of two flattened dependency listings

use clap::Parser;
use colored::Colorize;
use relnotes::catalog::DependencyCatalog;
use relnotes::cli::{CatalogArgs, CliArgs, Command, DiffArgs, NotesArgs, ValidateArgs};
use relnotes::error::{CatalogError, ConfigError};
use relnotes::manifest::ValidationStatus;
use relnotes::orchestrator::{diff_listings, validate_manifest, NotesConfig, Orchestrator};
use relnotes::output::{render_diff_comment, DependencyListDiffer, FileSink, OutputSink, WriterSink};
use relnotes::source::{
    CommandListSource, DependencyListSource, FileListSource, GitCommitRange, GitHubChangeRequests,
    GitManifestReader, GitRepository, HttpClient,
};
use std::io;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_tracing(&args);

    match run(args).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr; RUST_LOG overrides the verbosity flags
fn init_tracing(args: &CliArgs) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.log_level()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    match args.command {
        Command::Notes(ref notes) => run_notes(notes, args.quiet).await,
        Command::Validate(ref validate) => run_validate(validate, args.quiet),
        Command::Diff(ref diff) => run_diff(diff),
    }
}

fn load_catalog(args: &CatalogArgs) -> Result<DependencyCatalog, CatalogError> {
    let catalog = match args.catalog {
        Some(ref path) => DependencyCatalog::load(path)?,
        None => DependencyCatalog::new(),
    };

    match args.exclusion_list {
        Some(ref path) => catalog.with_exclusion_list_file(path),
        None => Ok(catalog),
    }
}

async fn run_notes(args: &NotesArgs, quiet: bool) -> anyhow::Result<ExitCode> {
    let config = NotesConfig::new(args.labels())?
        .with_dependency_label(&args.dependency_label)
        .with_changed_label(&args.changed_label);
    let catalog = load_catalog(&args.catalog)?;

    let range = GitCommitRange::new(GitRepository::new(&args.path), args.since.clone());
    let client = HttpClient::new(args.token.clone())?;
    let source = GitHubChangeRequests::new(client, &args.repo)?;

    let document = Orchestrator::new(config, &catalog)
        .with_progress(!quiet)
        .generate(&range, &source)
        .await?;

    let mut sink = FileSink::new(&args.output).with_step_summary(args.step_summary.clone());
    if sink.publish(&document)? {
        if !quiet {
            eprintln!("Release notes written to {}", args.output.display());
        }
    } else if !quiet {
        eprintln!("No release notes to publish");
    }

    Ok(ExitCode::SUCCESS)
}

fn run_validate(args: &ValidateArgs, quiet: bool) -> anyhow::Result<ExitCode> {
    let catalog = load_catalog(&args.catalog)?;
    let reader = GitManifestReader::new(GitRepository::new(&args.path), &args.manifest);

    let validated = validate_manifest(&reader, reader.path(), &args.base, &catalog)?;

    if !quiet {
        if validated.is_empty() {
            println!("No new dependencies since {}", args.base);
        }
        for dependency in &validated {
            match dependency.status {
                ValidationStatus::Excluded => {
                    println!("{} {} (excluded)", "✓".green(), dependency.identifier)
                }
                ValidationStatus::Included { ref link } => {
                    println!("{} {} ({})", "✓".green(), dependency.identifier, link)
                }
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn run_diff(args: &DiffArgs) -> anyhow::Result<ExitCode> {
    let source: Box<dyn DependencyListSource> = match (&args.old, &args.new, &args.base) {
        (Some(old), Some(new), _) => Box::new(FileListSource::new(old, new)),
        (_, _, Some(base)) if !args.command.is_empty() => Box::new(CommandListSource::new(
            GitRepository::new(&args.path),
            base,
            args.command.clone(),
        )),
        _ => {
            return Err(ConfigError::ConflictingOptions {
                message: "pass either --old and --new, or --base and --command".to_string(),
            }
            .into())
        }
    };

    let differ = DependencyListDiffer::new().with_context_radius(args.context);
    let diff = diff_listings(source.as_ref(), &differ)?;
    let document = if args.markdown {
        render_diff_comment(&diff)
    } else {
        diff
    };

    let published = match args.output {
        Some(ref path) => FileSink::new(path).publish(&document)?,
        None => WriterSink::new(io::stdout().lock()).publish(&document)?,
    };
    if !published {
        tracing::info!("dependency listings are identical");
    }

    Ok(ExitCode::SUCCESS)
}
