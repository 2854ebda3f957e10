//! Application error types using thiserror
//!
//! Error hierarchy:
//! - CatalogError: Dependency catalog loading and classification failures
//! - ManifestError: Issues with version catalog manifest parsing
//! - SourceError: Failures at the git / code-hosting / build-tool boundary
//! - ConfigError: Issues with CLI configuration
//! - IoError: File system operation failures

use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Dependency catalog related errors
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Manifest related errors
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// External source related errors
    #[error(transparent)]
    Source(#[from] SourceError),

    /// Configuration related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// IO related errors
    #[error(transparent)]
    Io(#[from] IoError),
}

/// Errors related to the dependency catalog
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Identifier is neither excluded nor included
    #[error(
        "unrecognized dependency '{identifier}': add it to the dependency catalog \
         (either the excluded list or the included list with a reference link)"
    )]
    UnrecognizedDependency { identifier: String },

    /// Catalog file could not be read
    #[error("failed to read dependency catalog {path}: {message}")]
    ReadError { path: PathBuf, message: String },

    /// Catalog file is not valid TOML
    #[error("failed to parse dependency catalog {path}: {message}")]
    ParseError { path: PathBuf, message: String },
}

/// Errors related to manifest snapshots
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Failed to read manifest file
    #[error("failed to read manifest file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing error
    #[error("failed to parse TOML in {path}: {message}")]
    TomlParseError { path: PathBuf, message: String },

    /// A section entry has a shape we cannot interpret
    #[error("invalid entry '{alias}' in {path}: {message}")]
    InvalidEntry {
        path: PathBuf,
        alias: String,
        message: String,
    },
}

/// Errors raised by external collaborators (git, GitHub, build tool)
#[derive(Error, Debug)]
pub enum SourceError {
    /// A spawned command could not run or exited unsuccessfully
    #[error("command `{command}` failed: {message}")]
    CommandFailed { command: String, message: String },

    /// Change request not found on the code host
    #[error("change request #{number} not found in {repo}")]
    ChangeRequestNotFound { number: String, repo: String },

    /// Network request failed
    #[error("failed to fetch change request #{number}: {message}")]
    NetworkError { number: String, message: String },

    /// Rate limit exceeded
    #[error("rate limit exceeded for {host}")]
    RateLimitExceeded { host: String },

    /// Timeout
    #[error("timeout while fetching change request #{number}")]
    Timeout { number: String },

    /// Invalid response from the code host
    #[error("invalid response for change request #{number}: {message}")]
    InvalidResponse { number: String, message: String },

    /// Failed to read a snapshot file
    #[error("failed to read snapshot {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No labels were configured
    #[error("no release note labels configured: pass --labels or set ALLOWED_LABELS")]
    MissingLabels,

    /// Invalid repository slug
    #[error("invalid repository '{value}': expected 'owner/name'")]
    InvalidRepository { value: String },

    /// Conflicting options
    #[error("conflicting options: {message}")]
    ConflictingOptions { message: String },
}

/// Errors related to IO operations
#[derive(Error, Debug)]
pub enum IoError {
    /// Failed to write an output document
    #[error("failed to write {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CatalogError {
    /// Creates a new UnrecognizedDependency error
    pub fn unrecognized(identifier: impl Into<String>) -> Self {
        CatalogError::UnrecognizedDependency {
            identifier: identifier.into(),
        }
    }
}

impl ManifestError {
    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new TomlParseError
    pub fn toml_parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ManifestError::TomlParseError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new InvalidEntry error
    pub fn invalid_entry(
        path: impl Into<PathBuf>,
        alias: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        ManifestError::InvalidEntry {
            path: path.into(),
            alias: alias.into(),
            message: message.into(),
        }
    }
}

impl SourceError {
    /// Creates a new CommandFailed error
    pub fn command_failed(command: impl Into<String>, message: impl Into<String>) -> Self {
        SourceError::CommandFailed {
            command: command.into(),
            message: message.into(),
        }
    }

    /// Creates a new NetworkError
    pub fn network_error(number: impl Into<String>, message: impl Into<String>) -> Self {
        SourceError::NetworkError {
            number: number.into(),
            message: message.into(),
        }
    }
}

impl IoError {
    /// Creates a new WriteError
    pub fn write_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        IoError::WriteError {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unrecognized_dependency_names_identifier() {
        let err = CatalogError::unrecognized("com.example:widget");
        let msg = format!("{}", err);
        assert!(msg.contains("unrecognized dependency 'com.example:widget'"));
        assert!(msg.contains("dependency catalog"));
    }

    #[test]
    fn test_catalog_parse_error() {
        let err = CatalogError::ParseError {
            path: PathBuf::from("catalog.toml"),
            message: "expected `=`".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("catalog.toml"));
        assert!(msg.contains("expected `=`"));
    }

    #[test]
    fn test_manifest_error_toml_parse() {
        let err = ManifestError::toml_parse_error("gradle/libs.versions.toml", "invalid key");
        let msg = format!("{}", err);
        assert!(msg.contains("failed to parse TOML"));
        assert!(msg.contains("invalid key"));
    }

    #[test]
    fn test_manifest_error_invalid_entry() {
        let err = ManifestError::invalid_entry("libs.versions.toml", "okhttp", "not a table");
        let msg = format!("{}", err);
        assert!(msg.contains("invalid entry 'okhttp'"));
        assert!(msg.contains("not a table"));
    }

    #[test]
    fn test_source_error_command_failed() {
        let err = SourceError::command_failed("git log", "exit status 128");
        let msg = format!("{}", err);
        assert!(msg.contains("`git log`"));
        assert!(msg.contains("exit status 128"));
    }

    #[test]
    fn test_source_error_not_found() {
        let err = SourceError::ChangeRequestNotFound {
            number: "42".to_string(),
            repo: "acme/app".to_string(),
        };
        assert_eq!(
            format!("{}", err),
            "change request #42 not found in acme/app"
        );
    }

    #[test]
    fn test_config_error_missing_labels() {
        let msg = format!("{}", ConfigError::MissingLabels);
        assert!(msg.contains("ALLOWED_LABELS"));
    }

    #[test]
    fn test_app_error_from_catalog_error() {
        let app_err: AppError = CatalogError::unrecognized("a:b").into();
        assert!(format!("{}", app_err).contains("'a:b'"));
    }

    #[test]
    fn test_app_error_from_io_error() {
        let io_err = IoError::write_error(
            "/missing/notes.md",
            std::io::Error::new(std::io::ErrorKind::NotFound, "no such directory"),
        );
        let app_err: AppError = io_err.into();
        assert!(format!("{}", app_err).contains("failed to write /missing/notes.md"));
    }
}
