//! Output sinks for composed documents
//!
//! A sink receives the final document as one text blob. Empty documents mean
//! "nothing to publish" and are never written.

use crate::error::IoError;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Destination for a composed document
pub trait OutputSink {
    /// Publish the document. Returns `false` if it was empty and nothing was written.
    fn publish(&mut self, document: &str) -> Result<bool, IoError>;
}

/// Writes the document to a file, optionally appending it to a CI step summary
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
    step_summary: Option<PathBuf>,
}

impl FileSink {
    /// Create a sink for the given output file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            step_summary: None,
        }
    }

    /// Also append published documents to this step-summary file
    pub fn with_step_summary(mut self, path: Option<PathBuf>) -> Self {
        self.step_summary = path;
        self
    }

    /// The output file path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OutputSink for FileSink {
    fn publish(&mut self, document: &str) -> Result<bool, IoError> {
        if document.is_empty() {
            return Ok(false);
        }

        std::fs::write(&self.path, document).map_err(|e| IoError::write_error(&self.path, e))?;

        if let Some(ref summary) = self.step_summary {
            let mut file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(summary)
                .map_err(|e| IoError::write_error(summary, e))?;
            writeln!(file, "{}", document).map_err(|e| IoError::write_error(summary, e))?;
        }

        Ok(true)
    }
}

/// Writes the document to any `Write` (stdout in the CLI)
pub struct WriterSink<W: Write> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    /// Wrap a writer
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Unwrap the writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> OutputSink for WriterSink<W> {
    fn publish(&mut self, document: &str) -> Result<bool, IoError> {
        if document.is_empty() {
            return Ok(false);
        }

        let map_err = |e: std::io::Error| IoError::write_error("<stdout>", e);
        self.writer.write_all(document.as_bytes()).map_err(map_err)?;
        if !document.ends_with('\n') {
            self.writer.write_all(b"\n").map_err(map_err)?;
        }
        self.writer.flush().map_err(map_err)?;
        Ok(true)
    }
}
