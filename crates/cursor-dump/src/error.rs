//! Dump reading errors.

use camino::Utf8PathBuf;
use thiserror::Error;

/// An error that occurred while reading a cursor dump.
#[derive(Debug, Error)]
pub enum DumpError {
    /// The dump file could not be opened.
    #[error("cannot open {path}: {source}")]
    Open {
        /// The dump file.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Reading or writing a line failed.
    #[error("I/O error at line {line}: {source}")]
    Io {
        /// The 1-indexed line number.
        line: usize,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A line is not a valid cursor record.
    #[error("invalid cursor at line {line}: {source}")]
    Json {
        /// The 1-indexed line number.
        line: usize,
        /// The underlying JSON error.
        source: serde_json::Error,
    },

    /// An inclusion directive without an include target.
    #[error("inclusion directive without spelling at line {line}")]
    MissingSpelling {
        /// The 1-indexed line number.
        line: usize,
    },
}

impl DumpError {
    /// The 1-indexed line the error refers to, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            DumpError::Open { .. } => None,
            DumpError::Io { line, .. }
            | DumpError::Json { line, .. }
            | DumpError::MissingSpelling { line } => Some(*line),
        }
    }
}
