//! Tracking error types.

use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;

/// An integrity violation detected while tracking a cursor stream.
///
/// Every variant means the front end broke the document-order contract. The
/// scan of the current translation unit cannot continue.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackError {
    /// A declaration came from a file that never entered the origin table.
    #[error("cannot find origin for {path}")]
    MissingOrigin {
        /// The file the declaration was found in.
        path: Utf8PathBuf,
    },

    /// A built-in cursor showed up while a file was still open.
    #[error("built-in cursor while {top} is still open at depth {depth}")]
    BuiltinInsideInclude {
        /// The innermost open file.
        top: Utf8PathBuf,
        /// The height of the inclusion stack.
        depth: usize,
    },

    /// A circular inclusion was found, but the file's recorded depth does not
    /// match where it sits on the inclusion stack.
    #[error(
        "circular inclusion of {path}: recorded depth {recorded} does not match stack position {expected}"
    )]
    CircularDepthMismatch {
        /// The re-entered file.
        path: Utf8PathBuf,
        /// The depth in the origin table.
        recorded: usize,
        /// The file's index on the inclusion stack.
        expected: usize,
    },
}

impl TrackError {
    /// Returns the path the violation is about.
    pub fn path(&self) -> &Utf8Path {
        match self {
            TrackError::MissingOrigin { path } => path,
            TrackError::BuiltinInsideInclude { top, .. } => top,
            TrackError::CircularDepthMismatch { path, .. } => path,
        }
    }
}
