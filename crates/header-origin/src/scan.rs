//! Scanning one translation unit's cursor stream.

use camino::Utf8Path;
use origin_tracker::{Cursor, Depth, Position, PositionTracker, TrackError, TrackerConfig};
use thiserror::Error;

/// A declaration with the position and depth the tracker attributed to it.
#[derive(Debug, Clone)]
pub struct AttributedDecl {
    /// The declared name.
    pub name: String,
    /// The inclusion depth of the declaring file (root = 1).
    pub depth: Depth,
    /// Where the declaration is, with its include chain.
    pub position: Position,
}

/// Scan errors.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The stream has no located cursor to take the root file from.
    #[error("cannot determine the root file: no cursor has a location")]
    NoRoot,

    /// The stream broke the document-order contract.
    #[error("cursor #{index} at {position}: {source}")]
    Integrity {
        /// 0-indexed position of the cursor in the stream.
        index: usize,
        /// The cursor's position.
        position: Position,
        /// The violation.
        source: TrackError,
    },
}

/// Returns the file of the first located cursor.
pub fn infer_root<C: Cursor>(cursors: &[C]) -> Option<&Utf8Path> {
    cursors
        .iter()
        .find_map(|c| c.location())
        .map(|loc| loc.path())
}

/// Tracks every cursor of a translation unit rooted at `root` and keeps the
/// declarations.
///
/// Stops at the first integrity violation.
pub fn scan<C: Cursor>(
    root: &Utf8Path,
    cursors: &[C],
    config: TrackerConfig,
) -> Result<Vec<AttributedDecl>, ScanError> {
    let mut tracker = PositionTracker::new(config);
    tracker.start(root);

    let mut decls = Vec::new();
    for (index, cursor) in cursors.iter().enumerate() {
        let depth = tracker
            .track(cursor)
            .map_err(|source| ScanError::Integrity {
                index,
                position: tracker.to_pos(cursor),
                source,
            })?;
        if cursor.is_declaration() {
            decls.push(AttributedDecl {
                name: cursor.spelling().to_owned(),
                depth,
                position: tracker.to_pos(cursor),
            });
        }
    }
    log::info!("attributed {} declarations from {root}", decls.len());
    Ok(decls)
}
