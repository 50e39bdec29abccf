//! Positions with lazily resolved include origins.

use crate::{Depth, FileLocation, Origin, OriginTable};
use camino::Utf8Path;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, PoisonError, RwLock};

/// A read-only handle on a tracker's origin table.
///
/// Positions hold one of these instead of the tracker itself, so any number of
/// positions can share a tracker without the tracker knowing about them.
#[derive(Clone, Default)]
pub struct OriginQuery {
    table: Arc<RwLock<OriginTable>>,
}

impl OriginQuery {
    pub(crate) fn new(table: Arc<RwLock<OriginTable>>) -> Self {
        Self { table }
    }

    /// Returns the current origin recorded for `path`.
    pub fn origin_of(&self, path: &Utf8Path) -> Option<Origin> {
        self.table
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(path)
            .cloned()
    }

    /// Returns true if both handles read the same table.
    pub fn same_table(&self, other: &OriginQuery) -> bool {
        Arc::ptr_eq(&self.table, &other.table)
    }
}

impl fmt::Debug for OriginQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OriginQuery").finish_non_exhaustive()
    }
}

#[derive(Clone)]
struct Anchor {
    location: FileLocation,
    origins: OriginQuery,
}

/// A point in source plus the include chain that led to its file.
///
/// The origin is resolved on every call to [`Position::origin`], so positions
/// handed out during a scan reflect the final origin table once the scan is done.
#[derive(Clone, Default)]
pub struct Position {
    anchor: Option<Anchor>,
}

impl Position {
    /// The "no position" sentinel.
    pub fn none() -> Self {
        Self { anchor: None }
    }

    pub(crate) fn new(location: FileLocation, origins: OriginQuery) -> Self {
        Self {
            anchor: Some(Anchor { location, origins }),
        }
    }

    /// Returns true if this is the "no position" sentinel.
    #[inline]
    pub fn is_none(&self) -> bool {
        self.anchor.is_none()
    }

    /// The anchored file location.
    #[inline]
    pub fn location(&self) -> Option<&FileLocation> {
        self.anchor.as_ref().map(|a| &a.location)
    }

    /// The file path, or `None` for the sentinel.
    #[inline]
    pub fn path(&self) -> Option<&Utf8Path> {
        self.location().map(FileLocation::path)
    }

    /// The 1-indexed line, or 0 for the sentinel.
    #[inline]
    pub fn line(&self) -> u32 {
        self.location().map_or(0, |loc| loc.line)
    }

    /// The 1-indexed column, or 0 for the sentinel.
    #[inline]
    pub fn col(&self) -> u32 {
        self.location().map_or(0, |loc| loc.column)
    }

    /// The position of the `#include` that brought this position's file in.
    ///
    /// Returns the sentinel for the root file and for files without a
    /// recorded origin.
    pub fn origin(&self) -> Position {
        let Some(anchor) = &self.anchor else {
            return Position::none();
        };
        anchor
            .origins
            .origin_of(anchor.location.path())
            .and_then(|origin| origin.site().cloned())
            .map(|site| Position::new(site, anchor.origins.clone()))
            .unwrap_or_default()
    }

    /// The inclusion depth of this position: 1 for the root file, 2 for a
    /// header the root includes, and so on. 0 for the sentinel.
    pub fn depth(&self) -> Depth {
        let Some(anchor) = &self.anchor else {
            return 0;
        };
        anchor
            .origins
            .origin_of(anchor.location.path())
            .map_or(1, |origin| origin.depth() + 1)
    }

    /// The include chain of this position, innermost include first.
    ///
    /// The position itself is not part of the chain.
    pub fn chain(&self) -> Vec<Position> {
        let mut chain = Vec::new();
        let mut depth = self.depth();
        let mut next = self.origin();
        // Origins only ever point at strictly shallower files.
        while !next.is_none() && next.depth() < depth {
            depth = next.depth();
            let origin = next.origin();
            chain.push(next);
            next = origin;
        }
        chain
    }
}

impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        match (&self.anchor, &other.anchor) {
            (None, None) => true,
            (Some(a), Some(b)) => {
                // Compared through `chain`, which stops where the depth stops
                // decreasing, so a cyclic origin table cannot recurse forever.
                a.location == b.location
                    && self
                        .chain()
                        .iter()
                        .map(Position::location)
                        .eq(other.chain().iter().map(Position::location))
            }
            _ => false,
        }
    }
}

impl Eq for Position {}

impl Hash for Position {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.location().hash(state);
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.location() {
            Some(loc) => fmt::Display::fmt(loc, f),
            None => f.write_str("<no position>"),
        }
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.location() {
            Some(loc) => f
                .debug_struct("Position")
                .field("location", &format_args!("{loc}"))
                .field("depth", &self.depth())
                .finish(),
            None => f.write_str("Position::none()"),
        }
    }
}
