//! The cursor interface consumed from the C front end.

use camino::{Utf8Path, Utf8PathBuf};
use std::fmt;

/// The kind of a cursor, as far as origin tracking cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CursorKind {
    /// A named top-level construct (function, variable, type, constant).
    Declaration,
    /// An `#include` directive.
    InclusionDirective,
    /// Anything else (macro definitions, expansions, ...).
    Other,
}

/// A resolved location inside a physical file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FileLocation {
    /// Absolute path of the file as resolved by the front end.
    pub path: Utf8PathBuf,
    /// 1-indexed line number.
    pub line: u32,
    /// 1-indexed column number.
    pub column: u32,
}

impl FileLocation {
    /// Creates a new file location.
    pub fn new(path: impl Into<Utf8PathBuf>, line: u32, column: u32) -> Self {
        Self {
            path: path.into(),
            line,
            column,
        }
    }

    /// Returns the path of the file.
    #[inline]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}

impl fmt::Display for FileLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.path, self.line, self.column)
    }
}

/// One node of the front end's traversal of a translation unit.
///
/// Cursors must be fed to the tracker in document order; the tracker infers
/// entering and leaving files from that order alone.
pub trait Cursor {
    /// The kind of this cursor.
    fn kind(&self) -> CursorKind;

    /// The spelling of this cursor.
    ///
    /// For an inclusion directive this is the include target as written
    /// (`stdio.h`, `sys/types.h`), not the resolved path.
    fn spelling(&self) -> &str;

    /// The resolved file location, or `None` for built-in and
    /// macro-synthesized constructs.
    fn location(&self) -> Option<&FileLocation>;

    /// Returns true if this cursor is a declaration.
    #[inline]
    fn is_declaration(&self) -> bool {
        self.kind() == CursorKind::Declaration
    }
}

impl<C: Cursor + ?Sized> Cursor for &C {
    fn kind(&self) -> CursorKind {
        (**self).kind()
    }

    fn spelling(&self) -> &str {
        (**self).spelling()
    }

    fn location(&self) -> Option<&FileLocation> {
        (**self).location()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_display() {
        let loc = FileLocation::new("/usr/include/stdio.h", 12, 3);
        assert_eq!(loc.to_string(), "/usr/include/stdio.h:12:3");
        assert_eq!(loc.path().file_name(), Some("stdio.h"));
    }
}
