//! Origins and the shallowest-wins origin table.

use crate::FileLocation;
use camino::{Utf8Path, Utf8PathBuf};
use rustc_hash::FxHashMap;
use std::fmt;

/// Inclusion nesting level. The root translation unit's origin is 0.
pub type Depth = usize;

/// The shallowest known inclusion of a file.
///
/// `depth` is the height of the inclusion stack at the directive that pulled the
/// file in, so anything the root includes directly has depth 1. The include
/// site is kept as plain coordinates; [`crate::Position::origin`] rebuilds a
/// full position from it on demand.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Origin {
    depth: Depth,
    site: Option<FileLocation>,
}

impl Origin {
    /// The origin of the root translation unit.
    pub const TOP: Origin = Origin {
        depth: 0,
        site: None,
    };

    /// Creates an origin introduced by the `#include` at `site`.
    pub fn new(depth: Depth, site: FileLocation) -> Self {
        Self {
            depth,
            site: Some(site),
        }
    }

    /// The inclusion depth of this origin.
    #[inline]
    pub fn depth(&self) -> Depth {
        self.depth
    }

    /// The location of the introducing `#include`, or `None` for [`Origin::TOP`].
    #[inline]
    pub fn site(&self) -> Option<&FileLocation> {
        self.site.as_ref()
    }

    /// Returns true if this is the root origin.
    #[inline]
    pub fn is_top(&self) -> bool {
        self.site.is_none()
    }

    /// Returns true if this origin is strictly shallower than `other`.
    #[inline]
    pub fn is_shallower_than(&self, other: &Origin) -> bool {
        self.depth < other.depth
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.site {
            Some(site) => write!(f, "{}@{}", site, self.depth),
            None => write!(f, "<top>@{}", self.depth),
        }
    }
}

/// Maps each physical file to its shallowest known [`Origin`].
#[derive(Debug, Clone, Default)]
pub struct OriginTable {
    entries: FxHashMap<Utf8PathBuf, Origin>,
}

impl OriginTable {
    /// Creates an empty origin table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of files in the table.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no file has been recorded yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the recorded origin of `path`.
    pub fn get(&self, path: &Utf8Path) -> Option<&Origin> {
        self.entries.get(path)
    }

    /// Returns an iterator over all recorded files and their origins.
    pub fn iter(&self) -> impl Iterator<Item = (&Utf8Path, &Origin)> {
        self.entries.iter().map(|(path, origin)| (path.as_path(), origin))
    }

    /// Records `origin` for `path` unless an equally shallow or shallower
    /// origin is already known.
    ///
    /// Returns the depth stored for `path` after the merge.
    pub fn merge(&mut self, path: &Utf8Path, origin: Origin) -> Depth {
        match self.entries.get_mut(path) {
            Some(existing) if !origin.is_shallower_than(existing) => {
                log::debug!("ignore {path} from {origin}, not shallower than {existing}");
                existing.depth
            }
            Some(existing) => {
                log::debug!("update {path} origin to {origin} from {existing}");
                *existing = origin;
                existing.depth
            }
            None => {
                log::debug!("set {path} origin to {origin}");
                let depth = origin.depth;
                self.entries.insert(path.to_owned(), origin);
                depth
            }
        }
    }

    /// Renders the table sorted by path, one entry per line.
    pub(crate) fn render(&self) -> String {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by_key(|(path, _)| *path);

        let mut out = String::from("origins:\n");
        for (path, origin) in entries {
            out.push_str(&format!("  {path} -> {origin}\n"));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site(line: u32) -> FileLocation {
        FileLocation::new("/src/root.h", line, 1)
    }

    #[test]
    fn test_merge_inserts_new_entry() {
        let mut table = OriginTable::new();
        assert!(table.is_empty());
        assert_eq!(table.merge(Utf8Path::new("/src/a.h"), Origin::new(2, site(1))), 2);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(Utf8Path::new("/src/a.h")).map(Origin::depth), Some(2));
    }

    #[test]
    fn test_merge_keeps_shallower_entry() {
        let mut table = OriginTable::new();
        let path = Utf8Path::new("/src/x.h");
        table.merge(path, Origin::new(2, site(1)));

        assert_eq!(table.merge(path, Origin::new(4, site(7))), 2);
        assert_eq!(table.get(path), Some(&Origin::new(2, site(1))));
    }

    #[test]
    fn test_merge_equal_depth_keeps_first() {
        let mut table = OriginTable::new();
        let path = Utf8Path::new("/src/x.h");
        table.merge(path, Origin::new(3, site(1)));
        table.merge(path, Origin::new(3, site(9)));
        assert_eq!(table.get(path).and_then(Origin::site), Some(&site(1)));
    }

    #[test]
    fn test_merge_replaces_with_shallower() {
        let mut table = OriginTable::new();
        let path = Utf8Path::new("/src/x.h");
        table.merge(path, Origin::new(4, site(1)));
        assert_eq!(table.merge(path, Origin::new(2, site(5))), 2);
        assert_eq!(table.get(path).and_then(Origin::site), Some(&site(5)));
    }

    #[test]
    fn test_origin_display() {
        assert_eq!(Origin::TOP.to_string(), "<top>@0");
        assert!(Origin::TOP.is_top());
        assert_eq!(Origin::new(1, site(3)).to_string(), "/src/root.h:3:1@1");
    }

    #[test]
    fn test_render_is_sorted() {
        let mut table = OriginTable::new();
        table.merge(Utf8Path::new("/src/b.h"), Origin::new(1, site(2)));
        table.merge(Utf8Path::new("/src/a.h"), Origin::TOP);
        assert_eq!(
            table.render(),
            "origins:\n  /src/a.h -> <top>@0\n  /src/b.h -> /src/root.h:2:1@1\n"
        );
    }
}
