//! Grouping and deduplicating attributed declarations.

use crate::scan::AttributedDecl;
use camino::Utf8PathBuf;
use indexmap::IndexMap;
use origin_tracker::{Depth, Position};

/// The declarations one header contributed.
#[derive(Debug, Clone)]
pub struct HeaderGroup {
    /// The header file.
    pub path: Utf8PathBuf,
    /// Depth of the header's shallowest inclusion (root = 1).
    pub depth: Depth,
    /// The `#include` that brought the header in; the sentinel for the root.
    pub origin: Position,
    /// Declarations in document order.
    pub decls: Vec<AttributedDecl>,
}

/// Drops declarations seen before with the same name at an equal position.
///
/// Positions compare their include chains too, so the same text reached
/// through two different chains is kept twice.
pub fn dedup(decls: Vec<AttributedDecl>) -> Vec<AttributedDecl> {
    let total = decls.len();
    let mut seen: IndexMap<(String, Position), AttributedDecl> = IndexMap::with_capacity(total);
    for decl in decls {
        seen.entry((decl.name.clone(), decl.position.clone())).or_insert(decl);
    }
    if seen.len() < total {
        log::debug!("dropped {} duplicate declarations", total - seen.len());
    }
    seen.into_values().collect()
}

/// Groups declarations by the file they are declared in.
///
/// Groups are ordered by depth, then by first appearance.
pub fn group_by_header(decls: &[AttributedDecl]) -> Vec<HeaderGroup> {
    let mut groups: IndexMap<Utf8PathBuf, HeaderGroup> = IndexMap::new();
    for decl in decls {
        let Some(path) = decl.position.path() else {
            continue;
        };
        groups
            .entry(path.to_owned())
            .or_insert_with(|| HeaderGroup {
                path: path.to_owned(),
                depth: decl.position.depth(),
                origin: decl.position.origin(),
                decls: Vec::new(),
            })
            .decls
            .push(decl.clone());
    }
    groups.sort_by(|_, a, _, b| a.depth.cmp(&b.depth));
    groups.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::scan;
    use camino::Utf8Path;
    use cursor_dump::CursorEvent;
    use origin_tracker::{PathMatching, TrackerConfig};
    use pretty_assertions::assert_eq;

    fn attributed(cursors: &[CursorEvent]) -> Vec<AttributedDecl> {
        let config = TrackerConfig::default().with_path_matching(PathMatching::PlainSuffix);
        scan(Utf8Path::new("/src/root.h"), cursors, config).unwrap()
    }

    fn names(decls: &[AttributedDecl]) -> Vec<&str> {
        decls.iter().map(|d| d.name.as_str()).collect()
    }

    #[test]
    fn test_group_by_header_orders_by_depth() {
        let decls = attributed(&[
            CursorEvent::inclusion("a.h", "/src/root.h", 1, 1),
            CursorEvent::other("A", "/src/a.h", 1, 9),
            CursorEvent::inclusion("b.h", "/src/a.h", 2, 1),
            CursorEvent::other("B", "/src/b.h", 1, 9),
            CursorEvent::declaration("b1", "/src/b.h", 2, 5),
            CursorEvent::declaration("a1", "/src/a.h", 3, 5),
            CursorEvent::declaration("r1", "/src/root.h", 2, 5),
            CursorEvent::declaration("b2", "/src/b.h", 3, 5),
        ]);

        let groups = group_by_header(&decls);
        let summary: Vec<(&str, Depth, Vec<&str>)> = groups
            .iter()
            .map(|g| (g.path.as_str(), g.depth, names(&g.decls)))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("/src/root.h", 1, vec!["r1"]),
                ("/src/a.h", 2, vec!["a1"]),
                ("/src/b.h", 3, vec!["b1", "b2"]),
            ]
        );
        assert!(groups[0].origin.is_none());
        assert_eq!(groups[2].origin.to_string(), "/src/a.h:2:1");
    }

    #[test]
    fn test_dedup_drops_repeated_declarations() {
        let decls = attributed(&[
            CursorEvent::declaration("f", "/src/root.h", 1, 5),
            CursorEvent::declaration("f", "/src/root.h", 1, 5),
            CursorEvent::declaration("f", "/src/root.h", 4, 5),
            CursorEvent::declaration("g", "/src/root.h", 1, 5),
        ]);
        assert_eq!(decls.len(), 4);

        let unique = dedup(decls);
        let summary: Vec<(&str, u32)> = unique
            .iter()
            .map(|d| (d.name.as_str(), d.position.line()))
            .collect();
        assert_eq!(summary, vec![("f", 1), ("f", 4), ("g", 1)]);
    }

    #[test]
    fn test_dedup_with_prefix_header_before_root() {
        let decls = attributed(&[
            CursorEvent::other("PRE", "/src/pre.h", 1, 9),
            CursorEvent::inclusion("w.h", "/src/pre.h", 2, 1),
            CursorEvent::other("W", "/src/w.h", 1, 9),
            CursorEvent::inclusion("pre.h", "/src/w.h", 2, 1),
            CursorEvent::other("PRE2", "/src/pre.h", 3, 9),
            CursorEvent::declaration("f", "/src/w.h", 3, 5),
            CursorEvent::declaration("f", "/src/w.h", 3, 5),
        ]);
        assert_eq!(decls.len(), 2);
        assert_eq!(names(&dedup(decls)), vec!["f"]);
    }
}
