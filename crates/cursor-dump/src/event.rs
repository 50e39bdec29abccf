//! Owned cursor records.

use camino::Utf8PathBuf;
use origin_tracker::{Cursor, CursorKind, FileLocation};
use serde::{Deserialize, Serialize};

/// One cursor of a dumped translation unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CursorEvent {
    /// The kind of cursor.
    pub kind: CursorKind,
    /// The declared name, or the include target as written.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub spelling: String,
    /// Where the cursor is, absent for built-ins.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<FileLocation>,
}

impl CursorEvent {
    /// A declaration named `name` at the given location.
    pub fn declaration(
        name: impl Into<String>,
        path: impl Into<Utf8PathBuf>,
        line: u32,
        column: u32,
    ) -> Self {
        Self::located(CursorKind::Declaration, name, path, line, column)
    }

    /// An `#include` of `spelling` at the given location.
    pub fn inclusion(
        spelling: impl Into<String>,
        path: impl Into<Utf8PathBuf>,
        line: u32,
        column: u32,
    ) -> Self {
        Self::located(CursorKind::InclusionDirective, spelling, path, line, column)
    }

    /// Any other cursor, such as a macro definition.
    pub fn other(
        spelling: impl Into<String>,
        path: impl Into<Utf8PathBuf>,
        line: u32,
        column: u32,
    ) -> Self {
        Self::located(CursorKind::Other, spelling, path, line, column)
    }

    /// A built-in cursor without a file location.
    pub fn builtin(spelling: impl Into<String>) -> Self {
        Self {
            kind: CursorKind::Other,
            spelling: spelling.into(),
            location: None,
        }
    }

    fn located(
        kind: CursorKind,
        spelling: impl Into<String>,
        path: impl Into<Utf8PathBuf>,
        line: u32,
        column: u32,
    ) -> Self {
        Self {
            kind,
            spelling: spelling.into(),
            location: Some(FileLocation::new(path, line, column)),
        }
    }
}

impl Cursor for CursorEvent {
    fn kind(&self) -> CursorKind {
        self.kind
    }

    fn spelling(&self) -> &str {
        &self.spelling
    }

    fn location(&self) -> Option<&FileLocation> {
        self.location.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_deserialize_inclusion() {
        let event: CursorEvent = serde_json::from_str(
            r#"{"kind":"inclusion_directive","spelling":"sys/types.h","location":{"path":"/src/a.h","line":3,"column":1}}"#,
        )
        .unwrap();
        assert_eq!(event, CursorEvent::inclusion("sys/types.h", "/src/a.h", 3, 1));
        assert!(!event.is_declaration());
    }

    #[test]
    fn test_deserialize_builtin() {
        let event: CursorEvent =
            serde_json::from_str(r#"{"kind":"other","spelling":"__STDC__","location":null}"#)
                .unwrap();
        assert_eq!(event, CursorEvent::builtin("__STDC__"));
        assert_eq!(event.location(), None);
    }

    #[test]
    fn test_serialize_skips_empty_fields() {
        let event = CursorEvent {
            kind: CursorKind::Other,
            spelling: String::new(),
            location: None,
        };
        assert_eq!(serde_json::to_string(&event).unwrap(), r#"{"kind":"other"}"#);
    }
}
