//! Line-oriented dump reading and writing.

use crate::{CursorEvent, DumpError};
use camino::Utf8Path;
use origin_tracker::CursorKind;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};

/// Reads cursor events from a JSON-lines dump, one per non-blank line.
pub struct DumpReader<R> {
    lines: io::Lines<R>,
    line: usize,
}

impl<R: BufRead> DumpReader<R> {
    /// Creates a reader over buffered input.
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line: 0,
        }
    }

    /// The 1-indexed number of the last line read.
    #[inline]
    pub fn line(&self) -> usize {
        self.line
    }
}

impl<R: BufRead> Iterator for DumpReader<R> {
    type Item = Result<CursorEvent, DumpError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let text = self.lines.next()?;
            self.line += 1;
            let text = match text {
                Ok(text) => text,
                Err(source) => {
                    return Some(Err(DumpError::Io {
                        line: self.line,
                        source,
                    }))
                }
            };
            if text.trim().is_empty() {
                continue;
            }
            return Some(parse_line(&text, self.line));
        }
    }
}

fn parse_line(text: &str, line: usize) -> Result<CursorEvent, DumpError> {
    let event: CursorEvent =
        serde_json::from_str(text).map_err(|source| DumpError::Json { line, source })?;
    if event.kind == CursorKind::InclusionDirective && event.spelling.is_empty() {
        return Err(DumpError::MissingSpelling { line });
    }
    Ok(event)
}

/// Parses a whole dump held in memory.
pub fn parse_dump(text: &str) -> Result<Vec<CursorEvent>, DumpError> {
    DumpReader::new(text.as_bytes()).collect()
}

/// Reads a dump file.
pub fn read_dump(path: &Utf8Path) -> Result<Vec<CursorEvent>, DumpError> {
    let file = File::open(path).map_err(|source| DumpError::Open {
        path: path.to_owned(),
        source,
    })?;
    DumpReader::new(BufReader::new(file)).collect()
}

/// Writes events as a JSON-lines dump.
pub fn write_dump<'a, W: Write>(
    mut out: W,
    events: impl IntoIterator<Item = &'a CursorEvent>,
) -> Result<(), DumpError> {
    for (index, event) in events.into_iter().enumerate() {
        let line = index + 1;
        let json =
            serde_json::to_string(event).map_err(|source| DumpError::Json { line, source })?;
        writeln!(out, "{json}").map_err(|source| DumpError::Io { line, source })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const DUMP: &str = r#"{"kind":"other","spelling":"__STDC__"}

{"kind":"inclusion_directive","spelling":"a.h","location":{"path":"/src/root.h","line":1,"column":1}}
{"kind":"declaration","spelling":"f","location":{"path":"/src/a.h","line":2,"column":5}}
"#;

    #[test]
    fn test_parse_dump() {
        let events = parse_dump(DUMP).unwrap();
        assert_eq!(
            events,
            vec![
                CursorEvent::builtin("__STDC__"),
                CursorEvent::inclusion("a.h", "/src/root.h", 1, 1),
                CursorEvent::declaration("f", "/src/a.h", 2, 5),
            ]
        );
    }

    #[test]
    fn test_reader_counts_blank_lines() {
        let mut reader = DumpReader::new(DUMP.as_bytes());
        assert_eq!(reader.line(), 0);
        reader.next().unwrap().unwrap();
        assert_eq!(reader.line(), 1);
        // The blank second line is skipped but still counted.
        reader.next().unwrap().unwrap();
        assert_eq!(reader.line(), 3);
    }

    #[test]
    fn test_invalid_line_reports_line_number() {
        let error = parse_dump("{\"kind\":\"other\"}\n\n{\"kind\":\"macro\"}\n").unwrap_err();
        assert!(matches!(error, DumpError::Json { line: 3, .. }));
        assert_eq!(error.line(), Some(3));
    }

    #[test]
    fn test_inclusion_requires_spelling() {
        let error = parse_dump(
            r#"{"kind":"inclusion_directive","location":{"path":"/src/root.h","line":1,"column":1}}"#,
        )
        .unwrap_err();
        assert!(matches!(error, DumpError::MissingSpelling { line: 1 }));
    }

    #[test]
    fn test_write_then_read_file() {
        let events = parse_dump(DUMP).unwrap();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write_dump(&mut file, &events).unwrap();

        let path = Utf8Path::from_path(file.path()).unwrap();
        assert_eq!(read_dump(path).unwrap(), events);
    }

    #[test]
    fn test_missing_file() {
        let error = read_dump(Utf8Path::new("/nonexistent/cursors.jsonl")).unwrap_err();
        assert!(matches!(error, DumpError::Open { .. }));
        assert_eq!(error.line(), None);
    }
}
