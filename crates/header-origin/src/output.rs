//! Output formatting.

use crate::cli::OutputFormat;
use crate::report::{group_by_header, HeaderGroup};
use crate::scan::AttributedDecl;
use camino::Utf8Path;
use origin_tracker::Position;
use serde::Serialize;

/// A formatted declaration for output.
#[derive(Debug, Serialize)]
pub struct FormattedDecl {
    /// The declared name.
    pub name: String,
    /// The inclusion depth (root = 1).
    pub depth: usize,
    /// Where the declaration is.
    pub location: Location,
    /// The `#include`s that led to the declaring file, innermost first.
    pub include_chain: Vec<Location>,
}

/// A formatted header group for output.
#[derive(Debug, Serialize)]
pub struct FormattedHeader {
    /// The header file.
    pub path: String,
    /// The header's inclusion depth (root = 1).
    pub depth: usize,
    /// The `#include` that brought the header in.
    pub included_from: Option<Location>,
    /// Names of the declarations in the header.
    pub declarations: Vec<String>,
}

/// A location in the source.
#[derive(Debug, Serialize)]
pub struct Location {
    /// The file path.
    pub path: String,
    /// 1-indexed line number.
    pub line: u32,
    /// 1-indexed column number.
    pub column: u32,
}

impl Location {
    fn from_position(pos: &Position) -> Option<Self> {
        pos.location().map(|loc| Location {
            path: loc.path.to_string(),
            line: loc.line,
            column: loc.column,
        })
    }
}

/// The JSON report.
#[derive(Debug, Serialize)]
pub struct Report {
    /// The root file of the translation unit.
    pub root: String,
    /// Every kept declaration, in document order.
    pub declarations: Vec<FormattedDecl>,
    /// Declarations grouped by header, when requested.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub headers: Vec<FormattedHeader>,
}

/// Formats attributed declarations for output.
pub struct Formatter {
    format: OutputFormat,
    group_by_header: bool,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat, group_by_header: bool) -> Self {
        Self {
            format,
            group_by_header,
        }
    }

    /// Formats the declarations of one translation unit.
    pub fn format(&self, root: &Utf8Path, decls: &[AttributedDecl]) -> String {
        match self.format {
            OutputFormat::Human if self.group_by_header => self.format_grouped(decls),
            OutputFormat::Human => self.format_human(decls),
            OutputFormat::Json => self.format_json(root, decls),
        }
    }

    /// Formats one line per declaration.
    fn format_human(&self, decls: &[AttributedDecl]) -> String {
        let mut output = String::new();
        for decl in decls {
            output.push_str(&format!(
                "{} (depth {}) at {}{}\n",
                decl.name,
                decl.depth,
                decl.position,
                chain_suffix(&decl.position)
            ));
        }
        output
    }

    /// Formats one block per header.
    fn format_grouped(&self, decls: &[AttributedDecl]) -> String {
        let mut output = String::new();
        for group in group_by_header(decls) {
            output.push_str(&format!("{} (depth {})", group.path, group.depth));
            if !group.origin.is_none() {
                output.push_str(&format!(", included from {}", group.origin));
            }
            output.push('\n');
            for decl in &group.decls {
                output.push_str(&format!("  {} at {}\n", decl.name, decl.position));
            }
        }
        output
    }

    /// Formats as JSON output.
    fn format_json(&self, root: &Utf8Path, decls: &[AttributedDecl]) -> String {
        let report = self.build_report(root, decls);
        let mut json = serde_json::to_string_pretty(&report).unwrap_or_default();
        json.push('\n');
        json
    }

    /// Builds the JSON-ready report.
    pub fn build_report(&self, root: &Utf8Path, decls: &[AttributedDecl]) -> Report {
        let declarations = decls
            .iter()
            .filter_map(|decl| {
                Some(FormattedDecl {
                    name: decl.name.clone(),
                    depth: decl.depth,
                    location: Location::from_position(&decl.position)?,
                    include_chain: decl
                        .position
                        .chain()
                        .iter()
                        .filter_map(Location::from_position)
                        .collect(),
                })
            })
            .collect();

        let headers = if self.group_by_header {
            group_by_header(decls).iter().map(format_header).collect()
        } else {
            Vec::new()
        };

        Report {
            root: root.to_string(),
            declarations,
            headers,
        }
    }
}

fn format_header(group: &HeaderGroup) -> FormattedHeader {
    FormattedHeader {
        path: group.path.to_string(),
        depth: group.depth,
        included_from: Location::from_position(&group.origin),
        declarations: group.decls.iter().map(|d| d.name.clone()).collect(),
    }
}

fn chain_suffix(pos: &Position) -> String {
    pos.chain()
        .iter()
        .map(|site| format!(", included from {site}"))
        .collect()
}

/// Summary of an attribution run.
#[derive(Debug, Default)]
pub struct ScanSummary {
    /// Number of declarations kept.
    pub decl_count: usize,
    /// Number of duplicates dropped.
    pub duplicate_count: usize,
    /// Number of distinct declaring files.
    pub header_count: usize,
}

impl ScanSummary {
    /// Formats the summary line.
    pub fn format(&self) -> String {
        let decl_word = if self.decl_count == 1 {
            "declaration"
        } else {
            "declarations"
        };
        let file_word = if self.header_count == 1 {
            "file"
        } else {
            "files"
        };

        format!(
            "header-origin attributed {} {} in {} {} ({} duplicates dropped)",
            self.decl_count, decl_word, self.header_count, file_word, self.duplicate_count
        )
    }
}
