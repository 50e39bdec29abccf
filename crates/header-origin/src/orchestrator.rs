//! Main orchestration logic.

use crate::cli::{Args, OutputFormat};
use crate::output::{Formatter, ScanSummary};
use crate::report::{dedup, group_by_header};
use crate::scan::{infer_root, scan, ScanError};
use camino::{Utf8Path, Utf8PathBuf};
use cursor_dump::{read_dump, CursorEvent, DumpError, DumpReader};
use miette::Diagnostic;
use std::io;
use thiserror::Error;

/// Orchestration errors.
#[derive(Debug, Error, Diagnostic)]
pub enum OrchestratorError {
    /// The cursor dump could not be read.
    #[error("failed to read cursor dump {input}")]
    #[diagnostic(code(header_origin::dump))]
    Dump {
        /// The dump file, `-` for stdin.
        input: Utf8PathBuf,
        /// The underlying error.
        #[source]
        source: DumpError,
    },

    /// The cursor stream could not be attributed.
    #[error("failed to attribute declarations from {input}")]
    #[diagnostic(
        code(header_origin::scan),
        help("the dump must list every cursor of one translation unit in document order")
    )]
    Scan {
        /// The dump file, `-` for stdin.
        input: Utf8PathBuf,
        /// The underlying error.
        #[source]
        source: ScanError,
    },
}

/// Attributes every declaration in the dump named by `args` and renders the
/// result.
pub fn run(args: &Args) -> Result<String, OrchestratorError> {
    let events = load_events(args).map_err(|source| OrchestratorError::Dump {
        input: args.input.clone(),
        source,
    })?;
    log::debug!("read {} cursors from {}", events.len(), args.input);

    render(args, &events).map_err(|source| OrchestratorError::Scan {
        input: args.input.clone(),
        source,
    })
}

fn load_events(args: &Args) -> Result<Vec<CursorEvent>, DumpError> {
    if args.reads_stdin() {
        DumpReader::new(io::stdin().lock()).collect()
    } else {
        read_dump(&args.input)
    }
}

/// Scans `events` and formats the declarations for output.
fn render(args: &Args, events: &[CursorEvent]) -> Result<String, ScanError> {
    let root = match &args.root {
        Some(root) => root.as_path(),
        None => infer_root(events).ok_or(ScanError::NoRoot)?,
    };

    let attributed = scan(root, events, args.tracker_config())?;
    let total = attributed.len();
    let decls = dedup(attributed);

    let summary = ScanSummary {
        decl_count: decls.len(),
        duplicate_count: total - decls.len(),
        header_count: group_by_header(&decls).len(),
    };
    log::info!("{}", summary.format());

    let formatter = Formatter::new(args.output, args.group_by_header);
    let mut output = formatter.format(root, &decls);
    if args.output == OutputFormat::Human {
        output.push_str(&summary_block(root, &summary));
    }
    Ok(output)
}

fn summary_block(root: &Utf8Path, summary: &ScanSummary) -> String {
    format!("\n{root}: {}\n", summary.format())
}
