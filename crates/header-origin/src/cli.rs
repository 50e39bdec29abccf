//! CLI argument parsing.

use camino::Utf8PathBuf;
use clap::{Parser, ValueEnum};
use origin_tracker::{PathMatching, TrackerConfig};

/// Attribute C declarations to the header and include chain they came from.
#[derive(Debug, Parser)]
#[command(name = "header-origin")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Cursor dump of one translation unit (JSON lines, `-` for stdin)
    #[arg(long, short, default_value = "-")]
    pub input: Utf8PathBuf,

    /// Root source file (defaults to the file of the first located cursor)
    #[arg(long)]
    pub root: Option<Utf8PathBuf>,

    /// How include spellings are matched against resolved paths
    #[arg(long = "path-matching", value_enum, default_value = "auto")]
    pub path_matching: PathMatchingArg,

    /// Output format
    #[arg(long, value_enum, default_value = "human")]
    pub output: OutputFormat,

    /// Group declarations by the header they were declared in
    #[arg(long = "group-by-header")]
    pub group_by_header: bool,

    /// Log the inclusion stack and origin table while tracking
    #[arg(long = "dump-tracker-state")]
    pub dump_tracker_state: bool,

    /// Increase log verbosity (multiple uses increase verbosity further)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Path matching options.
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum PathMatchingArg {
    /// Pick the strategy for the host platform (default)
    #[default]
    Auto,
    /// Plain path suffix matching
    Plain,
    /// Also accept `Name/Header.h` inside `Name.framework`
    Framework,
}

impl PathMatchingArg {
    /// Resolves to a concrete strategy.
    pub fn resolve(self) -> PathMatching {
        match self {
            PathMatchingArg::Auto => PathMatching::for_host(),
            PathMatchingArg::Plain => PathMatching::PlainSuffix,
            PathMatchingArg::Framework => PathMatching::FrameworkAlias,
        }
    }
}

/// Output format options.
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output
    Json,
}

impl Args {
    /// Returns true if the dump is read from stdin.
    pub fn reads_stdin(&self) -> bool {
        self.input.as_str() == "-"
    }

    /// Builds the tracker configuration.
    pub fn tracker_config(&self) -> TrackerConfig {
        TrackerConfig::default()
            .with_path_matching(self.path_matching.resolve())
            .with_state_dumps(self.dump_tracker_state)
    }

    /// Initialises logging.
    ///
    /// The level is `Warn` unless raised by `-v` (`Info`, `Debug`, `Trace`);
    /// state dumps need `Trace`. `RUST_LOG` overrides both.
    pub fn init_logging(&self) {
        let mut builder = env_logger::Builder::new();

        let level = if self.dump_tracker_state {
            log::LevelFilter::Trace
        } else {
            match self.verbose {
                0 => log::LevelFilter::Warn,
                1 => log::LevelFilter::Info,
                2 => log::LevelFilter::Debug,
                _ => log::LevelFilter::Trace,
            }
        };
        builder.filter_level(level);
        builder.parse_default_env();
        builder.init();
    }
}
