//! header-origin: attribute C declarations to the headers that produced them.

mod cli;
mod orchestrator;
mod output;
mod report;
mod scan;

use clap::Parser;
use cli::Args;
use miette::Result;

fn main() -> Result<()> {
    let args = Args::parse();
    args.init_logging();

    let rendered = orchestrator::run(&args)?;
    print!("{rendered}");
    Ok(())
}
