// processor/src/main.rs

// Entry point for the rolling median degree processor. Argument handling
// and logging setup live here; the event loop is in `processor`.

mod cli;
mod processor;

use anyhow::Result;
use clap::Parser;
use log::info;

fn main() -> Result<()> {
    env_logger::init();

    let args = cli::Args::parse();
    let stats = processor::run(&args.input, &args.output)?;
    info!(
        "done: {} medians emitted, {} late events rejected, {} records skipped",
        stats.emitted, stats.rejected, stats.skipped
    );
    Ok(())
}
