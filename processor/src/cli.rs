// processor/src/cli.rs

use std::path::PathBuf;

use clap::Parser;

/// Emits the rolling median vertex degree of a windowed interaction graph,
/// one value per accepted event.
#[derive(Debug, Parser)]
#[command(name = "processor", version)]
pub struct Args {
    /// Input event stream, one JSON record per line
    pub input: PathBuf,

    /// File the median values are written to
    pub output: PathBuf,
}
