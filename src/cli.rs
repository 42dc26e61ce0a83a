use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "shipref-filter", version)]
#[command(
    about = "Print the references whose lookup result has at least two Shipments references on its first stop",
    long_about = None
)]
pub struct Cli {
    /// File with one reference ID per line
    pub references_file: PathBuf,

    /// TOML config file (defaults to ./shipref-filter.toml when present)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Lookup program to run instead of the configured one
    #[arg(long, value_name = "PROGRAM", env = "SHIPREF_TOOL")]
    pub tool: Option<String>,

    /// Number of references per lookup call
    #[arg(long, value_name = "N", env = "SHIPREF_BATCH_SIZE")]
    pub batch_size: Option<usize>,

    /// Log each batch to stderr
    #[arg(short, long)]
    pub verbose: bool,
}
