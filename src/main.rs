use clap::error::ErrorKind;
use clap::Parser;
use shipref_filter::cli::Cli;
use shipref_filter::config::Config;
use shipref_filter::error::FilterError;
use shipref_filter::input;
use shipref_filter::lookup::CommandLookup;
use shipref_filter::pipeline::{self, RunSummary};
use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

async fn run(cli: Cli) -> Result<RunSummary, FilterError> {
    let config = Config::resolve(cli.config.as_deref())
        .map(|c| c.with_overrides(cli.tool, cli.batch_size))
        .and_then(|c| c.validate().map(|_| c))
        .map_err(FilterError::Config)?;

    let references = input::read_references(&cli.references_file)?;
    tracing::debug!(
        count = references.len(),
        file = %cli.references_file.display(),
        "loaded references"
    );

    let mut lookup = CommandLookup::new(&config.lookup);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    pipeline::run(&references, config.lookup.batch_size, &mut lookup, &mut out).await
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            let err = FilterError::Usage(e.render().to_string().trim_end().to_string());
            eprintln!("{}", err);
            std::process::exit(err.exit_code());
        }
    };

    // stdout carries only reference IDs, so logs go to stderr.
    let default_filter = if cli.verbose { "shipref_filter=debug" } else { "shipref_filter=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();

    match run(cli).await {
        Ok(summary) => {
            tracing::info!(
                batches = summary.batches,
                records = summary.records,
                matched = summary.matched,
                "done"
            );
        }
        Err(e) => {
            tracing::debug!(exit_code = e.exit_code(), "run failed");
            eprintln!("{}", e);
            std::process::exit(e.exit_code());
        }
    }
}
