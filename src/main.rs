//! gitfame: who wrote the code that is in the tree right now.
//!
//! Lists the files tracked at a revision, blames every selected file and prints
//! per-author line, commit and file counts.
//!
//! USAGE EXAMPLE (run inside a git repository):
//!   gitfame --order-by commits --extensions .rs,.toml --format csv

use clap::Parser;
use color_eyre::eyre::Result;
use gitfame_core::config::{load_config, merge_args};
use gitfame_core::{Cli, FameReport, GitCli, GitfameConfig};
use tracing::instrument;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) -> Result<()> {
    // RUST_LOG wins; otherwise debug with --verbose, warn without.
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

#[instrument(skip(cli))]
fn run(cli: Cli) -> Result<()> {
    let loaded = load_config(cli.config.as_deref(), &cli.repository)?;
    let (config_path, config) = match loaded {
        Some((path, config)) => (Some(path), config),
        None => (None, GitfameConfig::default()),
    };

    let settings = merge_args(&cli, &config, config_path.as_deref())?;
    init_tracing(settings.verbose)?;
    if let Some(path) = &config_path {
        tracing::info!("Using config file: {}", path.display());
    }
    tracing::debug!("Merged settings: {:?}", settings);

    let report = FameReport::new(GitCli::new(&settings.repository));
    report.run(&settings)?;
    Ok(())
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    run(cli)
}
