//! OLAC Harvest main entry point
//!
//! This is the command-line interface for the language catalog harvester.

use anyhow::Context;
use clap::Parser;
use olac_harvest::config::{load_config_with_hash, validate, Config, RunMode};
use olac_harvest::crawler::RunController;
use olac_harvest::logging::setup_logging;
use olac_harvest::output::print_statistics;
use std::path::PathBuf;

/// OLAC Harvest: a language catalog harvester
///
/// Crawls the OLAC archive's regions, countries and languages, joins each
/// language with the ISO and Glottolog reference lists, and submits the
/// result to the ingestion service. Languages already captured today are
/// skipped, so an interrupted run can simply be started again.
#[derive(Parser, Debug)]
#[command(name = "olac-harvest")]
#[command(version)]
#[command(about = "Harvest the OLAC language catalog", long_about = None)]
struct Cli {
    /// Path to an optional TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// The CSV file containing the ISO language codes
    #[arg(long, value_name = "FILE")]
    languages: Option<PathBuf>,

    /// The Glottolog languoid CSV file
    #[arg(long = "glotto-languoids", value_name = "FILE")]
    languoids: Option<PathBuf>,

    /// Limit the processing to a smaller sample
    #[arg(long, value_enum)]
    mode: Option<RunMode>,

    /// The URL to submit the data to
    #[arg(long, value_name = "URL")]
    service: Option<String>,

    /// The folder to write the data to
    #[arg(long = "output-folder", value_name = "DIR")]
    output: Option<PathBuf>,

    /// Also write index.json with the crawled regions and countries
    #[arg(long)]
    write_index: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    /// Applies command-line overrides on top of a configuration
    fn apply(&self, mut config: Config) -> Config {
        if let Some(languages) = &self.languages {
            config.reference.languages = languages.clone();
        }
        if let Some(languoids) = &self.languoids {
            config.reference.languoids = languoids.clone();
        }
        if let Some(mode) = self.mode {
            config.harvest.mode = mode;
        }
        if let Some(service) = &self.service {
            config.service.url = service.clone();
        }
        if let Some(output) = &self.output {
            config.output.folder = output.clone();
        }
        if self.write_index {
            config.harvest.write_index = true;
        }
        config
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let base = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    let config = cli.apply(base);
    validate(&config).context("Invalid configuration")?;

    tracing::info!(
        "Mode: {}, regions: {}, output: {}",
        config.harvest.mode,
        config.harvest.region_pages().len(),
        config.output.folder.display()
    );

    let mut controller = RunController::new(config)?;
    match controller.run().await {
        Ok(stats) => {
            tracing::info!("Harvest completed successfully");
            if !cli.quiet {
                print_statistics(&stats);
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!("Harvest failed in state {}: {}", controller.state(), e);
            Err(e.into())
        }
    }
}
