//! Replays an archived run against the ingestion service

use anyhow::Context;
use clap::Parser;
use olac_harvest::archive::Reprocessor;
use olac_harvest::config::{ReprocessConfig, UserAgentConfig, DEFAULT_REPROCESS_SERVICE_URL};
use olac_harvest::crawler::build_http_client;
use olac_harvest::logging::setup_logging;
use olac_harvest::output::print_replay_statistics;
use std::path::PathBuf;
use std::time::Duration;

/// Replays archived snapshots to `{service}/languages`
///
/// The admin password is read from PDSC_ADMIN_PASSWORD (a `.env` file in
/// the working directory is honoured).
#[derive(Parser, Debug)]
#[command(name = "olac-reprocess")]
#[command(version)]
#[command(about = "Replay an archived OLAC harvest", long_about = None)]
struct Cli {
    /// A `<YYYYMMDD>.tbz` archive to replay
    #[arg(long, value_name = "FILE", conflicts_with_all = ["data", "date"])]
    archive: Option<PathBuf>,

    /// The data folder holding the run folders or archives
    #[arg(long, value_name = "DIR", requires = "date")]
    data: Option<PathBuf>,

    /// The run-date to replay, as YYYYMMDD
    #[arg(long, value_name = "YYYYMMDD", requires = "data")]
    date: Option<String>,

    /// Base URL of the ingestion service
    #[arg(long, value_name = "URL", default_value = DEFAULT_REPROCESS_SERVICE_URL)]
    service: String,

    /// Seconds to pause after every 500 submissions
    #[arg(long, value_name = "N", default_value_t = 10)]
    pause_secs: u64,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = ReprocessConfig::from_env(&cli.service, Duration::from_secs(cli.pause_secs))
        .context("Cannot start reprocessing")?;
    let client = build_http_client(&UserAgentConfig::default())?;
    let reprocessor = Reprocessor::new(client, config);

    let stats = match (&cli.archive, &cli.data, &cli.date) {
        (Some(archive), _, _) => reprocessor
            .replay_archive(archive)
            .await
            .with_context(|| format!("Failed to replay {}", archive.display()))?,
        (None, Some(data), Some(date)) => reprocessor
            .replay_date(data, date)
            .await
            .with_context(|| format!("Failed to replay {} in {}", date, data.display()))?,
        _ => anyhow::bail!("Either --archive or both --data and --date are required"),
    };

    tracing::info!("Reprocessing complete");
    if !cli.quiet {
        print_replay_statistics(&stats);
    }

    Ok(())
}
