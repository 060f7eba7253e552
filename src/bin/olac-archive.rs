//! Packs every past run folder into `<YYYYMMDD>.tbz`

use anyhow::Context;
use clap::Parser;
use olac_harvest::archive::archive_data_root;
use olac_harvest::logging::setup_logging;
use olac_harvest::storage::today;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "olac-archive")]
#[command(version)]
#[command(about = "Archive past OLAC harvest runs", long_about = None)]
struct Cli {
    /// The data folder holding the YYYYMMDD run folders
    #[arg(long, value_name = "DIR")]
    data: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let report = archive_data_root(&cli.data, today())
        .with_context(|| format!("Failed to archive {}", cli.data.display()))?;

    for name in &report.skipped_today {
        tracing::info!("Skipped today's folder {}", name);
    }
    tracing::info!("Archived {} run folders", report.archived.len());

    if !cli.quiet {
        for path in &report.archived {
            println!("{}", path.display());
        }
    }

    Ok(())
}
