//! Logging setup shared by the binaries
//!
//! The library only emits `tracing` events; each binary installs the
//! subscriber once at startup from its verbosity flags.

use tracing_subscriber::EnvFilter;

/// Builds the filter for a verbosity level
///
/// `quiet` shows errors only; otherwise each `-v` lowers the threshold by
/// one level, starting from `info` for this crate and `warn` elsewhere.
pub fn verbosity_filter(verbose: u8, quiet: bool) -> EnvFilter {
    if quiet {
        return EnvFilter::new("error");
    }

    match verbose {
        0 => EnvFilter::new("olac_harvest=info,warn"),
        1 => EnvFilter::new("olac_harvest=debug,info"),
        2 => EnvFilter::new("olac_harvest=trace,debug"),
        _ => EnvFilter::new("trace"),
    }
}

/// Installs the global subscriber; later calls are ignored
pub fn setup_logging(verbose: u8, quiet: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(verbosity_filter(verbose, quiet))
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .try_init();
}
