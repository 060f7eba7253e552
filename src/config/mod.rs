//! Configuration module for the harvester
//!
//! Handles the optional TOML configuration file of `olac-harvest`, the
//! run-mode profiles, and the startup validation of the reprocessor's
//! environment.
//!
//! # Example
//!
//! ```no_run
//! use olac_harvest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("harvest.toml")).unwrap();
//! println!("Regions: {:?}", config.harvest.region_pages());
//! ```

mod parser;
mod reprocess;
mod types;
mod validation;

// Re-export types
pub use reprocess::{
    ReprocessConfig, ADMIN_PASSWORD_ENV, DEFAULT_PACING_BATCH, DEFAULT_REPROCESS_SERVICE_URL,
};
pub use types::{
    Config, HarvestConfig, OutputConfig, ReferenceConfig, RunMode, ServiceConfig,
    UserAgentConfig, ALL_REGIONS, DEFAULT_SERVICE_URL, DEFAULT_SITE_URL,
};
pub use validation::validate;

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
