//! OLAC Harvest: a language catalog harvester
//!
//! This crate crawls the OLAC language archive (region → country → language),
//! joins every crawled language with the ISO language list and the Glottolog
//! languoid classification, fetches the language's resource listing, and
//! publishes the unified record to the ingestion service. A JSON snapshot per
//! language and run-date makes every run safely restartable.

pub mod archive;
pub mod catalog;
pub mod config;
pub mod crawler;
pub mod logging;
pub mod output;
pub mod state;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Main error type for harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Reference catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Page unreachable: {url}: {source}")]
    PageUnreachable { url: String, source: reqwest::Error },

    #[error("Unexpected HTTP status {status} for {url}")]
    PageStatus { url: String, status: u16 },

    #[error("HTML parse error for {url}: {message}")]
    HtmlParse { url: String, message: String },

    #[error("Submission to {endpoint} failed: {source}")]
    Submission {
        endpoint: String,
        source: reqwest::Error,
    },

    #[error("Invalid state transition: {from} -> {to}")]
    InvalidTransition {
        from: state::RunState,
        to: state::RunState,
    },

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("Archive error: {0}")]
    Archive(#[from] archive::ArchiveError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl HarvestError {
    /// Returns true if the error means a page could not be fetched at all
    pub fn is_unreachable(&self) -> bool {
        matches!(self, Self::PageUnreachable { .. } | Self::PageStatus { .. })
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Missing required environment variable {0}")]
    MissingCredential(String),
}

/// Reference catalog errors
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to open {path}: {source}")]
    Open { path: String, source: csv::Error },

    #[error("Failed to read {path}: {source}")]
    Read { path: String, source: csv::Error },
}

/// Result type alias for harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use catalog::{LanguageRecord, ReferenceCatalog, ResourceGroup, ResourceItem};
pub use config::{Config, RunMode};
pub use crawler::{run_harvest, RunController};
pub use output::RunStatistics;
pub use state::RunState;
