use crate::ConfigError;
use std::time::Duration;
use url::Url;

/// Environment variable holding the ingestion service admin password
pub const ADMIN_PASSWORD_ENV: &str = "PDSC_ADMIN_PASSWORD";

/// Default base URL of the ingestion service used by the reprocessor
pub const DEFAULT_REPROCESS_SERVICE_URL: &str = "http://api-service:3000";

/// Records submitted between two pacing pauses
pub const DEFAULT_PACING_BATCH: usize = 500;

/// Validated settings for replaying an archived snapshot
#[derive(Debug, Clone)]
pub struct ReprocessConfig {
    /// Base URL of the ingestion service
    pub service_url: String,

    /// Value of the `x-pdsc-datasource-admin` header
    pub admin_password: String,

    /// Records submitted before each pause
    pub pacing_batch: usize,

    /// Length of each pause
    pub pacing_pause: Duration,
}

impl ReprocessConfig {
    /// Builds the configuration, reading the admin password from the environment
    ///
    /// Fails before any I/O when the password is missing.
    pub fn from_env(service_url: &str, pacing_pause: Duration) -> Result<Self, ConfigError> {
        let password = std::env::var(ADMIN_PASSWORD_ENV).ok();
        Self::with_credential(service_url, pacing_pause, password)
    }

    /// Builds the configuration from an explicitly supplied credential
    pub fn with_credential(
        service_url: &str,
        pacing_pause: Duration,
        admin_password: Option<String>,
    ) -> Result<Self, ConfigError> {
        let admin_password = admin_password
            .filter(|p| !p.is_empty())
            .ok_or_else(|| ConfigError::MissingCredential(ADMIN_PASSWORD_ENV.to_string()))?;

        Url::parse(service_url).map_err(|e| {
            ConfigError::InvalidUrl(format!("Invalid service url '{}': {}", service_url, e))
        })?;

        Ok(Self {
            service_url: service_url.trim_end_matches('/').to_string(),
            admin_password,
            pacing_batch: DEFAULT_PACING_BATCH,
            pacing_pause,
        })
    }
}
