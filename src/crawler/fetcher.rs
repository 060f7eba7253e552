//! HTTP fetcher implementation
//!
//! One client is built per run and shared by every page fetch and
//! submission. Requests are issued one at a time; no timeout is set beyond
//! the client default.

use crate::config::UserAgentConfig;
use crate::HarvestError;
use reqwest::Client;

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use olac_harvest::config::UserAgentConfig;
/// use olac_harvest::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent_string(config))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Formats the user agent as `Name/Version (+ContactURL; ContactEmail)`
pub fn user_agent_string(config: &UserAgentConfig) -> String {
    format!(
        "{}/{} (+{}; {})",
        config.crawler_name, config.crawler_version, config.contact_url, config.contact_email
    )
}

/// Fetches a page body
///
/// A transport failure becomes `PageUnreachable`; a non-success status
/// becomes `PageStatus`. Callers decide whether either is fatal.
pub async fn fetch_page(client: &Client, url: &str) -> Result<String, HarvestError> {
    tracing::debug!("Fetching {}", url);

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| HarvestError::PageUnreachable {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(HarvestError::PageStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response
        .text()
        .await
        .map_err(|source| HarvestError::PageUnreachable {
            url: url.to_string(),
            source,
        })
}
