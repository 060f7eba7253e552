//! Ingestion service client
//!
//! Every record leaves the process through `IngestClient::submit`: one POST
//! per record, JSON body, no retries. A status other than 200 is reported to
//! the caller, which logs it and moves on.

use crate::HarvestError;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde::Serialize;

/// Endpoint used by the harvester
pub const LANGUAGE_ENDPOINT: &str = "language";

/// Endpoint used by the reprocessor
pub const LANGUAGES_ENDPOINT: &str = "languages";

/// Header carrying the datasource admin password
pub const ADMIN_HEADER: &str = "x-pdsc-datasource-admin";

/// Result of a submission that reached the service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The service answered 200
    Accepted,
    /// The service answered with another status
    Rejected { status: u16 },
}

/// Client for one ingestion endpoint
#[derive(Debug, Clone)]
pub struct IngestClient {
    client: Client,
    endpoint: String,
    admin_password: Option<String>,
}

impl IngestClient {
    /// Creates a client posting to `{service_url}/{endpoint}`
    pub fn new(client: Client, service_url: &str, endpoint: &str) -> Self {
        Self {
            client,
            endpoint: format!("{}/{}", service_url.trim_end_matches('/'), endpoint),
            admin_password: None,
        }
    }

    /// Sends the admin header with every submission
    pub fn with_admin_password(mut self, password: impl Into<String>) -> Self {
        self.admin_password = Some(password.into());
        self
    }

    /// Full endpoint URL
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Posts one record as JSON
    ///
    /// Transport failures are returned as `HarvestError::Submission`; any
    /// HTTP answer is an `Ok` outcome.
    pub async fn submit<T: Serialize + ?Sized>(
        &self,
        payload: &T,
    ) -> Result<SubmitOutcome, HarvestError> {
        let body = serde_json::to_string(payload)?;

        let mut request = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "text/plain")
            .body(body);
        if let Some(password) = &self.admin_password {
            request = request.header(ADMIN_HEADER, password);
        }

        let response = request
            .send()
            .await
            .map_err(|source| HarvestError::Submission {
                endpoint: self.endpoint.clone(),
                source,
            })?;

        let status = response.status();
        if status == StatusCode::OK {
            Ok(SubmitOutcome::Accepted)
        } else {
            Ok(SubmitOutcome::Rejected {
                status: status.as_u16(),
            })
        }
    }
}
