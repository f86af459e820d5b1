//! HTTP client for the governance hub
//!
//! The hub serves reads over GraphQL and accepts signed message envelopes on
//! its sequencer endpoint. [`HubClient`] owns the pooled `reqwest` client and
//! the endpoint configuration; the `queries` module builds on its
//! [`HubClient::query`] primitive.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::ballot::SignedEnvelope;
use crate::config::Config;

/// Errors that can occur while talking to the hub
#[derive(Debug, Error)]
pub enum HubError {
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Hub returned status {0}")]
    Status(reqwest::StatusCode),
    #[error("GraphQL error: {0}")]
    GraphQl(String),
    #[error("Unexpected response shape: {0}")]
    InvalidResponse(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Client for a Snapshot-style governance hub
///
/// # Example
///
/// ```ignore
/// use snapshot_rs::{Config, HubClient};
///
/// let client = HubClient::new(Config::default());
/// let proposal = snapshot_rs::queries::get_proposal(&client, "0xabc...").await?;
/// ```
pub struct HubClient {
    /// The HTTP client (with connection pooling)
    http: Client,
    /// Endpoint configuration
    config: Config,
}

impl HubClient {
    /// Create a new hub client from the given configuration
    pub fn new(config: Config) -> Self {
        let http = Client::builder()
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(config.hub.timeout_secs))
            .build()
            .expect("Failed to build HTTP client");

        Self { http, config }
    }

    /// Create a hub client with default configuration
    pub fn default_client() -> Self {
        Self::new(Config::default())
    }

    /// The endpoint configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The underlying pooled HTTP client (shared with the score API boundary)
    pub fn http(&self) -> &Client {
        &self.http
    }

    /// Execute a GraphQL query and extract `root_field` from the response.
    pub async fn query<T: DeserializeOwned>(
        &self,
        document: &str,
        variables: serde_json::Value,
        root_field: &str,
    ) -> Result<T, HubError> {
        let url = format!("{}/graphql", self.config.hub.url);
        debug!(%url, field = root_field, "hub query");

        let response = self
            .http
            .post(&url)
            .json(&json!({ "query": document, "variables": variables }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(HubError::Status(status));
        }

        let body: serde_json::Value = response.json().await?;

        if let Some(errors) = body.get("errors").and_then(|e| e.as_array()) {
            if !errors.is_empty() {
                let message = errors
                    .iter()
                    .filter_map(|e| e.get("message").and_then(|m| m.as_str()))
                    .collect::<Vec<_>>()
                    .join("; ");
                return Err(HubError::GraphQl(message));
            }
        }

        let data = body
            .get("data")
            .and_then(|d| d.get(root_field))
            .cloned()
            .ok_or_else(|| {
                HubError::InvalidResponse(format!("missing data.{} in hub response", root_field))
            })?;

        Ok(serde_json::from_value(data)?)
    }

    /// Broadcast a signed message envelope to the sequencer.
    pub async fn broadcast(&self, envelope: &SignedEnvelope) -> Result<serde_json::Value, HubError> {
        let url = format!("{}/api/msg", self.config.hub.sequencer_url);
        debug!(%url, address = %envelope.address, "broadcasting signed message");

        let response = self.http.post(&url).json(envelope).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(HubError::Status(status));
        }

        Ok(response.json().await?)
    }
}
