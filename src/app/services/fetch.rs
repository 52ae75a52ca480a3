//! HTTP client for portal and world endpoints
//!
//! This module wraps a shared reqwest client tuned for the game's public
//! endpoints. Map exports are URL-encoded on the wire; this layer hands the
//! parser normalized text so parsing stays purely positional.

use crate::{Error, Result};

use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Shared HTTP client for directory and map export endpoints
#[derive(Debug, Clone)]
pub struct EndpointClient {
    client: Client,
}

impl EndpointClient {
    /// Create a client with a per-request timeout and user agent
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(user_agent)
            .build()
            .map_err(|e| Error::configuration(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    /// Create a client from harvest configuration
    pub fn from_config(config: &crate::HarvesterConfig) -> Result<Self> {
        Self::new(config.timeout_secs, &config.user_agent)
    }

    /// Fetch one endpoint and return its raw body text
    pub async fn fetch_text(&self, url: &str) -> Result<String> {
        debug!("Fetching {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::fetch(url, "request failed", Some(e)))?;

        let status = response.status();
        let response = response
            .error_for_status()
            .map_err(|e| Error::fetch(url, format!("unexpected status {}", status), Some(e)))?;

        response
            .text()
            .await
            .map_err(|e| Error::fetch(url, "failed to read body", Some(e)))
    }

    /// Fetch a map export and normalize its URL-encoded payload
    pub async fn fetch_map_export(&self, url: &str) -> Result<String> {
        let body = self.fetch_text(url).await?;
        Ok(normalize_payload(&body))
    }
}

/// Decode a map export payload the way the game encodes it
///
/// Percent escapes are decoded first, then `+` becomes a space. Stray or
/// truncated escapes pass through as-is rather than failing the payload.
pub fn normalize_payload(body: &str) -> String {
    let decoded = urlencoding::decode_binary(body.as_bytes());
    String::from_utf8_lossy(&decoded).replace('+', " ")
}
