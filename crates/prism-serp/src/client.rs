//! HTTP client for the shopping-search provider.
//!
//! Wraps `reqwest` with credential handling and status mapping. The payload
//! is returned as the provider's original JSON text: the search proxy relays
//! those bytes as they are, and callers that render results parse them and go
//! through [`crate::normalize`].

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::IgnoredAny;
use serde_json::Value;

use crate::error::SerpError;
use crate::redact::{redact, REDACTED};

const DEFAULT_BASE_URL: &str = "https://serpapi.com/";
const SEARCH_ENGINE: &str = "google_shopping";

/// Result count requested by the search proxy.
pub const PROXY_RESULT_LIMIT: u32 = 20;

/// Client for the provider's `search.json` endpoint.
///
/// Use [`SerpClient::new`] for production or [`SerpClient::with_base_url`]
/// to point at a mock server in tests.
pub struct SerpClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl std::fmt::Debug for SerpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerpClient")
            .field("api_key", &REDACTED)
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl SerpClient {
    /// Creates a client pointed at the production provider.
    ///
    /// # Errors
    ///
    /// Returns [`SerpError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, SerpError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL.
    ///
    /// # Errors
    ///
    /// Returns [`SerpError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`SerpError::InvalidBaseUrl`] if `base_url`
    /// does not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, SerpError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.min(10)))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash, so `join` appends rather than replaces
        // the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| SerpError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Runs one shopping search and returns the provider's JSON body as text,
    /// byte for byte.
    ///
    /// The body is checked to be well-formed JSON but never rebuilt, so key
    /// order, number formatting and large integers survive a relay. Exactly
    /// one request is sent; nothing is retried.
    ///
    /// # Errors
    ///
    /// - [`SerpError::UpstreamStatus`] when the provider answers non-2xx. The
    ///   provider's own `error` string is kept on the error when it sent one.
    /// - [`SerpError::Http`] on network failure or timeout.
    /// - [`SerpError::Deserialize`] if the body is not valid JSON.
    pub async fn search(&self, query: &str, limit: u32) -> Result<String, SerpError> {
        let url = self.search_url(query, limit, &self.api_key)?;
        let loggable = self.search_url(query, limit, REDACTED)?;
        tracing::info!(url = %loggable, "fetching shopping results");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;
        let status = response.status();

        if !status.is_success() {
            tracing::error!(
                status = status.as_u16(),
                reason = status.canonical_reason().unwrap_or("unknown"),
                "shopping search upstream error"
            );
            // Best effort: an unreadable error body still yields the status.
            let message = response
                .text()
                .await
                .ok()
                .and_then(|body| provider_error_message(&body));
            return Err(SerpError::UpstreamStatus {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await.map_err(reqwest::Error::without_url)?;
        serde_json::from_str::<IgnoredAny>(&body).map_err(|e| SerpError::Deserialize {
            context: format!("{SEARCH_ENGINE} results"),
            source: e,
        })?;
        Ok(body)
    }

    /// Like [`SerpClient::search`], but parsed into a [`Value`] for callers
    /// that inspect or normalize the payload instead of relaying it.
    ///
    /// # Errors
    ///
    /// Same as [`SerpClient::search`].
    pub async fn search_value(&self, query: &str, limit: u32) -> Result<Value, SerpError> {
        let body = self.search(query, limit).await?;
        serde_json::from_str(&body).map_err(|e| SerpError::Deserialize {
            context: format!("{SEARCH_ENGINE} results"),
            source: e,
        })
    }

    /// Replaces the credential wherever it appears in `text`.
    #[must_use]
    pub fn redact(&self, text: &str) -> String {
        redact(text, &self.api_key)
    }

    /// Builds the `search.json` URL with percent-encoded query parameters.
    ///
    /// `api_key` is a parameter so the same builder can render a loggable URL
    /// carrying [`REDACTED`] in place of the credential.
    fn search_url(&self, query: &str, limit: u32, api_key: &str) -> Result<Url, SerpError> {
        let mut url = self
            .base_url
            .join("search.json")
            .map_err(|e| SerpError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        url.query_pairs_mut()
            .append_pair("engine", SEARCH_ENGINE)
            .append_pair("q", query)
            .append_pair("api_key", api_key)
            .append_pair("num", &limit.to_string());
        Ok(url)
    }
}

/// Extracts the provider's `{"error": "..."}` message, if the body has one.
fn provider_error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("error")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_owned)
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
