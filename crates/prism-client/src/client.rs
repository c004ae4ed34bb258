//! HTTP client for the search proxy's `GET /api/search`.

use std::time::Duration;

use prism_core::NormalizedProduct;
use prism_serp::normalize_response;
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::error::ClientError;

/// Error envelope returned by the proxy on failure.
#[derive(Debug, Deserialize)]
struct ProxyErrorBody {
    error: String,
    #[serde(default)]
    details: Option<String>,
}

/// Calls the search proxy and normalizes what it relays.
pub struct ProxyClient {
    client: Client,
    base_url: Url,
}

impl ProxyClient {
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ClientError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(user_agent)
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| ClientError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self { client, base_url })
    }

    /// Searches through the proxy and returns the normalized batch.
    ///
    /// A successful response without any `shopping_results` yields an empty
    /// vector, which callers must treat as "no results" rather than failure.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Proxy`] when the proxy answers non-2xx.
    /// - [`ClientError::Http`] on network failure or timeout.
    /// - [`ClientError::Deserialize`] if a success body is not JSON.
    pub async fn search(&self, query: &str) -> Result<Vec<NormalizedProduct>, ClientError> {
        let url = self.search_url(query)?;
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = match serde_json::from_str::<ProxyErrorBody>(&body) {
                Ok(parsed) => {
                    if let Some(details) = &parsed.details {
                        tracing::debug!(details = %details, "search proxy failure details");
                    }
                    parsed.error
                }
                Err(_) => status
                    .canonical_reason()
                    .unwrap_or("unexpected response")
                    .to_string(),
            };
            tracing::warn!(status = status.as_u16(), message = %message, "search failed");
            return Err(ClientError::Proxy {
                status: status.as_u16(),
                message,
            });
        }

        let payload: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| ClientError::Deserialize {
                context: "search proxy response".to_string(),
                source: e,
            })?;

        let products = normalize_response(&payload);
        tracing::debug!(count = products.len(), "search results normalized");
        Ok(products)
    }

    fn search_url(&self, query: &str) -> Result<Url, ClientError> {
        let mut url = self
            .base_url
            .join("api/search")
            .map_err(|e| ClientError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        url.query_pairs_mut().append_pair("q", query);
        Ok(url)
    }
}
