use std::error::Error as _;

use thiserror::Error;

/// Errors returned by the shopping-search client.
#[derive(Debug, Error)]
pub enum SerpError {
    /// Network, TLS or timeout failure. The request URL is stripped before
    /// the error is stored so the credential cannot leak through it.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-success status. `message` is the
    /// provider's own `error` string; the search proxy never forwards it.
    #[error(
        "upstream returned HTTP {status}{}",
        .message.as_deref().map(|m| format!(": {m}")).unwrap_or_default()
    )]
    UpstreamStatus {
        status: u16,
        message: Option<String>,
    },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

impl SerpError {
    /// Renders the error together with its source chain, e.g.
    /// `"HTTP error: error sending request: operation timed out"`.
    #[must_use]
    pub fn describe(&self) -> String {
        let mut message = self.to_string();
        let mut source = self.source();
        while let Some(cause) = source {
            let text = cause.to_string();
            if !message.contains(&text) {
                message.push_str(": ");
                message.push_str(&text);
            }
            source = cause.source();
        }
        message
    }
}
