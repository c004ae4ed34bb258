use thiserror::Error;

/// Errors returned while calling the search proxy.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The proxy answered with a non-success status and this error message.
    #[error("search proxy returned HTTP {status}: {message}")]
    Proxy { status: u16, message: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid proxy URL \"{url}\": {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl ClientError {
    /// Message suitable for showing in the error state of the results view.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Proxy { status, message } => {
                format!("Search failed: {message} (HTTP {status}). Please try again.")
            }
            ClientError::Http(e) if e.is_timeout() => {
                "Search failed: the search service took too long to respond.".to_string()
            }
            ClientError::Http(_) => {
                "Search failed: could not reach the search service.".to_string()
            }
            ClientError::Deserialize { .. } => {
                "Search failed: the search service sent an unreadable response.".to_string()
            }
            ClientError::InvalidBaseUrl { .. } => {
                "Search failed: the search service address is misconfigured.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proxy_error_message_mentions_status() {
        let err = ClientError::Proxy {
            status: 429,
            message: "Upstream API error".to_string(),
        };
        assert_eq!(
            err.user_message(),
            "Search failed: Upstream API error (HTTP 429). Please try again."
        );
    }
}
