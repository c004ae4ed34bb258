mod search;

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use prism_core::UpstreamMode;
use prism_serp::{mock_shopping_response, SerpClient, SerpError, PROXY_RESULT_LIMIT};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use crate::middleware::{request_id, REQUEST_ID_HEADER};

/// Where the proxy gets its shopping results.
#[derive(Debug)]
pub enum SearchBackend {
    Live(SerpClient),
    Mock,
}

impl SearchBackend {
    #[must_use]
    pub fn mode(&self) -> UpstreamMode {
        match self {
            SearchBackend::Live(_) => UpstreamMode::Live,
            SearchBackend::Mock => UpstreamMode::Mock,
        }
    }

    /// Returns the JSON body to relay, as text.
    async fn search(&self, query: &str) -> Result<String, ProxyError> {
        match self {
            SearchBackend::Live(client) => client
                .search(query, PROXY_RESULT_LIMIT)
                .await
                .map_err(|e| ProxyError::from_serp(&e, client)),
            SearchBackend::Mock => {
                tracing::debug!("returning mock shopping results");
                Ok(mock_shopping_response().to_string())
            }
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<SearchBackend>,
}

/// Failure envelope for `/api/search`.
///
/// Bodies carry a single `error` string, plus `details` for transport
/// failures. Upstream error payloads are never forwarded.
#[derive(Debug, PartialEq, Eq)]
pub enum ProxyError {
    MissingQuery,
    Upstream { status: u16 },
    Transport { details: String },
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl ProxyError {
    /// Maps a client error, scrubbing the credential from any diagnostic text.
    fn from_serp(error: &SerpError, client: &SerpClient) -> Self {
        match error {
            SerpError::UpstreamStatus { status, .. } => ProxyError::Upstream { status: *status },
            other => {
                let details = client.redact(&other.describe());
                tracing::error!(error = %details, "shopping search failed");
                ProxyError::Transport { details }
            }
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ProxyError::MissingQuery => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: "Query parameter \"q\" is required",
                    details: None,
                },
            ),
            ProxyError::Upstream { status } => (
                StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                ErrorBody {
                    error: "Upstream API error",
                    details: None,
                },
            ),
            ProxyError::Transport { details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody {
                    error: "Failed to fetch search results",
                    details: Some(details),
                },
            ),
        };
        (status, Json(body)).into_response()
    }
}

#[derive(Debug, Serialize)]
struct HealthData {
    status: &'static str,
    upstream_mode: &'static str,
    timestamp: DateTime<Utc>,
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static(REQUEST_ID_HEADER)])
        .expose_headers([HeaderName::from_static(REQUEST_ID_HEADER)])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/search", get(search::search))
        .layer(
            ServiceBuilder::new()
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthData {
        status: "ok",
        upstream_mode: state.backend.mode().as_str(),
        timestamp: Utc::now(),
    })
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
