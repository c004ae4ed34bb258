//! `GET /api/search`: relays a shopping query to the provider.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Extension,
};
use serde::Deserialize;

use super::{AppState, ProxyError};
use crate::middleware::RequestId;

#[derive(Debug, Deserialize)]
pub(super) struct SearchParams {
    q: Option<String>,
}

/// Returns the provider's JSON bytes verbatim on success.
///
/// An absent or blank `q` is rejected before any outbound call. The query is
/// otherwise forwarded exactly as received.
pub(super) async fn search(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Response {
    let query = params
        .ok()
        .and_then(|Query(p)| p.q)
        .filter(|q| !q.trim().is_empty());

    let Some(query) = query else {
        tracing::warn!(request_id = %req_id.0, "search rejected: missing query");
        return ProxyError::MissingQuery.into_response();
    };

    tracing::info!(request_id = %req_id.0, query = %query, "search request received");

    match state.backend.search(&query).await {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response(),
        Err(err) => {
            if let ProxyError::Upstream { status } = &err {
                tracing::warn!(request_id = %req_id.0, status, "upstream rejected search");
            }
            err.into_response()
        }
    }
}
