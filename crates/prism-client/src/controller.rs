//! Async driver for [`SearchFlow`].
//!
//! At most one search is in flight. Submitting a new query aborts the
//! previous request task, and the flow's generation check discards any
//! outcome that still slips through.

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::{AbortHandle, JoinHandle};

use crate::client::ProxyClient;
use crate::flow::{SearchFlow, SearchState};
use crate::render::RenderModel;

#[derive(Debug, Default)]
struct Inner {
    flow: SearchFlow,
    in_flight: Option<AbortHandle>,
}

#[derive(Clone)]
pub struct SearchController {
    client: Arc<ProxyClient>,
    inner: Arc<Mutex<Inner>>,
}

impl SearchController {
    #[must_use]
    pub fn new(client: ProxyClient) -> Self {
        Self {
            client: Arc::new(client),
            inner: Arc::new(Mutex::new(Inner::default())),
        }
    }

    /// Starts a search in the background, superseding any in-flight one.
    ///
    /// Returns `None` for a blank query, which leaves the current state as is.
    pub async fn submit(&self, query: &str) -> Option<JoinHandle<()>> {
        let mut inner = self.inner.lock().await;
        let ticket = inner.flow.begin(query)?;

        if let Some(previous) = inner.in_flight.take() {
            previous.abort();
            tracing::debug!(query = %ticket.query(), "superseded in-flight search");
        }

        let client = Arc::clone(&self.client);
        let shared = Arc::clone(&self.inner);
        // The task cannot resolve before `in_flight` is recorded below: it
        // needs the lock this function still holds.
        let handle = tokio::spawn(async move {
            let outcome = client
                .search(ticket.query())
                .await
                .map_err(|e| e.user_message());
            let mut inner = shared.lock().await;
            if inner.flow.resolve(&ticket, outcome) {
                inner.in_flight = None;
            }
        });
        inner.in_flight = Some(handle.abort_handle());
        Some(handle)
    }

    /// Submits `query` and waits for it to settle.
    ///
    /// Returns the state afterwards, which may belong to a newer search if one
    /// was submitted meanwhile.
    pub async fn search(&self, query: &str) -> SearchState {
        if let Some(handle) = self.submit(query).await {
            if let Err(e) = handle.await {
                if !e.is_cancelled() {
                    tracing::error!(error = %e, "search task failed");
                }
            }
        }
        self.snapshot().await
    }

    pub async fn snapshot(&self) -> SearchState {
        self.inner.lock().await.flow.state().clone()
    }

    pub async fn render(&self) -> RenderModel {
        self.inner.lock().await.flow.render()
    }
}
