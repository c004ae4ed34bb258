mod api;
mod middleware;

use std::sync::Arc;

use anyhow::Context;
use prism_core::{AppConfig, UpstreamMode};
use prism_serp::SerpClient;
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState, SearchBackend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = prism_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!(?config, "starting search proxy");

    let backend = build_backend(&config)?;
    let app = build_app(AppState {
        backend: Arc::new(backend),
    });

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

fn build_backend(config: &AppConfig) -> anyhow::Result<SearchBackend> {
    match config.upstream_mode {
        UpstreamMode::Live => {
            let api_key = config
                .serpapi_api_key
                .as_deref()
                .context("SERPAPI_API_KEY is required in live mode")?;
            let client = SerpClient::with_base_url(
                api_key,
                config.upstream_timeout_secs,
                &config.user_agent,
                &config.upstream_base_url,
            )?;
            Ok(SearchBackend::Live(client))
        }
        UpstreamMode::Mock => {
            tracing::warn!("PRISM_UPSTREAM_MODE=mock; serving canned shopping results");
            Ok(SearchBackend::Mock)
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
