//! HTTP façade that forwards product lookups to a scraping provider and
//! reshapes its JSON.
//!
//! # Design
//! - Request building and response shaping live in `scraper_core`; this
//!   crate owns the router, the reqwest transport and error mapping.
//! - `AppState` is built once from `ServerConfig` and cloned into handlers.
//!   Nothing is shared mutably between requests.
//! - A single `watch` channel drives both graceful shutdown and cancellation
//!   of in-flight provider calls.

pub mod config;
pub mod error;
pub mod logger;
pub mod routes;
pub mod upstream;

use axum::{routing::get, Router};
use scraper_core::ScraperClient;
use tokio::{net::TcpListener, sync::watch};
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::error::StartupError;
use crate::upstream::Upstream;

pub use error::{AppError, ErrorBody, GENERIC_ERROR_MESSAGE};

#[derive(Debug, Clone)]
pub struct AppState {
    pub client: ScraperClient,
    pub upstream: Upstream,
    pub default_api_key: String,
}

impl AppState {
    pub fn from_config(
        config: &ServerConfig,
        shutdown: watch::Receiver<bool>,
    ) -> Result<Self, StartupError> {
        let client = ScraperClient::new(&config.scraper_endpoint, &config.target_site)?
            .with_timeout(config.upstream_timeout());
        let upstream = Upstream::new(shutdown)?;
        Ok(Self {
            client,
            upstream,
            default_api_key: config.default_api_key.clone(),
        })
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::health))
        .route("/products/{product_id}", get(routes::product_details))
        .route("/products/{product_id}/reviews", get(routes::product_reviews))
        .route("/products/{product_id}/offers", get(routes::product_offers))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(
    listener: TcpListener,
    state: AppState,
    mut shutdown: watch::Receiver<bool>,
) -> Result<(), std::io::Error> {
    axum::serve(listener, app(state))
        .with_graceful_shutdown(async move {
            let _ = shutdown.wait_for(|stop| *stop).await;
        })
        .await
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
