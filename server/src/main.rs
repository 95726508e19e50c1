use anyhow::Context;
use clap::Parser;
use product_proxy::{config::ServerConfig, logger, AppState};
use tokio::{net::TcpListener, sync::watch};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();
    logger::init_logger(config.verbose);

    tracing::info!("Starting product-proxy");
    tracing::debug!(
        endpoint = %config.scraper_endpoint,
        target_site = %config.target_site,
        timeout_secs = config.upstream_timeout_secs,
        "Upstream configured"
    );
    if config.uses_placeholder_key() {
        tracing::warn!(
            "SCRAPER_API_KEY is not set; requests without an api_key parameter \
             will fail provider authentication"
        );
    }

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let state = AppState::from_config(&config, shutdown_rx.clone())?;

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("App listening on {}", listener.local_addr()?);

    tokio::spawn(async move {
        product_proxy::shutdown_signal().await;
        tracing::info!("Shutdown requested, draining connections");
        let _ = shutdown_tx.send(true);
    });

    product_proxy::run(listener, state, shutdown_rx).await?;
    tracing::info!("Server stopped");
    Ok(())
}
