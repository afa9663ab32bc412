mod api;

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState};
use dzshop_shipping::{FileCacheStore, WilayaShipping, ZoneRepository};
use dzshop_woo::WooClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = dzshop_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let woo = Arc::new(WooClient::new(
        &config.store_url,
        &config.consumer_key,
        &config.consumer_secret,
        config.http_timeout_secs,
        config.woo_max_retries,
        config.woo_retry_backoff_base_ms,
    )?);

    // The repository consumes this server's own aggregated endpoint, the
    // same path the storefront UI hits.
    let zones_url = config
        .zones_url
        .clone()
        .unwrap_or_else(|| format!("http://127.0.0.1:{}/api/shipping", config.bind_addr.port()));
    let store = Arc::new(FileCacheStore::new(config.cache_dir.clone()));
    let repo = Arc::new(ZoneRepository::with_cache(
        &zones_url,
        config.http_timeout_secs,
        Duration::from_secs(config.zones_ttl_secs),
        store,
    )?);
    let wilaya = Arc::new(WilayaShipping::new(Arc::clone(&repo)));

    let app = build_app(AppState { woo, wilaya });

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "dzshop server listening");

    // Warm the zone cache so the first checkout render finds it populated.
    // The listener is already bound, so the self-request queues until the
    // server starts accepting.
    repo.preload();

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
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
