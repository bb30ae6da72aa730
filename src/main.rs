mod auth;
mod config;
mod connectivity;
mod error;
mod kv;
mod metrics;
mod server;
mod shadow;
mod status;
#[cfg(test)]
mod testing;

use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing::info;

use auth::IdentityService;
use config::AppConfig;
use connectivity::redis_index::RedisConnectivityIndex;
use kv::redis_kv::RedisRegistrationStore;
use metrics::Metrics;
use server::http_handler::{router, HttpState};
use shadow::redis_shadow::RedisShadowStore;
use status::service::DeviceStatusResolver;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "device_status=debug,info".into()),
        )
        .init();

    let cfg = AppConfig::load("config/device-status")?;
    info!(service = cfg.service.name, "starting device status service");

    // connect to redis
    let redis_client = redis::Client::open(cfg.store.address.as_str())
        .context("invalid store address")?;
    let redis_conn = redis_client
        .get_multiplexed_async_connection()
        .await
        .context("failed to connect to store")?;

    let registrations: Arc<dyn kv::RegistrationStore> = Arc::new(RedisRegistrationStore::new(
        redis_conn.clone(),
        cfg.store.registration_prefix.clone(),
    ));
    let shadows: Arc<dyn shadow::DeviceStateStore> = Arc::new(RedisShadowStore::new(
        redis_conn.clone(),
        cfg.store.shadow_prefix.clone(),
    ));
    let connectivity: Arc<dyn connectivity::ConnectivityIndex> = Arc::new(
        RedisConnectivityIndex::new(redis_conn, cfg.store.connectivity_prefix.clone()),
    );

    let metrics = Arc::new(Metrics::new());
    let resolver = Arc::new(DeviceStatusResolver::new(
        registrations,
        shadows,
        connectivity,
        metrics.clone(),
    ));

    let state = Arc::new(HttpState {
        resolver,
        identity: Arc::new(IdentityService::new(cfg.identity.clone())),
        metrics,
    });
    let app = router(state);

    let http_addr: std::net::SocketAddr = cfg.http.address.parse()?;
    let http_listener = tokio::net::TcpListener::bind(http_addr).await?;

    info!(address = %cfg.http.address, "http server starting");

    // serve until ctrl-c
    tokio::select! {
        result = axum::serve(http_listener, app) => {
            if let Err(e) = result {
                tracing::error!("http server error: {}", e);
            }
        }
        _ = signal::ctrl_c() => {
            info!("received shutdown signal");
        }
    }

    info!("device status service stopped");
    Ok(())
}
