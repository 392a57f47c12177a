use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use busgohome_server::config::ServerConfig;
use busgohome_server::network::load_dir;
use busgohome_server::planner::SnapshotStore;
use busgohome_server::ratings::RatingBook;
use busgohome_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig::from_env().expect("Invalid configuration");

    // Load route data (fail fast if unavailable)
    info!(dir = %config.data_dir.display(), "Loading route data");
    let network = load_dir(&config.data_dir).expect("Failed to load route data");
    let snapshot =
        Arc::new(SnapshotStore::new(network).expect("Failed to build route graph"));

    // Spawn background task to reload route data
    if let Some(period) = config.reload_interval {
        let snapshot_reload = snapshot.clone();
        let data_dir = config.data_dir.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.tick().await; // First tick is immediate, skip it
            loop {
                interval.tick().await;
                let dir = data_dir.clone();
                let store = snapshot_reload.clone();
                let result = tokio::task::spawn_blocking(move || {
                    let network = load_dir(&dir).map_err(|e| e.to_string())?;
                    store.replace(network).map_err(|e| e.to_string())
                })
                .await;
                match result {
                    Ok(Ok(())) => info!("Reloaded route data"),
                    Ok(Err(e)) => error!(error = %e, "Failed to reload route data"),
                    Err(e) => error!(error = %e, "Reload task panicked"),
                }
            }
        });
    }

    let state = AppState::new(snapshot, RatingBook::new(), config.planner.clone());
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .expect("Failed to bind listener");
    info!(addr = %config.addr, "Bus journey planner listening");
    info!("  GET  /health");
    info!("  GET  /stops/{{code}}");
    info!("  GET  /services/{{service}}-{{direction}}/stops");
    info!("  GET  /services/{{service}}-{{direction}}/rating");
    info!("  POST /services/{{service}}-{{direction}}/rating");
    info!("  GET  /locations/{{longitude}}-{{latitude}}/nearbyStops");
    info!("  GET  /roads/{{road}}/stops");
    info!("  GET  /journeys/{{origin}}-{{destination}}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
