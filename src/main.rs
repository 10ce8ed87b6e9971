use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::info;

use pokesync::application::{PokemonService, SyncScheduler, SyncService};
use pokesync::domain::{CatalogClient, DetailResolver, PokemonRepository};
use pokesync::infrastructure::{
    AppConfig, DatabaseConnection, HttpClient, HttpClientConfig, PokeApiClient,
    SqlitePokemonRepository, init_logging,
};
use pokesync::web::routes::{self, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    let config_path = std::env::var_os("POKESYNC_CONFIG").map(PathBuf::from);
    let config = AppConfig::load(config_path.as_deref()).await?;
    init_logging(&config.logging)?;

    info!("starting pokesync {}", env!("CARGO_PKG_VERSION"));

    let db = DatabaseConnection::new(&config.database).await?;
    db.migrate().await?;

    let http = Arc::new(HttpClient::new(HttpClientConfig {
        timeout_seconds: config.pokeapi.request_timeout_seconds,
        max_requests_per_second: config.pokeapi.max_requests_per_second,
        ..Default::default()
    })?);
    let api_client = Arc::new(PokeApiClient::new(http, &config.pokeapi.base_url));
    let repository = Arc::new(SqlitePokemonRepository::new(db.pool().clone()));

    let sync_service = Arc::new(SyncService::new(
        Arc::clone(&api_client) as Arc<dyn CatalogClient>,
        api_client as Arc<dyn DetailResolver>,
        Arc::clone(&repository) as Arc<dyn PokemonRepository>,
        config.pokeapi.page_limit,
        config.pokeapi.max_concurrent_requests,
    ));
    let pokemon_service = Arc::new(PokemonService::new(
        repository as Arc<dyn PokemonRepository>,
        Arc::clone(&sync_service),
    ));

    let cancel = CancellationToken::new();
    let scheduler = SyncScheduler::new(
        sync_service,
        Duration::from_secs(config.sync.interval_hours * 3600),
    )?;
    let scheduler_task = tokio::spawn(scheduler.run_loop(cancel.child_token()));

    let state = Arc::new(AppState { pokemon_service });
    let app = routes::router(state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("invalid server address")?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    cancel.cancel();
    scheduler_task.await.ok();
    info!("shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown signal received");
    }
}
