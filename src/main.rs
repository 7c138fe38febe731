mod model;
mod server;

use std::{sync::Arc, time::Duration};

use tracing_subscriber::EnvFilter;

use crate::server::{
    config::Config,
    error::AppError,
    scheduler::cache_sweep,
    service::{
        cache::ListingCache,
        notification::{self, EventDispatcher},
    },
    startup,
    state::AppState,
    storage::LocalDiskStore,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;

    // Check for admin users and issue a bootstrap token if none exist
    startup::check_for_admin(&db).await?;

    let (events, receiver) = EventDispatcher::channel();
    tokio::spawn(notification::run_worker(db.clone(), receiver));

    let listing_cache = ListingCache::new(Duration::from_secs(config.listing_cache_ttl_secs));
    let sweep_cache = listing_cache.clone();
    tokio::spawn(async move {
        if let Err(e) = cache_sweep::start_scheduler(sweep_cache).await {
            tracing::error!("Cache sweep scheduler error: {}", e);
        }
    });

    let blob_store = Arc::new(LocalDiskStore::new(
        config.media_root.clone(),
        config.media_base_url.clone(),
    ));

    let app = server::router::router().with_state(AppState::new(
        db,
        listing_cache,
        events,
        blob_store,
    ));

    let listener = tokio::net::TcpListener::bind(config.bind_address).await?;
    tracing::info!("Listening on {}", config.bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
