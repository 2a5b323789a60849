//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, cache setup, worker spawning, and Axum server lifecycle.

use crate::application::services::{
    AuthService, RedirectResolver, SlugRegistry, SlugService, StatsService, TargetService,
};
use crate::config::Config;
use crate::domain::hit_worker::run_hit_worker;
use crate::infrastructure::cache::{CacheService, NullCache, RedisCache};
use crate::infrastructure::persistence::{PgHitRepository, PgTargetRepository};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool and migrations
/// - Redis cache (or NullCache fallback)
/// - Background hit worker
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations").run(&pool).await?;

    let cache: Arc<dyn CacheService> = if let Some(redis_url) = &config.redis_url {
        match RedisCache::connect(redis_url, config.cache_ttl_seconds).await {
            Ok(redis) => {
                tracing::info!("Cache enabled (Redis)");
                Arc::new(redis)
            }
            Err(e) => {
                tracing::warn!("Failed to connect to Redis: {}. Using NullCache.", e);
                Arc::new(NullCache::new())
            }
        }
    } else {
        tracing::info!("Cache disabled (NullCache)");
        Arc::new(NullCache::new())
    };

    let pool = Arc::new(pool);
    let target_repository = Arc::new(PgTargetRepository::new(pool.clone()));
    let hit_repository = Arc::new(PgHitRepository::new(pool.clone()));

    let (hit_tx, hit_rx) = mpsc::channel(config.hit_queue_capacity);
    tokio::spawn(run_hit_worker(hit_rx, hit_repository.clone()));
    tracing::info!("Hit worker started");

    let registry = Arc::new(SlugRegistry::new(target_repository.clone(), cache.clone()));

    let state = AppState {
        targets: Arc::new(TargetService::new(
            target_repository.clone(),
            registry.clone(),
            config.allowed_object_types.clone(),
            config.allowed_taxonomies.clone(),
            config.base_url.clone(),
            config.utm_config(),
            config.redirects_enabled,
        )),
        slugs: Arc::new(SlugService::new(
            target_repository.clone(),
            registry.clone(),
            config.allowed_object_types.clone(),
            config.allowed_taxonomies.clone(),
        )),
        resolver: Arc::new(RedirectResolver::new(
            registry,
            target_repository.clone(),
            cache.clone(),
            config.utm_config(),
            config.redirects_enabled,
        )),
        stats: Arc::new(StatsService::new(hit_repository, target_repository)),
        auth: Arc::new(AuthService::new(&config.admin_token)),
        cache,
        hit_tx,
    };

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install Ctrl+C handler: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received");
}
