use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use food_swap_api::{
    config::Config,
    create_router,
    db::{
        self, Cache, CatalogStore, HistoryStore, InMemoryCatalog, InMemoryHistory, PgCatalogStore,
        PgHistoryStore,
    },
    services::{CachedRecommendationEngine, HttpRecommendationEngine, RecommendationEngine},
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let (catalog, history): (Arc<dyn CatalogStore>, Arc<dyn HistoryStore>) =
        match &config.database_url {
            Some(url) => {
                let pool = db::create_pool(url, config.database_max_connections).await?;
                db::run_migrations(&pool).await?;
                tracing::info!("Connected to PostgreSQL");
                (
                    Arc::new(PgCatalogStore::new(pool.clone())) as Arc<dyn CatalogStore>,
                    Arc::new(PgHistoryStore::new(pool)) as Arc<dyn HistoryStore>,
                )
            }
            None => {
                tracing::warn!("DATABASE_URL not set, using in-memory stores");
                (
                    Arc::new(InMemoryCatalog::new()) as Arc<dyn CatalogStore>,
                    Arc::new(InMemoryHistory::new()) as Arc<dyn HistoryStore>,
                )
            }
        };

    if let Some(path) = &config.catalog_seed_path {
        db::seed_catalog(catalog.as_ref(), path).await?;
    }

    let http_engine = HttpRecommendationEngine::new(
        config.engine_url.clone(),
        Duration::from_secs(config.engine_timeout_secs),
    )?;

    let mut cache_writer = None;
    let engine: Arc<dyn RecommendationEngine> = match &config.redis_url {
        Some(url) => {
            let client = db::create_redis_client(url)?;
            let (cache, handle) = Cache::new(client).await;
            cache_writer = Some(handle);
            tracing::info!(ttl = config.recommendation_cache_ttl, "Caching engine responses in Redis");
            Arc::new(CachedRecommendationEngine::new(
                Arc::new(http_engine),
                cache,
                config.recommendation_cache_ttl,
            ))
        }
        None => Arc::new(http_engine),
    };

    tracing::info!(
        engine_url = %config.engine_url,
        features = ?config.selected_features,
        "Recommendation engine configured"
    );

    let state = Arc::new(AppState::new(
        catalog,
        history,
        engine,
        config.selected_features.clone(),
    ));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    tracing::info!(addr = %config.bind_addr(), "Server running");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutdown signal received");
        })
        .await?;

    if let Some(handle) = cache_writer {
        handle.shutdown().await;
    }

    Ok(())
}
