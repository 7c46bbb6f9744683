//! Meals API server

use meals_api::cache::{self, MealsSnapshot};
use meals_api::store::PgMealStore;
use meals_api::{cors_layer, create_router, start_server, AppState, Config, Result};
use meals_db::RetryPolicy;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let env_filter = EnvFilter::from_default_env()
        .add_directive("meals_api=info".parse()?)
        .add_directive("meals_db=info".parse()?);

    // Use JSON format for structured log collection when LOG_FORMAT=json
    if std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false)
    {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_stackdriver::layer())
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    };

    let config = Config::from_env()?;
    info!(port = config.port, cache = ?config.cache_backend, "Starting meals-api");

    // The store must be reachable before serving; the cache need not be
    let pool = meals_db::connect_with_retry(&config.database_url, RetryPolicy::default()).await?;
    meals_db::migrate::migrate(&pool).await?;

    let backend = cache::from_config(config.cache_backend, &config.redis_url).await?;

    let state = AppState::new(
        Arc::new(PgMealStore::new(pool)),
        MealsSnapshot::new(backend),
    );
    let router = create_router(state).layer(cors_layer(&config.cors_origins));

    start_server(router, config.port).await?;

    Ok(())
}
