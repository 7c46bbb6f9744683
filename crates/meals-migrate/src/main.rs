//! Runs the meals schema migrations against the configured database and exits.
//!
//! Reads the same `DATABASE_URL` / `DB_*` variables as the API and retries the
//! initial connection the same way.

use meals_db::RetryPolicy;
use tracing::{error, info};
use tracing_subscriber::{prelude::*, EnvFilter};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let env_filter = EnvFilter::from_default_env()
        .add_directive("meals_migrate=info".parse()?)
        .add_directive("meals_db=info".parse()?);

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

    let database_url = meals_db::config::database_url_from_env();

    let pool = meals_db::connect_with_retry(&database_url, RetryPolicy::default())
        .await
        .inspect_err(|e| error!(error = %e, "Could not connect to database"))?;

    meals_db::migrate::migrate(&pool)
        .await
        .inspect_err(|e| error!(error = %e, "Migration failed"))?;

    pool.close().await;
    info!("Done");
    Ok(())
}
