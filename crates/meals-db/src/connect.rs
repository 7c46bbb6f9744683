//! Connection bootstrap with bounded retry
//!
//! The store is usually started alongside the service (docker compose and
//! friends), so the first connection attempts may land before it accepts
//! connections. Retrying happens once at startup only.

use crate::error::StoreError;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use tracing::{info, warn};

/// Fixed attempt count with a fixed delay between attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 10,
            delay: Duration::from_secs(2),
        }
    }
}

/// Connect to the database, retrying per `policy` before giving up
pub async fn connect_with_retry(
    database_url: &str,
    policy: RetryPolicy,
) -> Result<PgPool, StoreError> {
    info!("Connecting to database...");
    let pool = retry(policy, || {
        PgPoolOptions::new()
            .max_connections(20)
            .acquire_timeout(Duration::from_secs(5))
            .connect(database_url)
    })
    .await?;
    info!("Database connection established");
    Ok(pool)
}

/// Run `op` until it succeeds or `policy.attempts` is exhausted, returning the last error
pub async fn retry<T, E, F, Fut>(policy: RetryPolicy, mut op: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let attempts = policy.attempts.max(1);
    let mut attempt = 1;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if attempt < attempts => {
                warn!(attempt, attempts, error = %e, "Connection attempt failed, retrying");
                tokio::time::sleep(policy.delay).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
