//! Cache layer for the meals collection
//!
//! The cache is an accelerator only. Backends report failures as
//! [`CacheError`]; [`MealsSnapshot`] swallows them so a broken cache
//! degrades to "always read the store", never to a failed request.

mod memory;
mod redis_cache;
mod snapshot;

pub use memory::MemoryCache;
pub use redis_cache::RedisCache;
pub use snapshot::{CacheStats, Lookup, MealsSnapshot, MEALS_KEY, SNAPSHOT_TTL};

use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

use crate::config::CacheBackendKind;

/// Key/value store with expiring entries
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Short name reported by the health endpoint
    fn name(&self) -> &'static str;

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    async fn set(&self, key: &str, value: &[u8], ttl: Duration) -> Result<(), CacheError>;

    async fn delete(&self, key: &str) -> Result<(), CacheError>;
}

#[derive(Debug)]
pub enum CacheError {
    /// Could not reach the cache server
    Connection(String),
    /// The cache server rejected or failed a command
    Command(String),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheError::Connection(msg) => write!(f, "Cache connection error: {}", msg),
            CacheError::Command(msg) => write!(f, "Cache command error: {}", msg),
        }
    }
}

impl std::error::Error for CacheError {}

impl From<redis::RedisError> for CacheError {
    fn from(err: redis::RedisError) -> Self {
        if err.is_io_error() || err.is_connection_refusal() || err.is_timeout() {
            CacheError::Connection(err.to_string())
        } else {
            CacheError::Command(err.to_string())
        }
    }
}

/// Backend that never stores anything; every read is a miss
#[derive(Debug, Default)]
pub struct NoopCache;

#[async_trait]
impl CacheBackend for NoopCache {
    fn name(&self) -> &'static str {
        "none"
    }

    async fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: &[u8], _ttl: Duration) -> Result<(), CacheError> {
        Ok(())
    }

    async fn delete(&self, _key: &str) -> Result<(), CacheError> {
        Ok(())
    }
}

/// Build the configured backend.
///
/// An unreachable Redis is not fatal: the failure is logged and the client
/// keeps trying to connect on later requests. Only an unparseable URL errors.
pub async fn from_config(
    kind: CacheBackendKind,
    redis_url: &str,
) -> Result<Arc<dyn CacheBackend>, CacheError> {
    match kind {
        CacheBackendKind::Redis => {
            let cache = RedisCache::new(redis_url)?;
            if let Err(e) = cache.connect().await {
                warn!(error = %e, "Redis unreachable at startup, reads will go to the store");
            }
            Ok(Arc::new(cache))
        }
        CacheBackendKind::Memory => Ok(Arc::new(MemoryCache::new())),
        CacheBackendKind::None => Ok(Arc::new(NoopCache)),
    }
}
