use super::{CacheBackend, CacheError};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Key holding the serialized meal collection
pub const MEALS_KEY: &str = "meals";

/// How long a collection snapshot may be served before it must be recomputed
pub const SNAPSHOT_TTL: Duration = Duration::from_secs(10);

/// Counters exposed on the health endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub backend: &'static str,
    pub hits: u64,
    pub misses: u64,
    pub errors: u64,
}

/// Outcome of reading the snapshot
#[derive(Debug, PartialEq, Eq)]
pub enum Lookup {
    Hit(Vec<u8>),
    Miss,
    /// The cache server could not be reached; a write now would wait out the
    /// same connect timeout, so callers skip it
    Unreachable,
}

#[derive(Default)]
struct Counters {
    hits: AtomicU64,
    misses: AtomicU64,
    errors: AtomicU64,
}

/// The single cached entry: the whole meal collection as JSON bytes.
///
/// None of these operations fail. A backend error on read counts as a miss
/// (reported as `Unreachable` when the server could not be reached); a
/// backend error on write or invalidate is logged and dropped.
#[derive(Clone)]
pub struct MealsSnapshot {
    backend: Arc<dyn CacheBackend>,
    ttl: Duration,
    counters: Arc<Counters>,
}

impl MealsSnapshot {
    pub fn new(backend: Arc<dyn CacheBackend>) -> Self {
        Self {
            backend,
            ttl: SNAPSHOT_TTL,
            counters: Arc::new(Counters::default()),
        }
    }

    pub async fn fetch(&self) -> Lookup {
        match self.backend.get(MEALS_KEY).await {
            Ok(Some(bytes)) => {
                debug!("Cache hit");
                self.counters.hits.fetch_add(1, Ordering::Relaxed);
                Lookup::Hit(bytes)
            }
            Ok(None) => {
                debug!("Cache miss");
                self.counters.misses.fetch_add(1, Ordering::Relaxed);
                Lookup::Miss
            }
            Err(e) => {
                warn!(error = %e, "Cache read failed, treating as miss");
                self.counters.errors.fetch_add(1, Ordering::Relaxed);
                self.counters.misses.fetch_add(1, Ordering::Relaxed);
                match e {
                    CacheError::Connection(_) => Lookup::Unreachable,
                    CacheError::Command(_) => Lookup::Miss,
                }
            }
        }
    }

    /// Replace the cached collection with `bytes` for the snapshot TTL
    pub async fn store(&self, bytes: &[u8]) {
        if let Err(e) = self.backend.set(MEALS_KEY, bytes, self.ttl).await {
            warn!(error = %e, "Cache write failed");
            self.counters.errors.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Drop the cached collection so the next read goes to the store
    pub async fn invalidate(&self) {
        if let Err(e) = self.backend.delete(MEALS_KEY).await {
            warn!(error = %e, "Cache invalidation failed");
            self.counters.errors.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            backend: self.backend.name(),
            hits: self.counters.hits.load(Ordering::Relaxed),
            misses: self.counters.misses.load(Ordering::Relaxed),
            errors: self.counters.errors.load(Ordering::Relaxed),
        }
    }
}
