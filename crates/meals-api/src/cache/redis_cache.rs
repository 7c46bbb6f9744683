use super::{CacheBackend, CacheError};
use async_trait::async_trait;
use redis::aio::{ConnectionManager, ConnectionManagerConfig};
use redis::AsyncCommands;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::info;

/// Redis-backed cache.
///
/// The connection is opened lazily. If Redis is down when the service starts
/// (or when the first request arrives) every operation retries the connect,
/// so the cache starts working as soon as Redis becomes reachable.
pub struct RedisCache {
    client: redis::Client,
    conn: RwLock<Option<ConnectionManager>>,
}

impl RedisCache {
    const CONNECT_TIMEOUT: Duration = Duration::from_secs(1);
    const RESPONSE_TIMEOUT: Duration = Duration::from_secs(1);

    /// Build a client for `redis://host:port`. Does not connect.
    pub fn new(url: &str) -> Result<Self, CacheError> {
        let client = redis::Client::open(url)?;
        Ok(Self {
            client,
            conn: RwLock::new(None),
        })
    }

    /// Establish the connection now instead of on first use
    pub async fn connect(&self) -> Result<(), CacheError> {
        self.connection().await.map(|_| ())
    }

    async fn connection(&self) -> Result<ConnectionManager, CacheError> {
        if let Some(conn) = self.conn.read().await.as_ref() {
            return Ok(conn.clone());
        }

        // One attempt per call; a down cache must fail fast, not stall requests
        let config = ConnectionManagerConfig::new()
            .set_number_of_retries(0)
            .set_connection_timeout(Self::CONNECT_TIMEOUT)
            .set_response_timeout(Self::RESPONSE_TIMEOUT);
        let conn = ConnectionManager::new_with_config(self.client.clone(), config).await?;
        info!("Connected to Redis");

        let mut slot = self.conn.write().await;
        Ok(slot.get_or_insert(conn).clone())
    }
}

#[async_trait]
impl CacheBackend for RedisCache {
    fn name(&self) -> &'static str {
        "redis"
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let mut conn = self.connection().await?;
        let value: Option<Vec<u8>> = conn.get(key).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Duration) -> Result<(), CacheError> {
        let mut conn = self.connection().await?;
        let _: () = conn.set_ex(key, value, ttl.as_secs().max(1)).await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        let mut conn = self.connection().await?;
        let _: () = conn.del(key).await?;
        Ok(())
    }
}
