use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands};
use tracing::debug;

use super::{CacheError, CacheStore};

/// Redis-backed store. The connection manager reconnects on its own; each
/// call works on a cheap clone of it.
#[derive(Clone)]
pub struct RedisCacheStore {
    conn: ConnectionManager,
}

impl RedisCacheStore {
    pub async fn connect(url: &str) -> Result<Self, CacheError> {
        let client = redis::Client::open(url)?;
        let conn = ConnectionManager::new(client).await?;
        Ok(Self { conn })
    }
}

#[async_trait]
impl CacheStore for RedisCacheStore {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn.get(key).await?;
        debug!(key = %key, hit = value.is_some(), "Redis cache lookup");
        Ok(value)
    }

    async fn set(&self, key: &str, value: String, ttl_secs: u64) -> Result<(), CacheError> {
        let mut conn = self.conn.clone();
        conn.set_ex::<_, _, ()>(key, value, ttl_secs).await?;
        debug!(key = %key, ttl_secs, "Redis cache set");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use testcontainers_modules::{redis::Redis, testcontainers::runners::AsyncRunner};

    #[tokio::test]
    async fn test_connect_rejects_invalid_url() {
        let result = RedisCacheStore::connect("not a redis url").await;
        assert!(matches!(result, Err(CacheError::Redis(_))));
    }

    #[tokio::test]
    async fn test_connect_unreachable_server() {
        let result = RedisCacheStore::connect("redis://127.0.0.1:1/").await;
        assert!(matches!(result, Err(CacheError::Redis(_))));
    }

    #[tokio::test]
    #[ignore = "requires Docker"]
    async fn test_set_get_and_expiry() {
        let container = Redis::default().start().await.unwrap();
        let host = container.get_host().await.unwrap();
        let port = container.get_host_port_ipv4(6379).await.unwrap();
        let store = RedisCacheStore::connect(&format!("redis://{}:{}/", host, port))
            .await
            .unwrap();

        assert!(store.get("Manaus").await.unwrap().is_none());

        store
            .set("Manaus", "{\"temperature\":31}".to_string(), 1)
            .await
            .unwrap();
        assert_eq!(
            store.get("Manaus").await.unwrap().as_deref(),
            Some("{\"temperature\":31}")
        );
        assert!(store.get("manaus").await.unwrap().is_none());

        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert!(store.get("Manaus").await.unwrap().is_none());
    }
}
