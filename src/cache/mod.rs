//! Expiring key-value storage for normalized weather records.
//!
//! - `MemoryCacheStore`: in-process moka cache with per-entry TTL
//! - `RedisCacheStore`: shared Redis instance, entries written with `SET EX`

mod memory;
mod redis_store;

use async_trait::async_trait;
use thiserror::Error;

pub use memory::MemoryCacheStore;
pub use redis_store::RedisCacheStore;

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),
}

/// Storage capability used by the gateway.
///
/// Values are stored and returned as the exact serialized bytes handed to
/// clients. Per-key `get`/`set` are atomic in every backend.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Returns `None` if the key doesn't exist or has expired.
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Store `value` under `key`, replacing any previous value and its TTL.
    async fn set(&self, key: &str, value: String, ttl_secs: u64) -> Result<(), CacheError>;
}
