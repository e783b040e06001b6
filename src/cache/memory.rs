use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::{future::Cache, Expiry};
use tracing::debug;

use super::{CacheError, CacheStore};

#[derive(Clone, Debug)]
struct CachedValue {
    body: String,
    ttl: Duration,
}

/// Expires each entry after the TTL it was written with. Overwriting an
/// entry restarts its lifetime.
struct PerEntryTtl;

impl Expiry<String, CachedValue> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &CachedValue,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &CachedValue,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

pub struct MemoryCacheStore {
    cache: Cache<String, CachedValue>,
}

impl MemoryCacheStore {
    pub fn new(max_entries: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .expire_after(PerEntryTtl)
            .build();

        Self { cache }
    }
}

impl Default for MemoryCacheStore {
    fn default() -> Self {
        Self::new(10_000)
    }
}

#[async_trait]
impl CacheStore for MemoryCacheStore {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let value = self.cache.get(key).await.map(|cached| cached.body);
        debug!(key = %key, hit = value.is_some(), "Memory cache lookup");
        Ok(value)
    }

    async fn set(&self, key: &str, value: String, ttl_secs: u64) -> Result<(), CacheError> {
        let cached = CachedValue {
            body: value,
            ttl: Duration::from_secs(ttl_secs),
        };
        self.cache.insert(key.to_string(), cached).await;
        debug!(key = %key, ttl_secs, "Memory cache set");
        Ok(())
    }
}
