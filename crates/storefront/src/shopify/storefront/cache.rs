//! In-process cache for read query responses.

use std::sync::Arc;
use std::time::{Duration, Instant};

use moka::Expiry;
use moka::future::Cache;

use crate::config::ShopifyStorefrontConfig;

/// A cached `data` object and the TTL it was stored with.
#[derive(Debug, Clone)]
struct CacheEntry {
    data: Arc<serde_json::Value>,
    ttl: Duration,
}

/// Expires each entry after its own TTL, counted from the last write.
struct PerEntryTtl;

impl Expiry<String, CacheEntry> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &CacheEntry,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &CacheEntry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// Response cache keyed by operation document and variables.
///
/// Cloning is cheap; clones share storage. Entries are evicted on expiry
/// or, once `max_capacity` is reached, by least-recent use.
#[derive(Clone)]
pub struct ResponseCache {
    inner: Cache<String, CacheEntry>,
    default_ttl: Duration,
}

impl ResponseCache {
    /// Build a cache sized and timed from configuration.
    #[must_use]
    pub fn new(config: &ShopifyStorefrontConfig) -> Self {
        Self::with_capacity(config.cache_max_entries, config.cache_ttl)
    }

    /// Build a cache with explicit bounds.
    #[must_use]
    pub fn with_capacity(max_capacity: u64, default_ttl: Duration) -> Self {
        let inner = Cache::builder()
            .max_capacity(max_capacity)
            .expire_after(PerEntryTtl)
            .build();
        Self { inner, default_ttl }
    }

    /// TTL applied when `set` is called without one.
    #[must_use]
    pub const fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Look up an unexpired entry.
    pub async fn get(&self, key: &str) -> Option<Arc<serde_json::Value>> {
        self.inner.get(key).await.map(|entry| entry.data)
    }

    /// Store `data` under `key`, replacing any previous entry.
    pub async fn set(&self, key: String, data: serde_json::Value, ttl: Option<Duration>) {
        let entry = CacheEntry {
            data: Arc::new(data),
            ttl: ttl.unwrap_or(self.default_ttl),
        };
        self.inner.insert(key, entry).await;
    }

    /// Drop every entry.
    pub async fn clear(&self) {
        self.inner.invalidate_all();
        self.inner.run_pending_tasks().await;
    }

    /// Approximate number of live entries.
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.inner.entry_count()
    }
}

impl std::fmt::Debug for ResponseCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseCache")
            .field("entries", &self.inner.entry_count())
            .field("default_ttl", &self.default_ttl)
            .finish()
    }
}

/// Cache key for an operation: the document text, a colon, then the
/// variables as compact JSON.
#[must_use]
pub fn cache_key(document: &str, variables: &serde_json::Value) -> String {
    format!("{document}:{variables}")
}
