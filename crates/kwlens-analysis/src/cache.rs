//! Time-bounded memoization of fetcher results.
//!
//! Entries are keyed by endpoint plus normalized parameters and expire after
//! a fixed TTL. Only successful fetches are stored, so a failure is always
//! retried by the user's next run rather than served from cache.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

use kwlens_core::{KeywordRecord, TrendPoint};

const MAX_CACHE_ENTRIES: usize = 10_000;

/// `(endpoint, normalized parameters)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub endpoint: &'static str,
    pub params: String,
}

impl CacheKey {
    /// Parameters are trimmed and lower-cased so `" Coffee"` and `"coffee"`
    /// share an entry.
    #[must_use]
    pub fn new(endpoint: &'static str, params: &[&str]) -> Self {
        Self::join(endpoint, params.iter().map(|p| p.trim().to_lowercase()))
    }

    /// Parameters are trimmed only. Used where the cached value carries the
    /// parameter back out, as keyword-tool rows carry their seed.
    #[must_use]
    pub fn case_sensitive(endpoint: &'static str, params: &[&str]) -> Self {
        Self::join(endpoint, params.iter().map(|p| p.trim().to_string()))
    }

    fn join(endpoint: &'static str, params: impl Iterator<Item = String>) -> Self {
        let params = params.collect::<Vec<_>>().join("\u{1f}");
        Self { endpoint, params }
    }
}

#[derive(Debug, Clone)]
struct CacheEntry<T> {
    value: T,
    inserted_at: Instant,
}

/// A single-typed TTL map.
pub struct TtlCache<T> {
    ttl: Duration,
    entries: RwLock<HashMap<CacheKey, CacheEntry<T>>>,
}

impl<T: Clone> TtlCache<T> {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub async fn get(&self, key: &CacheKey) -> Option<T> {
        self.get_at(key, Instant::now()).await
    }

    async fn get_at(&self, key: &CacheKey, now: Instant) -> Option<T> {
        let entries = self.entries.read().await;
        let entry = entries.get(key)?;
        if now.saturating_duration_since(entry.inserted_at) < self.ttl {
            Some(entry.value.clone())
        } else {
            None
        }
    }

    pub async fn insert(&self, key: CacheKey, value: T) {
        self.insert_at(key, value, Instant::now()).await;
    }

    async fn insert_at(&self, key: CacheKey, value: T, now: Instant) {
        if self.ttl.is_zero() {
            return;
        }
        let mut entries = self.entries.write().await;
        if entries.len() >= MAX_CACHE_ENTRIES {
            let ttl = self.ttl;
            entries.retain(|_, v| now.saturating_duration_since(v.inserted_at) < ttl);
        }
        entries.insert(
            key,
            CacheEntry {
                value,
                inserted_at: now,
            },
        );
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

/// One cache per fetcher, sharing a TTL.
pub struct FetchCache {
    pub keywords: TtlCache<Vec<KeywordRecord>>,
    pub documents: TtlCache<u64>,
    pub trends: TtlCache<Vec<TrendPoint>>,
}

impl FetchCache {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            keywords: TtlCache::new(ttl),
            documents: TtlCache::new(ttl),
            trends: TtlCache::new(ttl),
        }
    }

    /// A cache that never stores anything.
    #[must_use]
    pub fn disabled() -> Self {
        Self::new(Duration::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_normalizes_params() {
        assert_eq!(
            CacheKey::new("search/webkr", &[" Coffee "]),
            CacheKey::new("search/webkr", &["coffee"])
        );
        assert_ne!(
            CacheKey::new("search/webkr", &["coffee"]),
            CacheKey::new("search/blog", &["coffee"])
        );
        assert_ne!(
            CacheKey::new("keywordstool", &["ab", "c"]),
            CacheKey::new("keywordstool", &["a", "bc"])
        );
    }

    #[test]
    fn case_sensitive_key_keeps_letter_case() {
        assert_eq!(
            CacheKey::case_sensitive("keywordstool", &[" Coffee ", "50"]),
            CacheKey::case_sensitive("keywordstool", &["Coffee", "50"])
        );
        assert_ne!(
            CacheKey::case_sensitive("keywordstool", &["Coffee", "50"]),
            CacheKey::case_sensitive("keywordstool", &["coffee", "50"])
        );
    }

    #[tokio::test]
    async fn returns_value_within_ttl() {
        let cache = TtlCache::new(Duration::from_secs(60));
        let key = CacheKey::new("search/webkr", &["coffee"]);
        let t0 = Instant::now();
        cache.insert_at(key.clone(), 42u64, t0).await;
        assert_eq!(cache.get_at(&key, t0 + Duration::from_secs(59)).await, Some(42));
    }

    #[tokio::test]
    async fn expires_after_ttl() {
        let cache = TtlCache::new(Duration::from_secs(60));
        let key = CacheKey::new("search/webkr", &["coffee"]);
        let t0 = Instant::now();
        cache.insert_at(key.clone(), 42u64, t0).await;
        assert_eq!(cache.get_at(&key, t0 + Duration::from_secs(60)).await, None);
    }

    #[tokio::test]
    async fn disabled_cache_stores_nothing() {
        let cache = FetchCache::disabled();
        let key = CacheKey::new("search/webkr", &["coffee"]);
        cache.documents.insert(key.clone(), 7).await;
        assert!(cache.documents.is_empty().await);
        assert_eq!(cache.documents.get(&key).await, None);
    }

    #[tokio::test]
    async fn missing_key_is_none() {
        let cache: TtlCache<u64> = TtlCache::new(Duration::from_secs(60));
        assert_eq!(
            cache.get(&CacheKey::new("search/webkr", &["tea"])).await,
            None
        );
        assert_eq!(cache.len().await, 0);
    }
}
