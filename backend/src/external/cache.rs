//! In-memory response cache with a fixed time-to-live

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
struct CachedEntry<V> {
    value: V,
    expires_at: Instant,
}

/// Per-process cache shared by clones; a zero TTL disables it
#[derive(Debug, Clone)]
pub struct TtlCache<K, V> {
    entries: Arc<RwLock<HashMap<K, CachedEntry<V>>>>,
    ttl: Duration,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    pub fn is_enabled(&self) -> bool {
        !self.ttl.is_zero()
    }

    /// Cached value if present and not expired
    pub async fn get(&self, key: &K) -> Option<V> {
        if !self.is_enabled() {
            return None;
        }
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|entry| entry.expires_at > Instant::now())
            .map(|entry| entry.value.clone())
    }

    pub async fn insert(&self, key: K, value: V) {
        if !self.is_enabled() {
            return;
        }
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        entries.retain(|_, entry| entry.expires_at > now);
        entries.insert(
            key,
            CachedEntry {
                value,
                expires_at: now + self.ttl,
            },
        );
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hit_within_ttl() {
        let cache = TtlCache::new(Duration::from_secs(60));
        cache.insert("45,-122".to_string(), 21).await;
        assert_eq!(cache.get(&"45,-122".to_string()).await, Some(21));
        assert_eq!(cache.get(&"0,0".to_string()).await, None);
    }

    #[tokio::test]
    async fn test_expired_entries_are_misses() {
        let cache = TtlCache::new(Duration::from_millis(20));
        cache.insert(1u8, "a").await;
        tokio::time::sleep(Duration::from_millis(40)).await;
        assert_eq!(cache.get(&1).await, None);

        cache.insert(2u8, "b").await;
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_zero_ttl_disables() {
        let cache = TtlCache::new(Duration::ZERO);
        cache.insert(1u8, "a").await;
        assert!(!cache.is_enabled());
        assert_eq!(cache.get(&1).await, None);
        assert_eq!(cache.len().await, 0);
    }

    #[tokio::test]
    async fn test_clones_share_entries() {
        let cache = TtlCache::new(Duration::from_secs(60));
        let other = cache.clone();
        cache.insert(7u8, 70).await;
        assert_eq!(other.get(&7).await, Some(70));
    }
}
