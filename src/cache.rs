//! Time-bounded memo of lookup results keyed by normalized name.
//!
//! Entries older than the TTL read as absent and are dropped on access.
//! There is no background sweep: expired entries are purged only when an
//! insert finds the map at capacity, and if that frees nothing the oldest
//! entry is evicted.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// Default time-to-live (15 minutes).
pub const DEFAULT_TTL: Duration = Duration::from_secs(15 * 60);

/// Default maximum number of entries.
pub const DEFAULT_MAX_ENTRIES: usize = 1000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub expirations: u64,
    pub current_size: usize,
    pub capacity: usize,
}

struct Entry<V> {
    value: V,
    inserted_at: Instant,
}

struct Inner<V> {
    entries: HashMap<String, Entry<V>>,
    stats: CacheStats,
}

pub struct TtlCache<V> {
    ttl: Duration,
    max_entries: usize,
    inner: Mutex<Inner<V>>,
}

impl<V: Clone> TtlCache<V> {
    pub fn new(ttl: Duration, max_entries: usize) -> Self {
        let max_entries = max_entries.max(1);
        Self {
            ttl,
            max_entries,
            inner: Mutex::new(Inner {
                entries: HashMap::new(),
                stats: CacheStats {
                    capacity: max_entries,
                    ..CacheStats::default()
                },
            }),
        }
    }

    pub fn get(&self, key: &str) -> Option<V> {
        self.get_at(key, Instant::now())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn insert(&self, key: impl Into<String>, value: V) {
        self.insert_at(key.into(), value, Instant::now());
    }

    pub(crate) fn get_at(&self, key: &str, now: Instant) -> Option<V> {
        let mut inner = self.inner.lock();
        let fresh = match inner.entries.get(key) {
            Some(entry) if now.saturating_duration_since(entry.inserted_at) < self.ttl => {
                Some(entry.value.clone())
            }
            Some(_) => {
                inner.entries.remove(key);
                inner.stats.expirations += 1;
                None
            }
            None => None,
        };
        match fresh {
            Some(_) => inner.stats.hits += 1,
            None => inner.stats.misses += 1,
        }
        inner.stats.current_size = inner.entries.len();
        fresh
    }

    pub(crate) fn insert_at(&self, key: String, value: V, now: Instant) {
        let mut inner = self.inner.lock();

        if !inner.entries.contains_key(&key) && inner.entries.len() >= self.max_entries {
            let before = inner.entries.len();
            let ttl = self.ttl;
            inner
                .entries
                .retain(|_, entry| now.saturating_duration_since(entry.inserted_at) < ttl);
            let purged = before - inner.entries.len();
            inner.stats.expirations += purged as u64;

            if inner.entries.len() >= self.max_entries {
                let oldest = inner
                    .entries
                    .iter()
                    .min_by_key(|(_, entry)| entry.inserted_at)
                    .map(|(key, _)| key.clone());
                if let Some(oldest) = oldest {
                    inner.entries.remove(&oldest);
                    inner.stats.evictions += 1;
                    log::debug!("Cache full, evicted oldest entry '{oldest}'");
                }
            }
        }

        inner.entries.insert(
            key,
            Entry {
                value,
                inserted_at: now,
            },
        );
        inner.stats.current_size = inner.entries.len();
    }

    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.entries.clear();
        inner.stats.current_size = 0;
    }

    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats
    }
}

impl<V: Clone> Default for TtlCache<V> {
    fn default() -> Self {
        Self::new(DEFAULT_TTL, DEFAULT_MAX_ENTRIES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_hit_and_miss() {
        let cache = TtlCache::default();
        cache.insert("pikachu", 25u32);
        assert_eq!(cache.get("pikachu"), Some(25));
        assert_eq!(cache.get("raichu"), None);
        assert!(cache.contains("pikachu"));

        let stats = cache.stats();
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.current_size, 1);
        assert_eq!(stats.capacity, DEFAULT_MAX_ENTRIES);
    }

    #[test]
    fn test_entries_expire() {
        let cache = TtlCache::new(Duration::from_secs(60), 10);
        let start = Instant::now();
        cache.insert_at("eevee".to_string(), 133u32, start);

        assert_eq!(cache.get_at("eevee", start + Duration::from_secs(59)), Some(133));
        assert_eq!(cache.get_at("eevee", start + Duration::from_secs(60)), None);
        assert_eq!(cache.len(), 0);
        assert_eq!(cache.stats().expirations, 1);
    }

    #[test]
    fn test_full_cache_purges_expired_first() {
        let cache = TtlCache::new(Duration::from_secs(60), 2);
        let start = Instant::now();
        cache.insert_at("old".to_string(), 1u32, start);
        cache.insert_at("fresh".to_string(), 2, start + Duration::from_secs(30));

        let later = start + Duration::from_secs(70);
        cache.insert_at("new".to_string(), 3, later);

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get_at("fresh", later), Some(2));
        assert_eq!(cache.get_at("new", later), Some(3));
        assert_eq!(cache.stats().evictions, 0);
        assert_eq!(cache.stats().expirations, 1);
    }

    #[test]
    fn test_full_cache_evicts_oldest() {
        let cache = TtlCache::new(Duration::from_secs(600), 2);
        let start = Instant::now();
        cache.insert_at("a".to_string(), 1u32, start);
        cache.insert_at("b".to_string(), 2, start + Duration::from_secs(1));
        cache.insert_at("c".to_string(), 3, start + Duration::from_secs(2));

        let now = start + Duration::from_secs(3);
        assert_eq!(cache.get_at("a", now), None);
        assert_eq!(cache.get_at("b", now), Some(2));
        assert_eq!(cache.get_at("c", now), Some(3));
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn test_overwrite_does_not_evict() {
        let cache = TtlCache::new(Duration::from_secs(600), 1);
        cache.insert("a", 1u32);
        cache.insert("a", 2);
        assert_eq!(cache.get("a"), Some(2));
        assert_eq!(cache.stats().evictions, 0);
    }

    #[test]
    fn test_clear() {
        let cache = TtlCache::default();
        cache.insert("a", 1u32);
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.stats().current_size, 0);
    }
}
