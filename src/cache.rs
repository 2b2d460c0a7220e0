//! Short-lived TTL memoization for aggregation results.
//!
//! The dashboards re-request the same company's KPIs on every interaction;
//! upstream query latency is the dominant page cost. This cache is a
//! caller-side optimization only — the aggregator itself stays pure and
//! uncached. Entries are keyed by the full input parameters, so differing
//! parameters never share a value, and expire after the configured TTL.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Thread-safe map with per-entry expiry.
#[derive(Debug)]
pub struct TtlCache<K, V> {
    ttl: Duration,
    entries: Mutex<HashMap<K, (Instant, V)>>,
}

impl<K: Eq + Hash + Clone, V: Clone> TtlCache<K, V> {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, entries: Mutex::new(HashMap::new()) }
    }

    /// Cached value for `key`, if present and not expired.
    pub fn get(&self, key: &K) -> Option<V> {
        let mut entries = match self.entries.lock() {
            Ok(guard) => guard,
            // A poisoned lock means a panic mid-insert; treat as cold cache.
            Err(_) => return None,
        };
        match entries.get(key) {
            Some((inserted, value)) if inserted.elapsed() < self.ttl => Some(value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Cached value for `key`, computing and storing it on miss or expiry.
    pub fn get_or_insert_with<F: FnOnce() -> V>(&self, key: K, compute: F) -> V {
        if let Some(hit) = self.get(&key) {
            return hit;
        }
        let value = compute();
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key, (Instant::now(), value.clone()));
        }
        value
    }

    /// Drop every entry (the dashboards expose a manual refresh).
    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.clear();
        }
    }

    /// Live (non-expired) entry count.
    pub fn len(&self) -> usize {
        match self.entries.lock() {
            Ok(entries) => entries
                .values()
                .filter(|(inserted, _)| inserted.elapsed() < self.ttl)
                .count(),
            Err(_) => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn miss_computes_then_hit_reuses() {
        let cache: TtlCache<String, Vec<u32>> = TtlCache::new(Duration::from_secs(60));
        let mut computed = 0;
        let first = cache.get_or_insert_with("YPF".into(), || {
            computed += 1;
            vec![1, 2, 3]
        });
        let second = cache.get_or_insert_with("YPF".into(), || {
            computed += 1;
            vec![9, 9, 9]
        });
        assert_eq!(first, second);
        assert_eq!(computed, 1);
    }

    #[test]
    fn differing_keys_never_share_a_value() {
        let cache: TtlCache<(String, Option<i32>), u32> = TtlCache::new(Duration::from_secs(60));
        cache.get_or_insert_with(("YPF".into(), None), || 1);
        let other = cache.get_or_insert_with(("YPF".into(), Some(2024)), || 2);
        assert_eq!(other, 2);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn entries_expire_after_the_ttl() {
        let cache: TtlCache<u32, u32> = TtlCache::new(Duration::from_millis(10));
        cache.get_or_insert_with(1, || 41);
        std::thread::sleep(Duration::from_millis(25));
        assert_eq!(cache.get(&1), None);
        let recomputed = cache.get_or_insert_with(1, || 42);
        assert_eq!(recomputed, 42);
    }

    #[test]
    fn clear_empties_the_cache() {
        let cache: TtlCache<u32, u32> = TtlCache::new(Duration::from_secs(60));
        cache.get_or_insert_with(1, || 1);
        cache.clear();
        assert!(cache.is_empty());
    }
}
