use std::{collections::HashMap, hash::Hash, time::Duration};

use tokio::time::Instant;

/// How long a fetched result is reused before the next read goes back to the server.
pub const DEFAULT_STALE_TIME: Duration = Duration::from_secs(5 * 60);

struct CacheEntry<V> {
    value: V,
    fetched_at: Instant,
    invalidated: bool,
}

/// Query results keyed by `K`, each fresh for `stale_time` after it was stored.
pub struct QueryCache<K, V> {
    stale_time: Duration,
    entries: HashMap<K, CacheEntry<V>>,
}

impl<K: Eq + Hash, V: Clone> QueryCache<K, V> {
    pub fn new(stale_time: Duration) -> Self {
        Self {
            stale_time,
            entries: HashMap::new(),
        }
    }

    /// Cached value for `key` if it was neither invalidated nor outlived `stale_time`.
    pub fn fresh(&self, key: &K, now: Instant) -> Option<V> {
        let entry = self.entries.get(key)?;
        if entry.invalidated || now.saturating_duration_since(entry.fetched_at) >= self.stale_time
        {
            return None;
        }
        Some(entry.value.clone())
    }

    /// Last stored value for `key`, fresh or not.
    pub fn peek(&self, key: &K) -> Option<V> {
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    pub fn store(&mut self, key: K, value: V, now: Instant) {
        self.entries.insert(
            key,
            CacheEntry {
                value,
                fetched_at: now,
                invalidated: false,
            },
        );
    }

    /// Marks `key` stale. The value stays readable through [`QueryCache::peek`].
    pub fn invalidate(&mut self, key: &K) -> bool {
        match self.entries.get_mut(key) {
            Some(entry) => {
                entry.invalidated = true;
                true
            }
            None => false,
        }
    }
}

impl<K: Eq + Hash, V: Clone> Default for QueryCache<K, V> {
    fn default() -> Self {
        Self::new(DEFAULT_STALE_TIME)
    }
}
