//! In-process query cache for read-heavy endpoints.
//!
//! Entries are served while younger than the stale time. Entries idle for
//! longer than the ttl are dropped by [`QueryCache::purge_expired`], which the
//! server calls on a timer. Any write path calls [`QueryCache::invalidate_all`].

use dashmap::DashMap;
use log::debug;
use std::time::{Duration, Instant};

use crate::constants::{DEFAULT_CACHE_STALE_SECS, DEFAULT_CACHE_TTL_SECS};

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    cached_at: Instant,
    last_access: Instant,
}

#[derive(Debug)]
pub struct QueryCache<V> {
    entries: DashMap<String, CacheEntry<V>>,
    stale_after: Duration,
    ttl: Duration,
}

impl<V: Clone> Default for QueryCache<V> {
    fn default() -> Self {
        Self::new(
            Duration::from_secs(DEFAULT_CACHE_STALE_SECS),
            Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
        )
    }
}

impl<V: Clone> QueryCache<V> {
    pub fn new(stale_after: Duration, ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            stale_after,
            ttl,
        }
    }

    /// Returns the cached value if it is still fresh.
    pub fn get(&self, key: &str) -> Option<V> {
        let mut entry = self.entries.get_mut(key)?;
        let now = Instant::now();
        if now.duration_since(entry.cached_at) >= self.stale_after {
            return None;
        }
        entry.last_access = now;
        Some(entry.value.clone())
    }

    pub fn insert(&self, key: impl Into<String>, value: V) {
        let now = Instant::now();
        self.entries.insert(
            key.into(),
            CacheEntry {
                value,
                cached_at: now,
                last_access: now,
            },
        );
    }

    pub fn invalidate_all(&self) {
        let count = self.entries.len();
        self.entries.clear();
        if count > 0 {
            debug!("Invalidated {} cached queries", count);
        }
    }

    /// Drops entries not read within the ttl. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| now.duration_since(entry.last_access) < self.ttl);
        before.saturating_sub(self.entries.len())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
