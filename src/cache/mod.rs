//! Suggestion cache: bounded LRU memoization of ranked suggestion lists.
//!
//! Keyed by `(source id, canonical options)`. The cache is an optimization
//! only: a cached value is always element-for-element equal to what a fresh
//! computation would produce at the same graph version, because the engine
//! clears it wholesale on every rebuild and entries are never mutated.
//!
//! Eviction is least-recently-used on overflow, with an optional TTL as a
//! second axis (expired entries read as misses and are dropped in place).

use crate::suggest::LinkSuggestion;
use std::collections::HashMap;
use std::time::{Duration, SystemTime};

/// Cache key: source node id plus canonicalized query options.
pub type CacheKey = (String, String);

/// Hit/miss counters with a running hit rate.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AccessStats {
    /// Lookups answered from the cache.
    pub hits: u64,
    /// Lookups that had to compute.
    pub misses: u64,
}

impl AccessStats {
    /// Record a cache hit.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    /// Record a cache miss.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    /// Hit rate in [0, 1]; 0.0 before any lookup.
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Snapshot of cache health for analytics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CacheStats {
    /// Live entries.
    pub entries: usize,
    /// Maximum entries before eviction.
    pub capacity: usize,
    /// Lookups answered from the cache.
    pub hits: u64,
    /// Lookups that had to compute.
    pub misses: u64,
    /// `hits / (hits + misses)`.
    pub hit_rate: f64,
}

#[derive(Debug, Clone)]
struct Entry {
    suggestions: Vec<LinkSuggestion>,
    created: SystemTime,
    last_used: u64,
}

impl Entry {
    fn is_expired(&self, ttl: Option<Duration>) -> bool {
        match ttl {
            Some(ttl) => self
                .created
                .elapsed()
                .map_or(false, |age| age > ttl),
            None => false,
        }
    }
}

/// Bounded LRU cache of suggestion lists.
///
/// Not internally synchronized; the engine wraps it in a mutex alongside
/// the rest of its mutable state.
#[derive(Debug)]
pub struct SuggestionCache {
    entries: HashMap<CacheKey, Entry>,
    capacity: usize,
    ttl: Option<Duration>,
    stats: AccessStats,
    // Monotone tick for LRU ordering; cheaper than timestamps and immune
    // to clock adjustment.
    tick: u64,
}

impl SuggestionCache {
    /// Create a cache holding at most `capacity` entries (minimum 1).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            capacity: capacity.max(1),
            ttl: None,
            stats: AccessStats::default(),
            tick: 0,
        }
    }

    /// Add a time-to-live: entries older than `ttl` read as misses.
    #[must_use]
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// Look up a cached suggestion list, refreshing its recency on hit.
    pub fn get(&mut self, key: &CacheKey) -> Option<Vec<LinkSuggestion>> {
        if self.entries.get(key).is_some_and(|e| e.is_expired(self.ttl)) {
            self.entries.remove(key);
        }
        self.tick += 1;
        let tick = self.tick;
        match self.entries.get_mut(key) {
            Some(entry) => {
                entry.last_used = tick;
                self.stats.record_hit();
                Some(entry.suggestions.clone())
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    /// Insert a computed suggestion list, evicting the least-recently-used
    /// entry on overflow.
    pub fn put(&mut self, key: CacheKey, suggestions: Vec<LinkSuggestion>) {
        self.tick += 1;
        if !self.entries.contains_key(&key) && self.entries.len() >= self.capacity {
            self.evict_lru();
        }
        self.entries.insert(
            key,
            Entry {
                suggestions,
                created: SystemTime::now(),
                last_used: self.tick,
            },
        );
    }

    /// Drop everything. Hit/miss counters survive; they describe the
    /// process lifetime, not one graph version.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Current counters and occupancy.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.len(),
            capacity: self.capacity,
            hits: self.stats.hits,
            misses: self.stats.misses,
            hit_rate: self.stats.hit_rate(),
        }
    }

    fn evict_lru(&mut self) {
        // Bounded capacity keeps this scan cheap.
        if let Some(key) = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.last_used)
            .map(|(key, _)| key.clone())
        {
            self.entries.remove(&key);
        }
    }
}

#[cfg(test)]
mod tests;
