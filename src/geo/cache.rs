//! Coordinate-keyed lookup cache with time-based expiry.
//!
//! Hosts typically resolve extra information per coordinate (a reverse
//! geocode, an elevation sample) while the user edits, and those lookups are
//! expensive. This cache replaces the ambient module-global cache such hosts
//! tend to grow: it is an explicit value owned by the caller, with an
//! injected clock so expiry is testable, a per-entry TTL, and a bounded
//! capacity with oldest-entry eviction.
//!
//! # Example
//! ```ignore
//! let mut cache = LookupCache::new(Duration::from_secs(300), 256);
//! let clock = SystemClock;
//! let address = cache.get_or_insert_with(point, &clock, || resolve_address(point));
//! let stats = cache.stats();
//! println!("entries: {}, hits: {}", stats.entries, stats.hits);
//! ```

use std::collections::HashMap;
use std::time::Duration;

use super::core::LatLng;

/// Source of monotonically non-decreasing wall time in milliseconds.
///
/// Injected rather than read ambiently so expiry behavior is deterministic
/// under test and so wasm hosts can supply `performance.now()`-style time.
pub trait Clock {
    fn now_millis(&self) -> u64;
}

/// Clock backed by [`std::time::SystemTime`]. Not available on wasm targets;
/// wasm hosts pass their own milliseconds through [`ManualClock`].
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

#[cfg(not(target_arch = "wasm32"))]
impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
            .unwrap_or(0)
    }
}

/// Externally advanced clock, for tests and for hosts that own the time
/// source.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualClock {
    pub now_millis: u64,
}

impl ManualClock {
    #[must_use]
    pub const fn new(now_millis: u64) -> Self {
        Self { now_millis }
    }

    pub fn advance(&mut self, by: Duration) {
        self.now_millis = self
            .now_millis
            .saturating_add(u64::try_from(by.as_millis()).unwrap_or(u64::MAX));
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> u64 {
        self.now_millis
    }
}

/// Cache key: coordinates rounded to microdegrees (~0.1 m), so lookups for
/// effectively identical points share an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CoordinateKey {
    lat_micro: i64,
    lng_micro: i64,
}

impl CoordinateKey {
    fn from_latlng(p: LatLng) -> Self {
        Self {
            lat_micro: (p.lat * 1e6).round() as i64,
            lng_micro: (p.lng * 1e6).round() as i64,
        }
    }
}

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    inserted_at_millis: u64,
}

/// Cache statistics for diagnostics and monitoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LookupCacheStats {
    /// Number of live entries.
    pub entries: usize,
    /// Total lookups answered from the cache.
    pub hits: usize,
    /// Total lookups that found no fresh entry.
    pub misses: usize,
    /// Entries dropped to make room or because they expired on access.
    pub evictions: usize,
}

impl LookupCacheStats {
    /// Hit rate between 0.0 and 1.0; 0.0 before any access.
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

/// Bounded, TTL-expiring map from coordinates to lookup results.
#[derive(Debug, Clone)]
pub struct LookupCache<V> {
    entries: HashMap<CoordinateKey, CacheEntry<V>>,
    ttl_millis: u64,
    capacity: usize,
    hits: usize,
    misses: usize,
    evictions: usize,
}

impl<V: Clone> LookupCache<V> {
    /// Create a cache holding at most `capacity` entries, each valid for
    /// `ttl` after insertion. A zero capacity disables storage entirely.
    #[must_use]
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            ttl_millis: u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX),
            capacity,
            hits: 0,
            misses: 0,
            evictions: 0,
        }
    }

    /// Fetch the cached value for `point` if present and not expired.
    /// Expired entries are dropped on access.
    pub fn get(&mut self, point: LatLng, clock: &impl Clock) -> Option<V> {
        let key = CoordinateKey::from_latlng(point);
        let now = clock.now_millis();

        match self.entries.get(&key) {
            Some(entry) if !self.is_expired(entry, now) => {
                self.hits += 1;
                Some(entry.value.clone())
            }
            Some(_) => {
                self.entries.remove(&key);
                self.evictions += 1;
                self.misses += 1;
                None
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Store `value` for `point`, evicting the oldest entry when full.
    pub fn insert(&mut self, point: LatLng, value: V, clock: &impl Clock) {
        if self.capacity == 0 {
            return;
        }

        let key = CoordinateKey::from_latlng(point);
        let now = clock.now_millis();

        if !self.entries.contains_key(&key) && self.entries.len() >= self.capacity {
            self.evict_oldest();
        }

        self.entries.insert(
            key,
            CacheEntry {
                value,
                inserted_at_millis: now,
            },
        );
    }

    /// Fetch or compute-and-store in one step.
    pub fn get_or_insert_with(
        &mut self,
        point: LatLng,
        clock: &impl Clock,
        compute: impl FnOnce() -> V,
    ) -> V {
        if let Some(value) = self.get(point, clock) {
            return value;
        }
        let value = compute();
        self.insert(point, value.clone(), clock);
        value
    }

    /// Drop every entry; counters are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn stats(&self) -> LookupCacheStats {
        LookupCacheStats {
            entries: self.entries.len(),
            hits: self.hits,
            misses: self.misses,
            evictions: self.evictions,
        }
    }

    fn is_expired(&self, entry: &CacheEntry<V>, now: u64) -> bool {
        now.saturating_sub(entry.inserted_at_millis) >= self.ttl_millis
    }

    fn evict_oldest(&mut self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.inserted_at_millis)
            .map(|(key, _)| *key);
        if let Some(key) = oldest {
            self.entries.remove(&key);
            self.evictions += 1;
        }
    }
}
