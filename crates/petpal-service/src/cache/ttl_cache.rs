//! In-memory TTL cache.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

/// Default TTL for cached listings (5 minutes).
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Expiry used when `now + ttl` does not fit in an `Instant` (about 30 years).
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

struct CacheEntry<V> {
    value: V,
    expires_at: Instant,
}

impl<V> CacheEntry<V> {
    fn is_live(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// Thread-safe key/value store where every entry carries its own expiry.
///
/// An entry is only visible while `now < expires_at`. Expired entries are
/// dropped lazily by [`get`](Self::get) or in bulk by [`sweep`](Self::sweep).
/// Time comes from [`tokio::time::Instant`], so tests can drive expiry with a
/// paused clock.
pub struct TtlCache<V> {
    entries: RwLock<HashMap<String, CacheEntry<V>>>,
}

impl<V: Clone> TtlCache<V> {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Get a live value.
    ///
    /// Returns `None` for missing and expired keys alike; an expired entry is
    /// removed on the way out.
    pub fn get(&self, key: &str) -> Option<V> {
        {
            let entries = self.entries.read();
            match entries.get(key) {
                Some(entry) if entry.is_live(Instant::now()) => {
                    debug!("Cache hit for key '{}'", key);
                    return Some(entry.value.clone());
                }
                Some(_) => {}
                None => {
                    debug!("Cache miss for key '{}'", key);
                    return None;
                }
            }
        }

        // Expired under the read lock. Another writer may have refreshed the
        // entry before we got the write lock, so look again.
        let mut entries = self.entries.write();
        match entries.get(key) {
            Some(entry) if entry.is_live(Instant::now()) => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                debug!("Evicted expired key '{}'", key);
                None
            }
            None => None,
        }
    }

    /// Insert or replace a value that expires `ttl` from now.
    ///
    /// A `ttl` too large to represent is treated as "never expires in practice".
    pub fn set(&self, key: impl Into<String>, value: V, ttl: Duration) {
        let key = key.into();
        let now = Instant::now();
        let expires_at = now.checked_add(ttl).unwrap_or_else(|| now + FAR_FUTURE);
        debug!("Cached key '{}' with TTL {}s", key, ttl.as_secs());
        self.entries
            .write()
            .insert(key, CacheEntry { value, expires_at });
    }

    /// Remove a key whether or not it has expired.
    ///
    /// Returns `true` if an entry was present.
    pub fn delete(&self, key: &str) -> bool {
        let deleted = self.entries.write().remove(key).is_some();
        debug!("Deleted key '{}': {}", key, deleted);
        deleted
    }

    /// Remove every entry whose expiry is strictly in the past.
    ///
    /// Returns the number of entries removed.
    pub fn sweep(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|_, entry| entry.expires_at >= now);
        before - entries.len()
    }

    /// Number of stored entries, including expired ones not yet removed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether the cache holds no entries at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl<V: Clone> Default for TtlCache<V> {
    fn default() -> Self {
        Self::new()
    }
}
