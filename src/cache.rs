//! In-memory timed caches for computed results.
//!
//! Distinct from the disk HTTP cache on the outbound client: these stores
//! memoize whole computed values (profiles, scores, transformed records)
//! under normalized drug-name keys, each store with a fixed TTL.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use crate::entities::drug::{DrugProfile, Interaction, MolecularData, TrialSet};

pub(crate) const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);
pub(crate) const TRIALS_TTL: Duration = Duration::from_secs(24 * 60 * 60);
pub(crate) const CONFIDENCE_TTL: Duration = Duration::from_secs(24 * 60 * 60);
pub(crate) const MOLECULAR_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);
pub(crate) const INTERACTIONS_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

#[derive(Debug)]
pub(crate) struct TimedCache<T> {
    ttl: Duration,
    entries: Mutex<HashMap<String, (Instant, T)>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<T: Clone> TimedCache<T> {
    pub(crate) fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Normalized key: lookups for "Aspirin" and " aspirin " share an entry.
    fn key(name: &str) -> String {
        name.trim().to_lowercase()
    }

    pub(crate) fn get(&self, name: &str) -> Option<T> {
        let key = Self::key(name);
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        if let Some((inserted, value)) = entries.get(&key) {
            if inserted.elapsed() < self.ttl {
                self.hits.fetch_add(1, Ordering::Relaxed);
                return Some(value.clone());
            }
            entries.remove(&key);
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        None
    }

    pub(crate) fn insert(&self, name: &str, value: T) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(Self::key(name), (Instant::now(), value));
    }

    pub(crate) fn clear(&self) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.clear();
    }

    fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }
}

#[derive(Debug, Clone, Copy, serde::Serialize)]
pub(crate) struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// One store per data type, each with the TTL its upstream warrants.
#[derive(Debug)]
pub(crate) struct Caches {
    pub profiles: TimedCache<DrugProfile>,
    pub molecular: TimedCache<MolecularData>,
    pub trials: TimedCache<TrialSet>,
    pub interactions: TimedCache<Vec<Interaction>>,
    pub confidence: TimedCache<u8>,
}

impl Caches {
    pub(crate) fn new() -> Self {
        Self {
            profiles: TimedCache::new(DEFAULT_TTL),
            molecular: TimedCache::new(MOLECULAR_TTL),
            trials: TimedCache::new(TRIALS_TTL),
            interactions: TimedCache::new(INTERACTIONS_TTL),
            confidence: TimedCache::new(CONFIDENCE_TTL),
        }
    }

    pub(crate) fn clear_all(&self) {
        self.profiles.clear();
        self.molecular.clear();
        self.trials.clear();
        self.interactions.clear();
        self.confidence.clear();
    }

    pub(crate) fn stats(&self) -> CacheStats {
        let hits = self.profiles.hits()
            + self.molecular.hits()
            + self.trials.hits()
            + self.interactions.hits()
            + self.confidence.hits();
        let misses = self.profiles.misses()
            + self.molecular.misses()
            + self.trials.misses()
            + self.interactions.misses()
            + self.confidence.misses();
        CacheStats { hits, misses }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_returns_inserted_value_and_counts_hit() {
        let cache: TimedCache<u8> = TimedCache::new(Duration::from_secs(60));
        cache.insert("Aspirin", 82);
        assert_eq!(cache.get("aspirin"), Some(82));
        assert_eq!(cache.hits(), 1);
        assert_eq!(cache.misses(), 0);
    }

    #[test]
    fn miss_is_counted_for_absent_key() {
        let cache: TimedCache<u8> = TimedCache::new(Duration::from_secs(60));
        assert_eq!(cache.get("metformin"), None);
        assert_eq!(cache.misses(), 1);
    }

    #[test]
    fn expired_entries_are_dropped_on_read() {
        let cache: TimedCache<u8> = TimedCache::new(Duration::from_millis(10));
        cache.insert("Aspirin", 82);
        std::thread::sleep(Duration::from_millis(25));
        assert_eq!(cache.get("Aspirin"), None);
        assert_eq!(cache.misses(), 1);
    }

    #[test]
    fn clear_all_empties_every_store() {
        let caches = Caches::new();
        caches.confidence.insert("Aspirin", 82);
        caches.clear_all();
        assert_eq!(caches.confidence.get("Aspirin"), None);
    }

    #[test]
    fn stats_aggregate_across_stores() {
        let caches = Caches::new();
        caches.confidence.insert("Aspirin", 82);
        let _ = caches.confidence.get("Aspirin");
        let _ = caches.molecular.get("Aspirin");
        let stats = caches.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
    }
}
