use super::entry::CacheEntry;
use super::key::DomainKey;
use super::metrics::CacheMetrics;
use crate::clock::now_secs;
use dnsrelay_application::ports::{CacheMetricsSnapshot, CachedResolution, ResolutionCachePort};
use lru::LruCache;
use rustc_hash::FxBuildHasher;
use std::net::Ipv4Addr;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, trace};

type EntryTable = LruCache<DomainKey, CacheEntry, FxBuildHasher>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Soft bound; permanent entries may push the count past it.
    pub max_entries: usize,
    pub freshness_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 65536,
            freshness_secs: 300,
        }
    }
}

/// Hash-indexed LRU of domain to IPv4 addresses.
///
/// The whole table sits behind one mutex; every operation, eviction
/// included, is a single critical section. The `*_at` variants take the
/// current time explicitly, the trait methods read the system clock.
pub struct ResolutionCache {
    entries: Mutex<EntryTable>,
    config: CacheConfig,
    metrics: CacheMetrics,
}

impl ResolutionCache {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            entries: Mutex::new(LruCache::unbounded_with_hasher(FxBuildHasher)),
            config,
            metrics: CacheMetrics::default(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, EntryTable> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn query_at(&self, domain: &str, now: u64) -> Option<CachedResolution> {
        let key = DomainKey::new(domain);
        let mut entries = self.lock();

        match entries.peek(&key).map(|entry| entry.is_stale(now)) {
            None => {
                CacheMetrics::add(&self.metrics.misses, 1);
                return None;
            }
            Some(true) => {
                entries.pop(&key);
                CacheMetrics::add(&self.metrics.expirations, 1);
                CacheMetrics::add(&self.metrics.misses, 1);
                trace!(domain = %key.as_str(), "Cache entry expired on access");
                return None;
            }
            Some(false) => {}
        }

        let entry = entries.get(&key)?;
        CacheMetrics::add(&self.metrics.hits, 1);
        Some(CachedResolution {
            addresses: entry.live_addresses(now),
            authoritative: entry.authoritative,
        })
    }

    pub fn update_at(
        &self,
        domain: &str,
        answers: &[(Ipv4Addr, u32)],
        authoritative: bool,
        now: u64,
    ) {
        let key = DomainKey::new(domain);
        let mut entries = self.lock();

        if let Some(entry) = entries.peek_mut(&key) {
            entry.replace(answers, authoritative, now, self.config.freshness_secs);
            return;
        }

        let entry = CacheEntry::dynamic(answers, authoritative, now, self.config.freshness_secs);
        entries.put(key, entry);
        CacheMetrics::add(&self.metrics.insertions, 1);
        self.enforce_capacity(&mut entries, now);
    }

    pub fn add_static_at(&self, domain: &str, address: Ipv4Addr, now: u64) {
        let key = DomainKey::new(domain);
        let mut entries = self.lock();

        if let Some(entry) = entries.peek_mut(&key) {
            entry.add_static(address);
            return;
        }

        entries.put(key, CacheEntry::permanent(address, now));
        CacheMetrics::add(&self.metrics.insertions, 1);
        self.enforce_capacity(&mut entries, now);
    }

    pub fn purge_expired_at(&self, now: u64) -> usize {
        let mut entries = self.lock();
        let removed = Self::purge_locked(&mut entries, now);
        CacheMetrics::add(&self.metrics.expirations, removed as u64);
        removed
    }

    /// Over capacity: drop stale entries first, then at most one
    /// least-recently-used entry that is not permanent.
    fn enforce_capacity(&self, entries: &mut EntryTable, now: u64) {
        if entries.len() <= self.config.max_entries {
            return;
        }

        let purged = Self::purge_locked(entries, now);
        CacheMetrics::add(&self.metrics.expirations, purged as u64);
        if entries.len() <= self.config.max_entries {
            return;
        }

        let victim = entries
            .iter()
            .rev()
            .find(|(_, entry)| !entry.permanent)
            .map(|(key, _)| key.clone());

        match victim {
            Some(key) => {
                entries.pop(&key);
                CacheMetrics::add(&self.metrics.evictions, 1);
                trace!(domain = %key.as_str(), "Evicted least recently used entry");
            }
            None => debug!(
                entries = entries.len(),
                max = self.config.max_entries,
                "Cache over capacity with only permanent entries"
            ),
        }
    }

    fn purge_locked(entries: &mut EntryTable, now: u64) -> usize {
        let stale: Vec<DomainKey> = entries
            .iter()
            .filter(|(_, entry)| entry.is_stale(now))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &stale {
            entries.pop(key);
        }
        stale.len()
    }
}

impl Default for ResolutionCache {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}

impl ResolutionCachePort for ResolutionCache {
    fn query(&self, domain: &str) -> Option<CachedResolution> {
        self.query_at(domain, now_secs())
    }

    fn update(&self, domain: &str, answers: &[(Ipv4Addr, u32)], authoritative: bool) {
        self.update_at(domain, answers, authoritative, now_secs());
    }

    fn add_static(&self, domain: &str, address: Ipv4Addr) {
        self.add_static_at(domain, address, now_secs());
    }

    fn purge_expired(&self) -> usize {
        self.purge_expired_at(now_secs())
    }

    fn len(&self) -> usize {
        self.lock().len()
    }

    fn metrics_snapshot(&self) -> CacheMetricsSnapshot {
        let entries = self.lock().len();
        self.metrics.snapshot(entries)
    }
}
