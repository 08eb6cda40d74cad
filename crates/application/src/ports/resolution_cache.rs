use std::net::Ipv4Addr;

/// Addresses surviving a cache lookup, most recently added first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedResolution {
    pub addresses: Vec<Ipv4Addr>,
    pub authoritative: bool,
}

/// Snapshot of resolution cache metrics for logging.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheMetricsSnapshot {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
    pub insertions: u64,
    pub evictions: u64,
    pub expirations: u64,
}

/// Domain name to IPv4 address store with LRU eviction.
///
/// Keys are case-insensitive. Entries added through [`add_static`] are
/// permanent: they never expire and are never evicted.
///
/// [`add_static`]: ResolutionCachePort::add_static
pub trait ResolutionCachePort: Send + Sync {
    /// `None` on a miss. A hit may carry an empty address list when every
    /// per-address TTL has run out but the entry itself is still fresh.
    fn query(&self, domain: &str) -> Option<CachedResolution>;

    /// Replaces the address set of `domain`; each pair is `(address, ttl_secs)`.
    fn update(&self, domain: &str, answers: &[(Ipv4Addr, u32)], authoritative: bool);

    fn add_static(&self, domain: &str, address: Ipv4Addr);

    /// Drops entries whose freshness window has elapsed; returns how many.
    fn purge_expired(&self) -> usize;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn metrics_snapshot(&self) -> CacheMetricsSnapshot;
}
