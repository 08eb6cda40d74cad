use dnsrelay_application::ports::{
    CacheMetricsSnapshot, CachedResolution, ClientBinding, ResolutionCachePort,
    TransactionMuxPort,
};
use dnsrelay_domain::DomainError;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

/// Counts sweeps and reports a fixed number of reclaimed ids per call.
#[derive(Default)]
pub struct MockMux {
    sweep_calls: AtomicU64,
    pub swept_per_call: AtomicUsize,
    pub live: AtomicUsize,
}

impl MockMux {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sweep_calls(&self) -> u64 {
        self.sweep_calls.load(Ordering::SeqCst)
    }
}

impl TransactionMuxPort for MockMux {
    fn allocate(&self, _client_id: u16, _client_addr: SocketAddr) -> Result<u16, DomainError> {
        Err(DomainError::PoolExhausted)
    }

    fn lookup(&self, _server_id: u16) -> Option<ClientBinding> {
        None
    }

    fn release(&self, _server_id: u16) {}

    fn sweep(&self) -> usize {
        self.sweep_calls.fetch_add(1, Ordering::SeqCst);
        self.swept_per_call.load(Ordering::SeqCst)
    }

    fn live_count(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }
}

#[derive(Default)]
pub struct MockCache {
    purge_calls: AtomicU64,
    pub purged_per_call: AtomicUsize,
    pub size: AtomicUsize,
}

impl MockCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn purge_calls(&self) -> u64 {
        self.purge_calls.load(Ordering::SeqCst)
    }
}

impl ResolutionCachePort for MockCache {
    fn query(&self, _domain: &str) -> Option<CachedResolution> {
        None
    }

    fn update(&self, _domain: &str, _answers: &[(Ipv4Addr, u32)], _authoritative: bool) {}

    fn add_static(&self, _domain: &str, _address: Ipv4Addr) {}

    fn purge_expired(&self) -> usize {
        self.purge_calls.fetch_add(1, Ordering::SeqCst);
        self.purged_per_call.load(Ordering::SeqCst)
    }

    fn len(&self) -> usize {
        self.size.load(Ordering::SeqCst)
    }

    fn metrics_snapshot(&self) -> CacheMetricsSnapshot {
        CacheMetricsSnapshot {
            entries: self.len(),
            ..Default::default()
        }
    }
}
