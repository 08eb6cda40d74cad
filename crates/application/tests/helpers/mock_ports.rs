use async_trait::async_trait;
use dnsrelay_application::ports::{
    CacheMetricsSnapshot, CachedResolution, ClientBinding, DatagramSink, QueryLogSink,
    ResolutionCachePort, TransactionMuxPort,
};
use dnsrelay_domain::{DomainError, QueryLog};
use std::collections::HashMap;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheUpdate {
    pub domain: String,
    pub answers: Vec<(Ipv4Addr, u32)>,
    pub authoritative: bool,
}

#[derive(Default)]
pub struct MockCache {
    entries: Mutex<HashMap<String, CachedResolution>>,
    updates: Mutex<Vec<CacheUpdate>>,
}

impl MockCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, domain: &str, addresses: Vec<Ipv4Addr>, authoritative: bool) {
        self.entries.lock().unwrap().insert(
            domain.to_ascii_lowercase(),
            CachedResolution {
                addresses,
                authoritative,
            },
        );
    }

    pub fn updates(&self) -> Vec<CacheUpdate> {
        self.updates.lock().unwrap().clone()
    }
}

impl ResolutionCachePort for MockCache {
    fn query(&self, domain: &str) -> Option<CachedResolution> {
        self.entries
            .lock()
            .unwrap()
            .get(&domain.to_ascii_lowercase())
            .cloned()
    }

    fn update(&self, domain: &str, answers: &[(Ipv4Addr, u32)], authoritative: bool) {
        self.updates.lock().unwrap().push(CacheUpdate {
            domain: domain.to_string(),
            answers: answers.to_vec(),
            authoritative,
        });
        self.set(
            domain,
            answers.iter().rev().map(|(addr, _)| *addr).collect(),
            authoritative,
        );
    }

    fn add_static(&self, domain: &str, address: Ipv4Addr) {
        self.set(domain, vec![address], true);
    }

    fn purge_expired(&self) -> usize {
        0
    }

    fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    fn metrics_snapshot(&self) -> CacheMetricsSnapshot {
        CacheMetricsSnapshot {
            entries: self.len(),
            ..Default::default()
        }
    }
}

/// Hands out sequential ids starting at 1; `exhausted` makes every
/// allocation fail.
#[derive(Default)]
pub struct MockMux {
    next_id: Mutex<u16>,
    bindings: Mutex<HashMap<u16, ClientBinding>>,
    released: Mutex<Vec<u16>>,
    exhausted: Mutex<bool>,
}

impl MockMux {
    pub fn new() -> Self {
        Self {
            next_id: Mutex::new(1),
            ..Default::default()
        }
    }

    pub fn set_exhausted(&self, exhausted: bool) {
        *self.exhausted.lock().unwrap() = exhausted;
    }

    pub fn bind(&self, server_id: u16, client_id: u16, client_addr: SocketAddr) {
        self.bindings.lock().unwrap().insert(
            server_id,
            ClientBinding {
                client_id,
                client_addr,
            },
        );
    }

    pub fn released(&self) -> Vec<u16> {
        self.released.lock().unwrap().clone()
    }
}

impl TransactionMuxPort for MockMux {
    fn allocate(&self, client_id: u16, client_addr: SocketAddr) -> Result<u16, DomainError> {
        if *self.exhausted.lock().unwrap() {
            return Err(DomainError::PoolExhausted);
        }
        let mut next = self.next_id.lock().unwrap();
        let id = *next;
        *next += 1;
        self.bind(id, client_id, client_addr);
        Ok(id)
    }

    fn lookup(&self, server_id: u16) -> Option<ClientBinding> {
        self.bindings.lock().unwrap().get(&server_id).copied()
    }

    fn release(&self, server_id: u16) {
        self.bindings.lock().unwrap().remove(&server_id);
        self.released.lock().unwrap().push(server_id);
    }

    fn sweep(&self) -> usize {
        0
    }

    fn live_count(&self) -> usize {
        self.bindings.lock().unwrap().len()
    }
}

#[derive(Default)]
pub struct RecordingSink {
    sent: Mutex<Vec<(Vec<u8>, SocketAddr)>>,
    fail: Mutex<bool>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail(&self, fail: bool) {
        *self.fail.lock().unwrap() = fail;
    }

    pub fn sent(&self) -> Vec<(Vec<u8>, SocketAddr)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl DatagramSink for RecordingSink {
    async fn send_to(&self, payload: &[u8], target: SocketAddr) -> Result<(), DomainError> {
        if *self.fail.lock().unwrap() {
            return Err(DomainError::IoError("send failed".to_string()));
        }
        self.sent.lock().unwrap().push((payload.to_vec(), target));
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingQueryLog {
    entries: Mutex<Vec<QueryLog>>,
}

impl RecordingQueryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<QueryLog> {
        self.entries.lock().unwrap().clone()
    }
}

impl QueryLogSink for RecordingQueryLog {
    fn record(&self, entry: QueryLog) {
        self.entries.lock().unwrap().push(entry);
    }
}
