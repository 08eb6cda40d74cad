use std::sync::atomic::{AtomicU64, Ordering};

/// Counters updated by every dispatch call.
#[derive(Debug, Default)]
pub struct RelayMetrics {
    pub queries: AtomicU64,
    pub responses: AtomicU64,
    pub cache_hits: AtomicU64,
    pub forwarded: AtomicU64,
    pub relayed: AtomicU64,
    pub parse_errors: AtomicU64,
    pub dropped: AtomicU64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RelayMetricsSnapshot {
    pub queries: u64,
    pub responses: u64,
    pub cache_hits: u64,
    pub forwarded: u64,
    pub relayed: u64,
    pub parse_errors: u64,
    pub dropped: u64,
}

impl RelayMetrics {
    #[inline]
    pub(crate) fn inc(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> RelayMetricsSnapshot {
        RelayMetricsSnapshot {
            queries: self.queries.load(Ordering::Relaxed),
            responses: self.responses.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            forwarded: self.forwarded.load(Ordering::Relaxed),
            relayed: self.relayed.load(Ordering::Relaxed),
            parse_errors: self.parse_errors.load(Ordering::Relaxed),
            dropped: self.dropped.load(Ordering::Relaxed),
        }
    }
}
