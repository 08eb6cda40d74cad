use dnsrelay_application::ports::{ResolutionCachePort, TransactionMuxPort};
use dnsrelay_application::use_cases::RelayMetrics;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::info;

const DEFAULT_INTERVAL_SECS: u64 = 60;

/// Periodically logs relay and cache counters.
pub struct RelayStatsJob {
    metrics: Arc<RelayMetrics>,
    cache: Arc<dyn ResolutionCachePort>,
    mux: Arc<dyn TransactionMuxPort>,
    interval_secs: u64,
    shutdown: CancellationToken,
}

impl RelayStatsJob {
    pub fn new(
        metrics: Arc<RelayMetrics>,
        cache: Arc<dyn ResolutionCachePort>,
        mux: Arc<dyn TransactionMuxPort>,
    ) -> Self {
        Self {
            metrics,
            cache,
            mux,
            interval_secs: DEFAULT_INTERVAL_SECS,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_interval(mut self, secs: u64) -> Self {
        self.interval_secs = secs.max(1);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub fn report(&self) {
        let relay = self.metrics.snapshot();
        let cache = self.cache.metrics_snapshot();
        info!(
            queries = relay.queries,
            responses = relay.responses,
            cache_hits = relay.cache_hits,
            forwarded = relay.forwarded,
            relayed = relay.relayed,
            parse_errors = relay.parse_errors,
            dropped = relay.dropped,
            cache_entries = cache.entries,
            cache_evictions = cache.evictions,
            cache_expirations = cache.expirations,
            live_transactions = self.mux.live_count(),
            "Relay statistics"
        );
    }

    pub async fn start(self: Arc<Self>) {
        let job = Arc::clone(&self);
        let shutdown = self.shutdown.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(job.interval_secs));
            interval.tick().await;
            loop {
                tokio::select! {
                    _ = shutdown.cancelled() => {
                        info!("RelayStatsJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => job.report(),
                }
            }
        });
    }
}
