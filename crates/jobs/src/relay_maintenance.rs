use dnsrelay_application::ports::{ResolutionCachePort, TransactionMuxPort};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

const DEFAULT_INTERVAL_SECS: u64 = 5;

/// Result of one maintenance pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MaintenanceOutcome {
    pub swept_transactions: usize,
    pub purged_entries: usize,
    pub live_transactions: usize,
    pub cache_size: usize,
}

/// Reclaims transaction ids whose upstream never answered and drops cache
/// entries past their freshness window.
pub struct RelayMaintenanceJob {
    mux: Arc<dyn TransactionMuxPort>,
    cache: Arc<dyn ResolutionCachePort>,
    interval_secs: u64,
    shutdown: CancellationToken,
}

impl RelayMaintenanceJob {
    pub fn new(mux: Arc<dyn TransactionMuxPort>, cache: Arc<dyn ResolutionCachePort>) -> Self {
        Self {
            mux,
            cache,
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

    pub fn run_cycle(&self) -> MaintenanceOutcome {
        let swept_transactions = self.mux.sweep();
        let purged_entries = self.cache.purge_expired();

        MaintenanceOutcome {
            swept_transactions,
            purged_entries,
            live_transactions: self.mux.live_count(),
            cache_size: self.cache.len(),
        }
    }

    pub async fn start(self: Arc<Self>) {
        info!(
            interval_secs = self.interval_secs,
            "Starting relay maintenance job"
        );

        let job = Arc::clone(&self);
        let shutdown = self.shutdown.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(job.interval_secs));
            // The first tick completes immediately.
            interval.tick().await;
            loop {
                tokio::select! {
                    _ = shutdown.cancelled() => {
                        info!("RelayMaintenanceJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        let outcome = job.run_cycle();
                        if outcome.swept_transactions > 0 || outcome.purged_entries > 0 {
                            debug!(
                                swept = outcome.swept_transactions,
                                purged = outcome.purged_entries,
                                live_transactions = outcome.live_transactions,
                                cache_size = outcome.cache_size,
                                "Relay maintenance cycle completed"
                            );
                        }
                    }
                }
            }
        });
    }
}
