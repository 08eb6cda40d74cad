use dnsrelay_domain::QueryLog;

/// Receives one entry per handled query. Implementations must not block.
pub trait QueryLogSink: Send + Sync {
    fn record(&self, entry: QueryLog);
}
