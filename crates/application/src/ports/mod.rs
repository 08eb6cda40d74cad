mod datagram_sink;
mod query_log_sink;
mod resolution_cache;
mod transaction_mux;

pub use datagram_sink::DatagramSink;
pub use query_log_sink::QueryLogSink;
pub use resolution_cache::{CacheMetricsSnapshot, CachedResolution, ResolutionCachePort};
pub use transaction_mux::{ClientBinding, TransactionMuxPort};
