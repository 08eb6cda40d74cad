pub mod cache;
pub mod query_logger;
pub mod transaction_table;
pub mod transport;
pub mod worker_pool;

pub use cache::{CacheConfig, CacheMetrics, DomainKey, ResolutionCache};
pub use query_logger::{FileQueryLogger, QueryLogChannel};
pub use transaction_table::{TransactionTable, DEFAULT_TRANSACTION_TTL_SECS, MAX_TRANSACTIONS};
pub use transport::{run_receiver, UdpDatagramSink};
pub use worker_pool::{TaskQueue, WorkerPool, DEFAULT_QUEUE_CAPACITY, DEFAULT_WORKER_COUNT};
