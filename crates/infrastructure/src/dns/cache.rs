mod entry;
mod key;
mod metrics;
mod storage;

pub use key::DomainKey;
pub use metrics::CacheMetrics;
pub use storage::{CacheConfig, ResolutionCache};
