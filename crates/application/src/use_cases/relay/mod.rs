mod metrics;
mod relay_datagram;

pub use metrics::{RelayMetrics, RelayMetricsSnapshot};
pub use relay_datagram::{RelayDatagramUseCase, RelayOutcome};
