pub mod relay;

pub use relay::{RelayDatagramUseCase, RelayMetrics, RelayMetricsSnapshot, RelayOutcome};
