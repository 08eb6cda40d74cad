pub mod relay_maintenance;
pub mod relay_stats;
pub mod runner;

pub use relay_maintenance::{MaintenanceOutcome, RelayMaintenanceJob};
pub use relay_stats::RelayStatsJob;
pub use runner::JobRunner;
