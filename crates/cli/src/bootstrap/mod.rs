mod config;
mod logging;

pub use config::{load_config, split_positionals};
pub use logging::init_logging;
