use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Default `tracing` filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// File receiving one line per handled query; an empty path turns
    /// the query log off.
    #[serde(default = "default_query_log_path")]
    pub query_log_path: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            query_log_path: default_query_log_path(),
        }
    }
}

impl LoggingConfig {
    /// The configured query log path, unless it was left empty.
    pub fn query_log_file(&self) -> Option<&str> {
        self.query_log_path.as_deref().filter(|path| !path.is_empty())
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_query_log_path() -> Option<String> {
    Some("Log/log.txt".to_string())
}
