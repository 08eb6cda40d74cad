use serde::{Deserialize, Serialize};

use super::dns::DnsConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::server::ServerConfig;

pub const DEFAULT_CONFIG_FILE: &str = "dnsrelay.toml";

/// Main configuration structure for the relay
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub dns: DnsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. dnsrelay.toml in current directory
    /// 3. Default configuration
    ///
    /// Command-line overrides are applied last.
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new(DEFAULT_CONFIG_FILE).exists() {
            Self::from_file(DEFAULT_CONFIG_FILE)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    /// Apply command-line overrides to configuration
    pub fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        match overrides.debug_level {
            0 => {}
            1 => self.logging.level = "debug".to_string(),
            _ => self.logging.level = "trace".to_string(),
        }
        if let Some(upstream) = overrides.upstream {
            self.dns.upstream = upstream;
        }
        if let Some(hosts) = overrides.hosts_file {
            self.dns.hosts_file = hosts;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(port) = overrides.dns_port {
            self.server.dns_port = port;
        }
        if let Some(path) = overrides.query_log_path {
            self.logging.query_log_path = Some(path);
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.dns_port == 0 {
            return Err(ConfigError::Validation("DNS port cannot be 0".to_string()));
        }
        if self.server.queue_capacity == 0 {
            return Err(ConfigError::Validation(
                "Queue capacity must be at least 1".to_string(),
            ));
        }
        if self.server.worker_count == 0 {
            return Err(ConfigError::Validation(
                "Worker count must be at least 1".to_string(),
            ));
        }
        if self.server.max_datagram_size < 512 {
            return Err(ConfigError::Validation(
                "Receive buffer must hold at least 512 bytes".to_string(),
            ));
        }
        if self.dns.cache_max_entries == 0 {
            return Err(ConfigError::Validation(
                "Cache capacity must be at least 1".to_string(),
            ));
        }
        if self.dns.transaction_ttl_secs == 0 || self.dns.maintenance_interval_secs == 0 {
            return Err(ConfigError::Validation(
                "Transaction TTL and maintenance interval must be positive".to_string(),
            ));
        }
        self.dns.upstream_addr()?;
        Ok(())
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    /// Number of `-d` flags: 1 selects debug, 2 or more selects trace.
    pub debug_level: u8,
    pub upstream: Option<String>,
    pub hosts_file: Option<String>,
    pub bind_address: Option<String>,
    pub dns_port: Option<u16>,
    pub query_log_path: Option<String>,
}
