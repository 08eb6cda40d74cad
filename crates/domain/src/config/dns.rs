use serde::{Deserialize, Serialize};
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};

use super::errors::ConfigError;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DnsConfig {
    /// IPv4 address of the upstream resolver.
    #[serde(default = "default_upstream")]
    pub upstream: String,

    #[serde(default = "default_upstream_port")]
    pub upstream_port: u16,

    /// Static hosts table (`<ipv4> <domain>` per line).
    #[serde(default = "default_hosts_file")]
    pub hosts_file: String,

    #[serde(default = "default_cache_max_entries")]
    pub cache_max_entries: usize,

    /// How long a dynamic entry stays answerable after its last update.
    #[serde(default = "default_cache_freshness_secs")]
    pub cache_freshness_secs: u64,

    /// Lifetime of an outstanding upstream transaction.
    #[serde(default = "default_transaction_ttl_secs")]
    pub transaction_ttl_secs: u64,

    #[serde(default = "default_maintenance_interval_secs")]
    pub maintenance_interval_secs: u64,
}

impl DnsConfig {
    pub fn upstream_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: Ipv4Addr = self.upstream.trim().parse().map_err(|_| {
            ConfigError::Validation(format!(
                "Upstream '{}' is not an IPv4 address",
                self.upstream
            ))
        })?;
        Ok(SocketAddr::V4(SocketAddrV4::new(ip, self.upstream_port)))
    }
}

impl Default for DnsConfig {
    fn default() -> Self {
        Self {
            upstream: default_upstream(),
            upstream_port: default_upstream_port(),
            hosts_file: default_hosts_file(),
            cache_max_entries: default_cache_max_entries(),
            cache_freshness_secs: default_cache_freshness_secs(),
            transaction_ttl_secs: default_transaction_ttl_secs(),
            maintenance_interval_secs: default_maintenance_interval_secs(),
        }
    }
}

fn default_upstream() -> String {
    "10.3.9.6".to_string()
}

fn default_upstream_port() -> u16 {
    53
}

fn default_hosts_file() -> String {
    "dnsrelay.txt".to_string()
}

fn default_cache_max_entries() -> usize {
    65536
}

fn default_cache_freshness_secs() -> u64 {
    300
}

fn default_transaction_ttl_secs() -> u64 {
    30
}

fn default_maintenance_interval_secs() -> u64 {
    5
}
