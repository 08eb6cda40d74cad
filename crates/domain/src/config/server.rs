use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    #[serde(default = "default_dns_port")]
    pub dns_port: u16,

    /// Datagrams waiting for a worker; the receiver blocks when full.
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,

    #[serde(default = "default_worker_count")]
    pub worker_count: usize,

    /// Size of the receive buffer; longer datagrams are cut.
    #[serde(default = "default_max_datagram_size")]
    pub max_datagram_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            dns_port: default_dns_port(),
            queue_capacity: default_queue_capacity(),
            worker_count: default_worker_count(),
            max_datagram_size: default_max_datagram_size(),
        }
    }
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_dns_port() -> u16 {
    53
}

fn default_queue_capacity() -> usize {
    64
}

fn default_worker_count() -> usize {
    28
}

fn default_max_datagram_size() -> usize {
    4096
}
