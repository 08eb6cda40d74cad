use async_trait::async_trait;
use dnsrelay_domain::DomainError;
use std::net::SocketAddr;

/// Outbound half of the relay socket. Clients and the upstream resolver are
/// both reached through the same sink.
#[async_trait]
pub trait DatagramSink: Send + Sync {
    async fn send_to(&self, payload: &[u8], target: SocketAddr) -> Result<(), DomainError>;
}
