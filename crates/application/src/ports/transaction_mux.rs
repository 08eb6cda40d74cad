use dnsrelay_domain::DomainError;
use std::net::SocketAddr;

/// The client side of an outstanding upstream transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientBinding {
    pub client_id: u16,
    pub client_addr: SocketAddr,
}

/// Maps relay-assigned transaction ids back to the client that asked.
pub trait TransactionMuxPort: Send + Sync {
    /// Returns a fresh non-zero id, or [`DomainError::PoolExhausted`].
    fn allocate(&self, client_id: u16, client_addr: SocketAddr) -> Result<u16, DomainError>;

    /// Only live, unexpired ids resolve.
    fn lookup(&self, server_id: u16) -> Option<ClientBinding>;

    fn release(&self, server_id: u16);

    /// Clears every expired slot; returns how many were cleared.
    fn sweep(&self) -> usize;

    fn live_count(&self) -> usize;
}
