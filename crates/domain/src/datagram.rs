use std::net::SocketAddr;

/// One received UDP payload and where it came from; the unit of work handed
/// from the receiver to the worker pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Datagram {
    pub payload: Vec<u8>,
    pub source: SocketAddr,
}

impl Datagram {
    pub fn new(payload: impl Into<Vec<u8>>, source: SocketAddr) -> Self {
        Self {
            payload: payload.into(),
            source,
        }
    }

    pub fn len(&self) -> usize {
        self.payload.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }
}
