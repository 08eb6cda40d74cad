use async_trait::async_trait;
use dnsrelay_application::ports::DatagramSink;
use dnsrelay_domain::DomainError;
use std::net::SocketAddr;
use std::sync::Mutex;

#[derive(Default)]
pub struct RecordingSink {
    sent: Mutex<Vec<(Vec<u8>, SocketAddr)>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<(Vec<u8>, SocketAddr)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl DatagramSink for RecordingSink {
    async fn send_to(&self, payload: &[u8], target: SocketAddr) -> Result<(), DomainError> {
        self.sent.lock().unwrap().push((payload.to_vec(), target));
        Ok(())
    }
}
