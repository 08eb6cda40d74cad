use async_trait::async_trait;
use dnsrelay_application::ports::DatagramSink;
use dnsrelay_domain::{Datagram, DomainError};
use std::fmt;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio::sync::mpsc;
use tracing::{debug, trace, warn};

/// Sends through the relay's single listening socket, so upstream replies
/// come back to the same port the clients talk to.
pub struct UdpDatagramSink {
    socket: Arc<UdpSocket>,
}

impl UdpDatagramSink {
    pub fn new(socket: Arc<UdpSocket>) -> Self {
        Self { socket }
    }
}

#[async_trait]
impl DatagramSink for UdpDatagramSink {
    async fn send_to(&self, payload: &[u8], target: SocketAddr) -> Result<(), DomainError> {
        let sent = self.socket.send_to(payload, target).await?;
        if sent < payload.len() {
            return Err(DomainError::IoError(format!(
                "Short send to {}: {} of {} bytes",
                target,
                sent,
                payload.len()
            )));
        }
        Ok(())
    }
}

/// Space-separated lowercase hex, rendered only when the event is enabled.
pub(crate) struct HexDump<'a>(pub &'a [u8]);

impl fmt::Display for HexDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, byte) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

/// Reads datagrams off `socket` and pushes them into the task queue.
///
/// Waits while the queue is full. Receive errors are logged and skipped;
/// the loop ends when every worker has gone away.
pub async fn run_receiver(
    socket: Arc<UdpSocket>,
    queue: mpsc::Sender<Datagram>,
    buffer_size: usize,
) {
    let mut buf = vec![0u8; buffer_size];

    loop {
        let (len, source) = match socket.recv_from(&mut buf).await {
            Ok(received) => received,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                // ICMP errors from earlier sends surface here on some platforms.
                warn!(error = %e, "UDP receive error");
                continue;
            }
        };

        trace!(
            len,
            source = %source,
            payload = %HexDump(&buf[..len]),
            "Datagram received"
        );
        if queue.send(Datagram::new(&buf[..len], source)).await.is_err() {
            debug!("Task queue closed, receiver stopping");
            break;
        }
    }
}
