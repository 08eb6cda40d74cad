use dnsrelay_application::ports::{DatagramSink, ResolutionCachePort};
use dnsrelay_application::use_cases::RelayDatagramUseCase;
use dnsrelay_infrastructure::dns::{
    run_receiver, ResolutionCache, TaskQueue, TransactionTable, UdpDatagramSink, WorkerPool,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::task::JoinHandle;
use tokio::time::timeout;

pub const RECV_TIMEOUT: Duration = Duration::from_secs(2);
pub const SILENCE_WINDOW: Duration = Duration::from_millis(200);

/// A relay on loopback wired to a scripted upstream socket.
pub struct RelayHarness {
    pub relay_addr: SocketAddr,
    pub upstream: UdpSocket,
    pub cache: Arc<ResolutionCache>,
    pub mux: Arc<TransactionTable>,
    pub relay: Arc<RelayDatagramUseCase>,
    receiver: JoinHandle<()>,
    _queue: TaskQueue,
    pool: WorkerPool,
}

impl RelayHarness {
    pub async fn start() -> Self {
        let upstream = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let upstream_addr = upstream.local_addr().unwrap();

        let socket = Arc::new(UdpSocket::bind("127.0.0.1:0").await.unwrap());
        let relay_addr = socket.local_addr().unwrap();

        let cache = Arc::new(ResolutionCache::default());
        let mux = Arc::new(TransactionTable::default());
        let sink: Arc<dyn DatagramSink> = Arc::new(UdpDatagramSink::new(socket.clone()));
        let relay = Arc::new(RelayDatagramUseCase::new(
            cache.clone(),
            mux.clone(),
            sink,
            upstream_addr,
        ));

        let queue = TaskQueue::new(8);
        let pool = WorkerPool::spawn(&queue, relay.clone(), 2);
        let receiver = tokio::spawn(run_receiver(socket, queue.sender(), 4096));

        Self {
            relay_addr,
            upstream,
            cache,
            mux,
            relay,
            receiver,
            _queue: queue,
            pool,
        }
    }

    pub fn add_static(&self, domain: &str, address: &str) {
        self.cache.add_static(domain, address.parse().unwrap());
    }

    /// Waits for the next datagram the relay forwards upstream.
    pub async fn upstream_recv(&self) -> (Vec<u8>, SocketAddr) {
        recv(&self.upstream).await
    }

    pub async fn upstream_reply(&self, payload: &[u8]) {
        self.upstream.send_to(payload, self.relay_addr).await.unwrap();
    }
}

impl Drop for RelayHarness {
    fn drop(&mut self) {
        self.receiver.abort();
        self.pool.abort();
    }
}

pub async fn client() -> UdpSocket {
    UdpSocket::bind("127.0.0.1:0").await.unwrap()
}

pub async fn recv(socket: &UdpSocket) -> (Vec<u8>, SocketAddr) {
    let mut buf = vec![0u8; 4096];
    let (len, from) = timeout(RECV_TIMEOUT, socket.recv_from(&mut buf))
        .await
        .expect("timed out waiting for datagram")
        .unwrap();
    buf.truncate(len);
    (buf, from)
}

/// True when nothing arrives within the silence window.
pub async fn stays_silent(socket: &UdpSocket) -> bool {
    let mut buf = vec![0u8; 4096];
    timeout(SILENCE_WINDOW, socket.recv_from(&mut buf))
        .await
        .is_err()
}

/// Polls `check` until it holds or the receive timeout elapses.
pub async fn eventually(mut check: impl FnMut() -> bool) -> bool {
    let deadline = tokio::time::Instant::now() + RECV_TIMEOUT;
    while tokio::time::Instant::now() < deadline {
        if check() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    check()
}
