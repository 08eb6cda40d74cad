use dnsrelay_application::use_cases::{RelayDatagramUseCase, RelayOutcome};
use dnsrelay_domain::{Datagram, DomainError};
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinSet;
use tracing::{debug, info, trace, warn};

pub const DEFAULT_QUEUE_CAPACITY: usize = 64;
pub const DEFAULT_WORKER_COUNT: usize = 28;

/// Bounded hand-off between the receiver and the workers. Producers wait
/// when it is full; every worker pulls from the same receiving half.
pub struct TaskQueue {
    sender: mpsc::Sender<Datagram>,
    receiver: Arc<Mutex<mpsc::Receiver<Datagram>>>,
}

impl TaskQueue {
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        Self {
            sender,
            receiver: Arc::new(Mutex::new(receiver)),
        }
    }

    pub fn sender(&self) -> mpsc::Sender<Datagram> {
        self.sender.clone()
    }

    pub async fn enqueue(&self, datagram: Datagram) -> Result<(), DomainError> {
        self.sender
            .send(datagram)
            .await
            .map_err(|_| DomainError::IoError("Task queue closed".to_string()))
    }

    /// Next datagram, or `None` once every sender is gone and the queue
    /// has drained.
    pub async fn dequeue(&self) -> Option<Datagram> {
        self.receiver.lock().await.recv().await
    }

    /// Free slots before producers start waiting.
    pub fn available(&self) -> usize {
        self.sender.capacity()
    }
}

impl Default for TaskQueue {
    fn default() -> Self {
        Self::new(DEFAULT_QUEUE_CAPACITY)
    }
}

/// Fixed set of tasks that dequeue datagrams and run the relay use case.
pub struct WorkerPool {
    workers: JoinSet<()>,
}

impl WorkerPool {
    pub fn spawn(queue: &TaskQueue, use_case: Arc<RelayDatagramUseCase>, count: usize) -> Self {
        let mut workers = JoinSet::new();

        for worker_id in 0..count.max(1) {
            // Workers hold only the receiving half; the queue closes once
            // every sender is dropped.
            let receiver = Arc::clone(&queue.receiver);
            let use_case = Arc::clone(&use_case);
            workers.spawn(async move {
                run_worker(worker_id, receiver, use_case).await;
            });
        }

        info!(workers = count.max(1), "Worker pool started");
        Self { workers }
    }

    pub fn len(&self) -> usize {
        self.workers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workers.is_empty()
    }

    /// Waits for every worker to finish.
    pub async fn join(mut self) {
        while self.workers.join_next().await.is_some() {}
    }

    pub fn abort(&mut self) {
        self.workers.abort_all();
    }
}

async fn run_worker(
    worker_id: usize,
    receiver: Arc<Mutex<mpsc::Receiver<Datagram>>>,
    use_case: Arc<RelayDatagramUseCase>,
) {
    loop {
        let next = receiver.lock().await.recv().await;
        let Some(datagram) = next else {
            break;
        };

        let source = datagram.source;
        match use_case.execute(datagram).await {
            Ok(RelayOutcome::Answered { addresses, .. }) => {
                trace!(worker = worker_id, client = %source, addresses, "Answered");
            }
            Ok(RelayOutcome::Forwarded { server_id }) => {
                trace!(worker = worker_id, client = %source, server_id, "Forwarded");
            }
            Ok(RelayOutcome::Relayed { client }) => {
                trace!(worker = worker_id, client = %client, "Relayed");
            }
            Err(e @ (DomainError::Parse(_) | DomainError::UnknownTransaction(_))) => {
                debug!(worker = worker_id, source = %source, error = %e, "Dropped datagram");
            }
            Err(e) => {
                warn!(worker = worker_id, source = %source, error = %e, "Failed to handle datagram");
            }
        }
    }

    debug!(worker = worker_id, "Worker stopping");
}
