use chrono::Local;
use dnsrelay_application::ports::QueryLogSink;
use dnsrelay_domain::{DomainError, QueryLog};
use std::path::{Path, PathBuf};
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Non-blocking producer side: workers push entries, a single consumer
/// task owns the file.
#[derive(Clone)]
pub struct QueryLogChannel {
    sender: mpsc::UnboundedSender<QueryLog>,
}

impl QueryLogChannel {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<QueryLog>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl QueryLogSink for QueryLogChannel {
    fn record(&self, entry: QueryLog) {
        if self.sender.send(entry).is_err() {
            debug!("Query log consumer gone, entry dropped");
        }
    }
}

/// Appends `<timestamp>  <domain>  <result>` lines to a text file.
pub struct FileQueryLogger {
    path: PathBuf,
    file: File,
}

impl FileQueryLogger {
    /// Opens (creating if needed) the log file in append mode.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, DomainError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await?;
        Ok(Self { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn write(&mut self, entry: &QueryLog) -> Result<(), DomainError> {
        let mut line = entry.to_line(&Local::now());
        line.push('\n');
        self.file.write_all(line.as_bytes()).await?;
        self.file.flush().await?;
        Ok(())
    }

    /// Drains `receiver` until every producer is dropped.
    pub fn start(
        mut self,
        mut receiver: mpsc::UnboundedReceiver<QueryLog>,
    ) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            debug!(path = %self.path.display(), "Query log consumer started");
            let mut written = 0u64;

            while let Some(entry) = receiver.recv().await {
                match self.write(&entry).await {
                    Ok(()) => written += 1,
                    Err(e) => {
                        warn!(error = %e, domain = %entry.domain, "Failed to write query log")
                    }
                }
            }

            debug!(written, "Query log consumer stopped");
        })
    }
}
