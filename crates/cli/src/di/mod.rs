use anyhow::Context;
use dnsrelay_application::ports::{DatagramSink, QueryLogSink, ResolutionCachePort};
use dnsrelay_application::use_cases::RelayDatagramUseCase;
use dnsrelay_domain::Config;
use dnsrelay_infrastructure::dns::{
    CacheConfig, FileQueryLogger, QueryLogChannel, ResolutionCache, TransactionTable,
    UdpDatagramSink,
};
use dnsrelay_infrastructure::system::HostsFileLoader;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio::task::JoinHandle;
use tracing::info;

/// Shared state wired once at startup and handed to the server and jobs.
pub struct RelayServices {
    pub cache: Arc<ResolutionCache>,
    pub mux: Arc<TransactionTable>,
    pub relay: Arc<RelayDatagramUseCase>,
    pub query_log_task: Option<JoinHandle<()>>,
}

impl RelayServices {
    pub async fn build(config: &Config, socket: Arc<UdpSocket>) -> anyhow::Result<Self> {
        let upstream = config.dns.upstream_addr()?;

        let cache = Arc::new(ResolutionCache::new(CacheConfig {
            max_entries: config.dns.cache_max_entries,
            freshness_secs: config.dns.cache_freshness_secs,
        }));
        let mux = Arc::new(TransactionTable::new(config.dns.transaction_ttl_secs));

        let loaded = HostsFileLoader::new(&config.dns.hosts_file)
            .load_into(cache.as_ref() as &dyn ResolutionCachePort)
            .context("Failed to load hosts file")?;
        info!(
            path = %config.dns.hosts_file,
            entries = loaded,
            cache_size = cache.len(),
            "Static hosts loaded"
        );

        let sink: Arc<dyn DatagramSink> = Arc::new(UdpDatagramSink::new(socket));
        let mut relay = RelayDatagramUseCase::new(cache.clone(), mux.clone(), sink, upstream);

        let mut query_log_task = None;
        if let Some(path) = config.logging.query_log_file() {
            let logger = FileQueryLogger::open(path)
                .await
                .with_context(|| format!("Failed to open query log {}", path))?;
            let (channel, receiver) = QueryLogChannel::new();
            query_log_task = Some(logger.start(receiver));
            relay = relay.with_query_log(Arc::new(channel) as Arc<dyn QueryLogSink>);
            info!(path = %path, "Query log enabled");
        }

        info!(upstream = %upstream, "Relay services initialized");

        Ok(Self {
            cache,
            mux,
            relay: Arc::new(relay),
            query_log_task,
        })
    }
}
