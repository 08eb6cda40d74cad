use crate::di::RelayServices;
use anyhow::Context;
use dnsrelay_domain::config::ServerConfig;
use dnsrelay_domain::Config;
use dnsrelay_infrastructure::dns::{run_receiver, TaskQueue, WorkerPool};
use dnsrelay_jobs::{JobRunner, RelayMaintenanceJob, RelayStatsJob};
use socket2::{Domain, Protocol, Socket, Type};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

const SOCKET_BUFFER_SIZE: usize = 512 * 1024;

/// Binds the single socket used both for clients and for upstream traffic.
pub fn bind_udp_socket(config: &ServerConfig) -> anyhow::Result<Arc<UdpSocket>> {
    let bind_addr = format!("{}:{}", config.bind_address, config.dns_port);
    let socket_addr: SocketAddr = bind_addr
        .parse()
        .with_context(|| format!("Invalid bind address {}", bind_addr))?;

    let socket =
        create_udp_socket(socket_addr).with_context(|| format!("Failed to bind {}", socket_addr))?;
    info!(bind_address = %socket_addr, "UDP socket bound");
    Ok(Arc::new(socket))
}

fn create_udp_socket(socket_addr: SocketAddr) -> anyhow::Result<UdpSocket> {
    let domain = if socket_addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };
    let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;
    if socket_addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    socket.set_recv_buffer_size(SOCKET_BUFFER_SIZE)?;
    socket.set_send_buffer_size(SOCKET_BUFFER_SIZE)?;
    socket.bind(&socket_addr.into())?;
    socket.set_nonblocking(true)?;
    let std_socket: std::net::UdpSocket = socket.into();
    Ok(UdpSocket::from_std(std_socket)?)
}

/// Runs the receiver, worker pool and background jobs until Ctrl-C.
pub async fn run_relay(
    config: &Config,
    socket: Arc<UdpSocket>,
    services: RelayServices,
) -> anyhow::Result<()> {
    let shutdown = CancellationToken::new();

    JobRunner::new()
        .with_relay_maintenance(
            RelayMaintenanceJob::new(services.mux.clone(), services.cache.clone())
                .with_interval(config.dns.maintenance_interval_secs),
        )
        .with_relay_stats(RelayStatsJob::new(
            services.relay.metrics(),
            services.cache.clone(),
            services.mux.clone(),
        ))
        .with_shutdown_token(shutdown.clone())
        .start()
        .await;

    let queue = TaskQueue::new(config.server.queue_capacity);
    let pool = WorkerPool::spawn(&queue, services.relay.clone(), config.server.worker_count);
    let mut receiver = tokio::spawn(run_receiver(
        socket,
        queue.sender(),
        config.server.max_datagram_size,
    ));

    info!(
        workers = pool.len(),
        queue_capacity = config.server.queue_capacity,
        "DNS relay ready"
    );

    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            result.context("Failed to listen for shutdown signal")?;
            info!("Shutdown signal received");
        }
        result = &mut receiver => {
            if let Err(e) = result {
                error!(error = %e, "Receiver task failed");
            }
        }
    }

    shutdown.cancel();
    receiver.abort();
    drop(queue);
    pool.join().await;

    // The relay holds the last query log sender; dropping it ends the writer.
    drop(services.relay);
    if let Some(task) = services.query_log_task {
        let _ = task.await;
    }

    Ok(())
}
