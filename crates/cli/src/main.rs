use clap::{ArgAction, Parser};
use dnsrelay_domain::CliOverrides;
use tracing::info;

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "dnsrelay")]
#[command(version)]
#[command(about = "Caching DNS relay: answers from a local table, forwards the rest upstream")]
struct Cli {
    /// Debug output; repeat (-dd) for trace-level detail
    #[arg(short = 'd', action = ArgAction::Count)]
    debug: u8,

    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// DNS listening port
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// Append one line per query to this file
    #[arg(long, value_name = "PATH")]
    log_file: Option<String>,

    /// Upstream resolver (IPv4); a non-address here is taken as the hosts file
    #[arg(value_name = "UPSTREAM")]
    upstream: Option<String>,

    /// Static hosts file (`<ipv4> <domain>` per line)
    #[arg(value_name = "HOSTS_FILE")]
    hosts_file: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (upstream, hosts_file) = bootstrap::split_positionals(cli.upstream, cli.hosts_file)?;
    let cli_overrides = CliOverrides {
        debug_level: cli.debug,
        upstream,
        hosts_file,
        bind_address: cli.bind,
        dns_port: cli.port,
        query_log_path: cli.log_file,
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;
    bootstrap::init_logging(&config.logging);

    info!("Starting dnsrelay v{}", env!("CARGO_PKG_VERSION"));

    let socket = server::bind_udp_socket(&config.server)?;
    let services = di::RelayServices::build(&config, socket.clone()).await?;

    server::run_relay(&config, socket, services).await?;

    info!("Relay shutdown complete");
    Ok(())
}
