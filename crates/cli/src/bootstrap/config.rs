use anyhow::{bail, Context};
use dnsrelay_domain::{CliOverrides, Config};
use std::net::Ipv4Addr;

pub fn load_config(path: Option<&str>, overrides: CliOverrides) -> anyhow::Result<Config> {
    let config = Config::load(path, overrides).context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// Sorts the two optional positionals into `(upstream, hosts_file)`.
///
/// `dnsrelay 8.8.8.8 hosts.txt` and `dnsrelay hosts.txt` are both accepted;
/// a second positional after a non-address first one is rejected.
pub fn split_positionals(
    first: Option<String>,
    second: Option<String>,
) -> anyhow::Result<(Option<String>, Option<String>)> {
    match (first, second) {
        (None, _) => Ok((None, None)),
        (Some(first), hosts) if first.parse::<Ipv4Addr>().is_ok() => Ok((Some(first), hosts)),
        (Some(first), None) => Ok((None, Some(first))),
        (Some(first), Some(_)) => bail!("Upstream '{}' is not an IPv4 address", first),
    }
}
