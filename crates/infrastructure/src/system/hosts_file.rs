use dnsrelay_application::ports::ResolutionCachePort;
use dnsrelay_domain::DomainError;
use std::net::Ipv4Addr;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostsEntry {
    pub address: Ipv4Addr,
    pub domain: String,
}

/// Parses `<ipv4> <domain>` lines. Blank lines and `#` comments are
/// ignored, fields past the second are ignored, and lines whose address
/// does not parse are skipped with a warning.
pub fn parse_hosts(content: &str) -> Vec<HostsEntry> {
    let mut entries = Vec::new();

    for (line_num, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut fields = line.split_whitespace();
        let (Some(address), Some(domain)) = (fields.next(), fields.next()) else {
            warn!(line = line_num + 1, content = line, "Hosts line has no domain, skipped");
            continue;
        };

        match address.parse::<Ipv4Addr>() {
            Ok(address) => entries.push(HostsEntry {
                address,
                domain: domain.to_string(),
            }),
            Err(_) => {
                warn!(line = line_num + 1, address, "Invalid IPv4 address in hosts file, skipped");
            }
        }
    }

    entries
}

/// Loads the static hosts table into the resolution cache as permanent
/// entries.
pub struct HostsFileLoader {
    path: PathBuf,
}

impl HostsFileLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the number of entries added. A missing or unreadable file is
    /// an error; malformed lines are not.
    pub fn load_into(&self, cache: &dyn ResolutionCachePort) -> Result<usize, DomainError> {
        let content =
            std::fs::read_to_string(&self.path).map_err(|e| DomainError::HostsFile {
                path: self.path.display().to_string(),
                reason: e.to_string(),
            })?;

        let entries = parse_hosts(&content);
        for entry in &entries {
            cache.add_static(&entry.domain, entry.address);
            debug!(domain = %entry.domain, address = %entry.address, "Static entry loaded");
        }

        info!(path = %self.path.display(), entries = entries.len(), "Hosts file loaded");
        Ok(entries.len())
    }
}
