pub mod hosts_file;

pub use hosts_file::{parse_hosts, HostsEntry, HostsFileLoader};
