//! dnsrelay infrastructure: the in-memory tables behind the application
//! ports, the UDP transport and worker pool, and the file-backed adapters.
pub mod clock;
pub mod dns;
pub mod system;
