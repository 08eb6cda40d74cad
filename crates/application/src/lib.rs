//! dnsrelay application layer: the ports the relay engine depends on and
//! the dispatcher use case that drives them.
pub mod ports;
pub mod use_cases;
