pub mod dns;

pub use dns::{bind_udp_socket, run_relay};
