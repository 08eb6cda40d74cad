mod udp;

pub use udp::{run_receiver, UdpDatagramSink};
