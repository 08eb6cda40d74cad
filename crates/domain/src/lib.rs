//! dnsrelay domain layer: wire format, records, configuration and the
//! value types shared by every other crate.
pub mod config;
pub mod datagram;
pub mod dns_record;
pub mod errors;
pub mod query_log;
pub mod wire;

pub use config::{CliOverrides, Config, ConfigError};
pub use datagram::Datagram;
pub use dns_record::{RecordData, RecordType, ResourceRecord};
pub use errors::DomainError;
pub use query_log::{QueryLog, QueryOutcome, NOT_FOUND_MARKER};
pub use wire::{Header, Message, Opcode, ParseError, Question, ResponseCode};
