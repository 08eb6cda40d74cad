use super::RecordType;
use std::net::Ipv4Addr;

/// Type-tagged RDATA.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordData {
    /// Four-byte IPv4 address of an `A` record.
    A(Ipv4Addr),
    /// Target name of a `CNAME` record.
    CName(String),
    /// Any other payload, kept verbatim.
    Opaque(Vec<u8>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    pub name: String,
    pub record_type: RecordType,
    pub class: u16,
    /// Seconds, relative to the moment the record was received.
    pub ttl: u32,
    pub rdlength: u16,
    pub data: RecordData,
}

impl ResourceRecord {
    /// Returns the address when this is a well-formed `A` record.
    pub fn ipv4(&self) -> Option<Ipv4Addr> {
        match (&self.record_type, &self.data) {
            (RecordType::A, RecordData::A(addr)) => Some(*addr),
            _ => None,
        }
    }
}
