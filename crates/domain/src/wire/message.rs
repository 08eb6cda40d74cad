use super::header::{Header, Opcode};
use crate::dns_record::{RecordType, ResourceRecord};
use std::net::Ipv4Addr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    /// Dotted name, case preserved, no trailing dot.
    pub name: String,
    pub record_type: RecordType,
    pub class: u16,
}

/// A fully decoded message. Section lengths always equal the header counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub header: Header,
    pub questions: Vec<Question>,
    pub answers: Vec<ResourceRecord>,
    pub authorities: Vec<ResourceRecord>,
    pub additionals: Vec<ResourceRecord>,
}

impl Message {
    pub fn is_response(&self) -> bool {
        self.header.response
    }

    pub fn is_standard_query(&self) -> bool {
        self.header.opcode == Opcode::Query
    }

    /// Only the first question is ever acted upon.
    pub fn first_question(&self) -> Option<&Question> {
        self.questions.first()
    }

    /// `(address, ttl)` for every A record in the answer section, in wire order.
    pub fn answer_addresses(&self) -> impl Iterator<Item = (Ipv4Addr, u32)> + '_ {
        self.answers
            .iter()
            .filter_map(|record| record.ipv4().map(|addr| (addr, record.ttl)))
    }
}
