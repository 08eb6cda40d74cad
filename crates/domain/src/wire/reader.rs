use super::error::ParseError;
use super::header::Header;
use super::message::{Message, Question};
use super::name::decode_name;
use crate::dns_record::{RecordData, RecordType, ResourceRecord};
use std::net::Ipv4Addr;

/// Upper bound on pre-allocated section capacity; counts come from the wire.
const MAX_PREALLOCATED_RECORDS: usize = 16;

/// Bounds-checked cursor over a received datagram.
pub(super) struct WireReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> WireReader<'a> {
    pub(super) fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn take(&mut self, needed: usize) -> Result<&'a [u8], ParseError> {
        let end = self.pos.checked_add(needed).ok_or(ParseError::Truncated {
            offset: self.pos,
            needed,
        })?;
        let bytes = self.buf.get(self.pos..end).ok_or(ParseError::Truncated {
            offset: self.pos,
            needed,
        })?;
        self.pos = end;
        Ok(bytes)
    }

    pub(super) fn read_u16(&mut self) -> Result<u16, ParseError> {
        let bytes = self.take(2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    pub(super) fn read_u32(&mut self) -> Result<u32, ParseError> {
        let bytes = self.take(4)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub(super) fn read_name(&mut self) -> Result<String, ParseError> {
        let (name, next) = decode_name(self.buf, self.pos)?;
        self.pos = next;
        Ok(name)
    }

    fn read_question(&mut self) -> Result<Question, ParseError> {
        let name = self.read_name()?;
        let record_type = RecordType::from_u16(self.read_u16()?);
        let class = self.read_u16()?;
        Ok(Question {
            name,
            record_type,
            class,
        })
    }

    fn read_record(&mut self) -> Result<ResourceRecord, ParseError> {
        let name = self.read_name()?;
        let record_type = RecordType::from_u16(self.read_u16()?);
        let class = self.read_u16()?;
        let ttl = self.read_u32()?;
        let rdlength = self.read_u16()?;
        let rdata_offset = self.pos;
        let rdata = self.take(rdlength as usize)?;

        let data = match record_type {
            RecordType::A if rdata.len() == 4 => {
                RecordData::A(Ipv4Addr::new(rdata[0], rdata[1], rdata[2], rdata[3]))
            }
            // A CNAME target that cannot be decoded degrades to raw bytes
            // instead of failing the whole message.
            RecordType::CNAME => match decode_name(self.buf, rdata_offset) {
                Ok((target, _)) => RecordData::CName(target),
                Err(_) => RecordData::Opaque(rdata.to_vec()),
            },
            _ => RecordData::Opaque(rdata.to_vec()),
        };

        Ok(ResourceRecord {
            name,
            record_type,
            class,
            ttl,
            rdlength,
            data,
        })
    }

    fn read_records(&mut self, count: u16) -> Result<Vec<ResourceRecord>, ParseError> {
        let mut records = Vec::with_capacity((count as usize).min(MAX_PREALLOCATED_RECORDS));
        for _ in 0..count {
            records.push(self.read_record()?);
        }
        Ok(records)
    }
}

/// Decodes only the fixed header.
pub fn peek_header(bytes: &[u8]) -> Result<Header, ParseError> {
    Header::read(&mut WireReader::new(bytes))
}

/// Decodes a complete message.
///
/// Every section declared by the header must be present; a short or
/// malformed datagram yields a [`ParseError`] and no partial message.
pub fn decode(bytes: &[u8]) -> Result<Message, ParseError> {
    let mut reader = WireReader::new(bytes);
    let header = Header::read(&mut reader)?;

    let mut questions =
        Vec::with_capacity((header.question_count as usize).min(MAX_PREALLOCATED_RECORDS));
    for _ in 0..header.question_count {
        questions.push(reader.read_question()?);
    }

    let answers = reader.read_records(header.answer_count)?;
    let authorities = reader.read_records(header.authority_count)?;
    let additionals = reader.read_records(header.additional_count)?;

    Ok(Message {
        header,
        questions,
        answers,
        authorities,
        additionals,
    })
}
