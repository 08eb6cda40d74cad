use super::error::ParseError;
use super::reader::WireReader;
use std::fmt;

const QR_MASK: u16 = 0x8000;
const OPCODE_MASK: u16 = 0x7800;
const AA_MASK: u16 = 0x0400;
const TC_MASK: u16 = 0x0200;
const RD_MASK: u16 = 0x0100;
const RA_MASK: u16 = 0x0080;
const Z_MASK: u16 = 0x0070;
const RCODE_MASK: u16 = 0x000F;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    Query,
    InverseQuery,
    Status,
    Notify,
    Update,
    Unknown(u8),
}

impl Opcode {
    pub fn from_u8(value: u8) -> Self {
        match value & 0x0F {
            0 => Opcode::Query,
            1 => Opcode::InverseQuery,
            2 => Opcode::Status,
            4 => Opcode::Notify,
            5 => Opcode::Update,
            other => Opcode::Unknown(other),
        }
    }

    pub fn to_u8(self) -> u8 {
        match self {
            Opcode::Query => 0,
            Opcode::InverseQuery => 1,
            Opcode::Status => 2,
            Opcode::Notify => 4,
            Opcode::Update => 5,
            Opcode::Unknown(other) => other & 0x0F,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseCode {
    NoError,
    FormErr,
    ServFail,
    NxDomain,
    NotImp,
    Refused,
    Unknown(u8),
}

impl ResponseCode {
    pub fn from_u8(value: u8) -> Self {
        match value & 0x0F {
            0 => ResponseCode::NoError,
            1 => ResponseCode::FormErr,
            2 => ResponseCode::ServFail,
            3 => ResponseCode::NxDomain,
            4 => ResponseCode::NotImp,
            5 => ResponseCode::Refused,
            other => ResponseCode::Unknown(other),
        }
    }

    pub fn to_u8(self) -> u8 {
        match self {
            ResponseCode::NoError => 0,
            ResponseCode::FormErr => 1,
            ResponseCode::ServFail => 2,
            ResponseCode::NxDomain => 3,
            ResponseCode::NotImp => 4,
            ResponseCode::Refused => 5,
            ResponseCode::Unknown(other) => other & 0x0F,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseCode::NoError => "NOERROR",
            ResponseCode::FormErr => "FORMERR",
            ResponseCode::ServFail => "SERVFAIL",
            ResponseCode::NxDomain => "NXDOMAIN",
            ResponseCode::NotImp => "NOTIMP",
            ResponseCode::Refused => "REFUSED",
            ResponseCode::Unknown(_) => "UNKNOWN",
        }
    }
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseCode::Unknown(code) => write!(f, "RCODE{}", code),
            known => write!(f, "{}", known.as_str()),
        }
    }
}

/// The fixed 12-byte message header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub id: u16,
    /// QR bit: set on responses.
    pub response: bool,
    pub opcode: Opcode,
    pub authoritative: bool,
    pub truncated: bool,
    pub recursion_desired: bool,
    pub recursion_available: bool,
    /// The 3-bit Z field, carried through untouched on decode.
    pub reserved: u8,
    pub response_code: ResponseCode,
    pub question_count: u16,
    pub answer_count: u16,
    pub authority_count: u16,
    pub additional_count: u16,
}

impl Header {
    pub const LEN: usize = 12;

    pub fn flags(&self) -> u16 {
        let mut flags = 0u16;
        if self.response {
            flags |= QR_MASK;
        }
        flags |= ((self.opcode.to_u8() as u16) << 11) & OPCODE_MASK;
        if self.authoritative {
            flags |= AA_MASK;
        }
        if self.truncated {
            flags |= TC_MASK;
        }
        if self.recursion_desired {
            flags |= RD_MASK;
        }
        if self.recursion_available {
            flags |= RA_MASK;
        }
        flags |= ((self.reserved as u16) << 4) & Z_MASK;
        flags |= self.response_code.to_u8() as u16 & RCODE_MASK;
        flags
    }

    pub(super) fn read(reader: &mut WireReader<'_>) -> Result<Self, ParseError> {
        let id = reader.read_u16()?;
        let flags = reader.read_u16()?;

        Ok(Self {
            id,
            response: flags & QR_MASK != 0,
            opcode: Opcode::from_u8(((flags & OPCODE_MASK) >> 11) as u8),
            authoritative: flags & AA_MASK != 0,
            truncated: flags & TC_MASK != 0,
            recursion_desired: flags & RD_MASK != 0,
            recursion_available: flags & RA_MASK != 0,
            reserved: ((flags & Z_MASK) >> 4) as u8,
            response_code: ResponseCode::from_u8((flags & RCODE_MASK) as u8),
            question_count: reader.read_u16()?,
            answer_count: reader.read_u16()?,
            authority_count: reader.read_u16()?,
            additional_count: reader.read_u16()?,
        })
    }

    pub(super) fn write(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.id.to_be_bytes());
        out.extend_from_slice(&self.flags().to_be_bytes());
        out.extend_from_slice(&self.question_count.to_be_bytes());
        out.extend_from_slice(&self.answer_count.to_be_bytes());
        out.extend_from_slice(&self.authority_count.to_be_bytes());
        out.extend_from_slice(&self.additional_count.to_be_bytes());
    }
}
