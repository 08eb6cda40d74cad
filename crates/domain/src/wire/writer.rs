use super::header::{Header, ResponseCode};
use super::message::Message;
use super::name::encode_name;
use crate::dns_record::RecordType;
use std::net::Ipv4Addr;

/// TTL stamped on every answer the relay synthesizes.
pub const RESPONSE_TTL: u32 = 300;
/// Most A records a synthesized reply carries, keeping it well under 512 bytes.
pub const MAX_ANSWER_ADDRESSES: usize = 10;

/// Builds the reply to `query` carrying one A record per address, up to
/// [`MAX_ANSWER_ADDRESSES`].
///
/// A leading `0.0.0.0` marks a blocked name: the reply is NXDOMAIN with no
/// answers. The first question is echoed back and its name and class are
/// reused for every answer record.
pub fn encode(query: &Message, addresses: &[Ipv4Addr], authoritative: bool) -> Vec<u8> {
    let question = query.first_question();
    let blocked = addresses.first().is_some_and(|addr| addr.is_unspecified());

    let answers: &[Ipv4Addr] = match question {
        Some(_) if !blocked => &addresses[..addresses.len().min(MAX_ANSWER_ADDRESSES)],
        _ => &[],
    };

    let header = Header {
        id: query.header.id,
        response: true,
        opcode: query.header.opcode,
        authoritative,
        truncated: false,
        recursion_desired: query.header.recursion_desired,
        recursion_available: true,
        reserved: 0,
        response_code: if blocked {
            ResponseCode::NxDomain
        } else {
            ResponseCode::NoError
        },
        question_count: u16::from(question.is_some()),
        answer_count: answers.len() as u16,
        authority_count: 0,
        additional_count: 0,
    };

    let mut out = Vec::with_capacity(Header::LEN + 64 + answers.len() * 32);
    header.write(&mut out);

    if let Some(question) = question {
        encode_name(&question.name, &mut out);
        out.extend_from_slice(&question.record_type.to_u16().to_be_bytes());
        out.extend_from_slice(&question.class.to_be_bytes());

        for addr in answers {
            encode_name(&question.name, &mut out);
            out.extend_from_slice(&RecordType::A.to_u16().to_be_bytes());
            out.extend_from_slice(&question.class.to_be_bytes());
            out.extend_from_slice(&RESPONSE_TTL.to_be_bytes());
            out.extend_from_slice(&4u16.to_be_bytes());
            out.extend_from_slice(&addr.octets());
        }
    }

    out
}

/// Overwrites the leading transaction id in place. Returns `false` when the
/// buffer is too short to hold one.
pub fn rewrite_transaction_id(bytes: &mut [u8], id: u16) -> bool {
    match bytes.get_mut(..2) {
        Some(field) => {
            field.copy_from_slice(&id.to_be_bytes());
            true
        }
        None => false,
    }
}
