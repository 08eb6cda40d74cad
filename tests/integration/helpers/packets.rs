use std::net::Ipv4Addr;

pub const FLAGS_QUERY_RD: u16 = 0x0100;
pub const FLAGS_RESPONSE_RD_RA: u16 = 0x8180;

pub fn wire_name(name: &str) -> Vec<u8> {
    let mut out = Vec::new();
    for label in name.split('.').filter(|l| !l.is_empty()) {
        out.push(label.len() as u8);
        out.extend_from_slice(label.as_bytes());
    }
    out.push(0);
    out
}

pub fn header(id: u16, flags: u16, qd: u16, an: u16, ns: u16, ar: u16) -> Vec<u8> {
    let mut out = Vec::with_capacity(12);
    for field in [id, flags, qd, an, ns, ar] {
        out.extend_from_slice(&field.to_be_bytes());
    }
    out
}

pub fn query_packet(id: u16, name: &str, qtype: u16) -> Vec<u8> {
    let mut out = header(id, FLAGS_QUERY_RD, 1, 0, 0, 0);
    out.extend(wire_name(name));
    out.extend_from_slice(&qtype.to_be_bytes());
    out.extend_from_slice(&1u16.to_be_bytes());
    out
}

/// Upstream-style response whose answer names are pointers to the question.
pub fn response_packet(id: u16, name: &str, answers: &[(Ipv4Addr, u32)]) -> Vec<u8> {
    let mut out = header(id, FLAGS_RESPONSE_RD_RA, 1, answers.len() as u16, 0, 0);
    out.extend(wire_name(name));
    out.extend_from_slice(&[0, 1, 0, 1]);
    for (addr, ttl) in answers {
        out.extend_from_slice(&[0xC0, 0x0C, 0, 1, 0, 1]);
        out.extend_from_slice(&ttl.to_be_bytes());
        out.extend_from_slice(&[0, 4]);
        out.extend_from_slice(&addr.octets());
    }
    out
}
