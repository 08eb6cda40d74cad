use super::error::ParseError;

/// Longest label a length byte can describe.
pub const MAX_LABEL_LEN: usize = 63;
/// Decoded names longer than this are cut at the last label that fits.
pub const MAX_NAME_LEN: usize = 255;
/// Redirections followed before a name is rejected as a pointer loop.
pub const MAX_POINTER_HOPS: usize = 32;

const POINTER_TAG: u8 = 0xC0;

/// Decodes the (possibly compressed) name starting at `start`.
///
/// Returns the dotted name and the offset just past the name as it appears
/// at `start`: past the terminating zero label, or past the *first*
/// compression pointer when one was followed.
pub(super) fn decode_name(buf: &[u8], start: usize) -> Result<(String, usize), ParseError> {
    let mut name = String::new();
    let mut cursor = start;
    let mut resume_at: Option<usize> = None;
    let mut hops = 0usize;
    let mut full = false;

    loop {
        let len_byte = *buf.get(cursor).ok_or(ParseError::Truncated {
            offset: cursor,
            needed: 1,
        })?;

        match len_byte & POINTER_TAG {
            0x00 => {
                let len = len_byte as usize;
                if len == 0 {
                    cursor += 1;
                    break;
                }
                let label_start = cursor + 1;
                let label = buf
                    .get(label_start..label_start + len)
                    .ok_or(ParseError::Truncated {
                        offset: label_start,
                        needed: len,
                    })?;
                if !full {
                    full = !append_label(&mut name, label);
                }
                cursor = label_start + len;
            }
            POINTER_TAG => {
                let low = *buf.get(cursor + 1).ok_or(ParseError::Truncated {
                    offset: cursor + 1,
                    needed: 1,
                })?;
                let target = (((len_byte & !POINTER_TAG) as usize) << 8) | low as usize;

                // Only earlier offsets are legal; the hop cap catches the
                // remaining backward cycles.
                if target >= cursor {
                    return Err(ParseError::InvalidPointer {
                        offset: cursor,
                        target,
                    });
                }
                hops += 1;
                if hops > MAX_POINTER_HOPS {
                    return Err(ParseError::PointerLimit {
                        offset: start,
                        limit: MAX_POINTER_HOPS,
                    });
                }
                if resume_at.is_none() {
                    resume_at = Some(cursor + 2);
                }
                cursor = target;
            }
            _ => {
                return Err(ParseError::UnsupportedLabel {
                    offset: cursor,
                    byte: len_byte,
                })
            }
        }
    }

    Ok((name, resume_at.unwrap_or(cursor)))
}

/// Appends one label, returning `false` once the name cap is reached.
fn append_label(name: &mut String, label: &[u8]) -> bool {
    let text = String::from_utf8_lossy(label);
    let separator = usize::from(!name.is_empty());
    if name.len() + separator + text.len() > MAX_NAME_LEN {
        return false;
    }
    if separator == 1 {
        name.push('.');
    }
    name.push_str(&text);
    true
}

/// Writes `name` as uncompressed labels. Empty labels (leading, trailing or
/// doubled dots) are skipped and over-long labels are cut to 63 bytes.
pub(super) fn encode_name(name: &str, out: &mut Vec<u8>) {
    for label in name.split('.').filter(|label| !label.is_empty()) {
        let bytes = label.as_bytes();
        let len = bytes.len().min(MAX_LABEL_LEN);
        out.push(len as u8);
        out.extend_from_slice(&bytes[..len]);
    }
    out.push(0);
}
