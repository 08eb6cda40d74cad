use std::time::{SystemTime, UNIX_EPOCH};

/// Wall-clock seconds since the Unix epoch; every expiry in the relay is
/// expressed on this scale.
#[inline]
pub fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
