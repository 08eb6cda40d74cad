use compact_str::CompactString;
use std::hash::{Hash, Hasher};

/// Normalized cache key: ASCII-lowercased, trailing dot removed.
///
/// Equality is exact on the normalized name, but the hash skips a leading
/// `www.` so `www.example.com` and `example.com` land in the same bucket.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DomainKey(CompactString);

impl DomainKey {
    #[inline]
    pub fn new(domain: &str) -> Self {
        let trimmed = domain.trim_end_matches('.');
        let mut key = CompactString::with_capacity(trimmed.len());
        for c in trimmed.chars() {
            key.push(c.to_ascii_lowercase());
        }
        Self(key)
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    #[inline]
    fn hash_part(&self) -> &str {
        let name = self.0.as_str();
        name.strip_prefix("www.").unwrap_or(name)
    }
}

impl Hash for DomainKey {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hash_part().hash(state);
    }
}
