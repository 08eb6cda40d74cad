use smallvec::SmallVec;
use std::net::Ipv4Addr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct IpEntry {
    pub address: Ipv4Addr,
    /// Absolute expiry in clock seconds; `None` never expires.
    pub expires_at: Option<u64>,
}

impl IpEntry {
    #[inline]
    fn is_live(&self, now: u64) -> bool {
        self.expires_at.map_or(true, |at| now < at)
    }
}

/// One cached domain. Addresses are kept in insertion order and handed out
/// newest first.
#[derive(Debug, Clone)]
pub(super) struct CacheEntry {
    addresses: SmallVec<[IpEntry; 4]>,
    fresh_until: u64,
    pub authoritative: bool,
    pub permanent: bool,
}

impl CacheEntry {
    pub fn dynamic(
        answers: &[(Ipv4Addr, u32)],
        authoritative: bool,
        now: u64,
        freshness_secs: u64,
    ) -> Self {
        let mut entry = Self {
            addresses: SmallVec::new(),
            fresh_until: now,
            authoritative,
            permanent: false,
        };
        entry.replace(answers, authoritative, now, freshness_secs);
        entry
    }

    pub fn permanent(address: Ipv4Addr, now: u64) -> Self {
        let mut entry = Self {
            addresses: SmallVec::new(),
            fresh_until: now,
            authoritative: true,
            permanent: true,
        };
        entry.add_static(address);
        entry
    }

    /// Swaps in a new address set and restarts the freshness window. The
    /// entry becomes dynamic even if it was permanent before.
    pub fn replace(
        &mut self,
        answers: &[(Ipv4Addr, u32)],
        authoritative: bool,
        now: u64,
        freshness_secs: u64,
    ) {
        self.addresses.clear();
        for &(address, ttl) in answers {
            let expires_at = Some(now.saturating_add(u64::from(ttl)));
            // A repeated address keeps its position and takes the later TTL.
            match self.addresses.iter_mut().find(|ip| ip.address == address) {
                Some(existing) => existing.expires_at = expires_at,
                None => self.addresses.push(IpEntry {
                    address,
                    expires_at,
                }),
            }
        }
        self.fresh_until = now.saturating_add(freshness_secs);
        self.authoritative = authoritative;
        self.permanent = false;
    }

    pub fn add_static(&mut self, address: Ipv4Addr) {
        match self.addresses.iter_mut().find(|ip| ip.address == address) {
            Some(existing) => existing.expires_at = None,
            None => self.addresses.push(IpEntry {
                address,
                expires_at: None,
            }),
        }
        self.permanent = true;
        self.authoritative = true;
    }

    /// True once the entry-level window has elapsed. Permanent entries
    /// never go stale.
    #[inline]
    pub fn is_stale(&self, now: u64) -> bool {
        !self.permanent && now >= self.fresh_until
    }

    pub fn live_addresses(&self, now: u64) -> Vec<Ipv4Addr> {
        self.addresses
            .iter()
            .rev()
            .filter(|ip| ip.is_live(now))
            .map(|ip| ip.address)
            .collect()
    }
}
