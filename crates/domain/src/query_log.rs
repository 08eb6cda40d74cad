use chrono::{DateTime, TimeZone};
use std::fmt::Display;
use std::net::Ipv4Addr;
use std::sync::Arc;

pub const NOT_FOUND_MARKER: &str = "not found in local, forwarded upstream";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    /// Answered from the cache or static table. `0.0.0.0` marks a blocked name.
    Answered(Vec<Ipv4Addr>),
    Forwarded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryLog {
    pub domain: Arc<str>,
    pub outcome: QueryOutcome,
}

impl QueryLog {
    pub fn answered(domain: impl Into<Arc<str>>, addresses: Vec<Ipv4Addr>) -> Self {
        Self {
            domain: domain.into(),
            outcome: QueryOutcome::Answered(addresses),
        }
    }

    pub fn forwarded(domain: impl Into<Arc<str>>) -> Self {
        Self {
            domain: domain.into(),
            outcome: QueryOutcome::Forwarded,
        }
    }

    /// `<timestamp>  <domain>  <addresses or marker>`
    pub fn to_line<Tz>(&self, at: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let result = match &self.outcome {
            QueryOutcome::Answered(addresses) => addresses
                .iter()
                .map(Ipv4Addr::to_string)
                .collect::<Vec<_>>()
                .join(","),
            QueryOutcome::Forwarded => NOT_FOUND_MARKER.to_string(),
        };
        format!(
            "{}  {}  {}",
            at.format("%Y-%m-%d %H:%M:%S"),
            self.domain,
            result
        )
    }
}
