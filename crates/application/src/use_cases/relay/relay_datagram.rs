use crate::ports::{DatagramSink, QueryLogSink, ResolutionCachePort, TransactionMuxPort};
use dnsrelay_domain::wire::{self, Message, MAX_ANSWER_ADDRESSES};
use dnsrelay_domain::{Datagram, DomainError, QueryLog, RecordType, ResponseCode};
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use tracing::{debug, trace};

use super::metrics::RelayMetrics;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayOutcome {
    /// Replied to the client from the cache.
    Answered { addresses: usize, authoritative: bool },
    /// Sent the query upstream under a relay-assigned id.
    Forwarded { server_id: u16 },
    /// Passed an upstream reply back to the client that asked.
    Relayed { client: SocketAddr },
}

/// Handles one received datagram: answers queries from the cache, forwards
/// the rest upstream, and relays upstream replies back to their clients.
///
/// Every successful call sends exactly one datagram.
pub struct RelayDatagramUseCase {
    cache: Arc<dyn ResolutionCachePort>,
    mux: Arc<dyn TransactionMuxPort>,
    sink: Arc<dyn DatagramSink>,
    upstream: SocketAddr,
    query_log: Option<Arc<dyn QueryLogSink>>,
    metrics: Arc<RelayMetrics>,
}

impl RelayDatagramUseCase {
    pub fn new(
        cache: Arc<dyn ResolutionCachePort>,
        mux: Arc<dyn TransactionMuxPort>,
        sink: Arc<dyn DatagramSink>,
        upstream: SocketAddr,
    ) -> Self {
        Self {
            cache,
            mux,
            sink,
            upstream,
            query_log: None,
            metrics: Arc::new(RelayMetrics::default()),
        }
    }

    pub fn with_query_log(mut self, query_log: Arc<dyn QueryLogSink>) -> Self {
        self.query_log = Some(query_log);
        self
    }

    pub fn metrics(&self) -> Arc<RelayMetrics> {
        Arc::clone(&self.metrics)
    }

    pub async fn execute(&self, datagram: Datagram) -> Result<RelayOutcome, DomainError> {
        let message = match wire::decode(&datagram.payload) {
            Ok(message) => message,
            Err(e) => {
                RelayMetrics::inc(&self.metrics.parse_errors);
                return Err(e.into());
            }
        };

        if message.is_response() {
            self.relay_response(datagram, &message).await
        } else {
            self.handle_query(datagram, &message).await
        }
    }

    async fn handle_query(
        &self,
        datagram: Datagram,
        message: &Message,
    ) -> Result<RelayOutcome, DomainError> {
        RelayMetrics::inc(&self.metrics.queries);

        if !message.is_standard_query() {
            trace!(opcode = ?message.header.opcode, "Forwarding non-standard query");
            return self.forward(datagram, message.header.id).await;
        }

        let Some(question) = message.first_question() else {
            return self.forward(datagram, message.header.id).await;
        };

        if question.record_type != RecordType::A {
            trace!(domain = %question.name, record_type = %question.record_type, "Forwarding non-A query");
            let domain = question.name.clone();
            let outcome = self.forward(datagram, message.header.id).await?;
            self.log_query(QueryLog::forwarded(domain));
            return Ok(outcome);
        }

        match self.cache.query(&question.name) {
            Some(mut hit) if !hit.addresses.is_empty() => {
                hit.addresses.truncate(MAX_ANSWER_ADDRESSES);
                let reply = wire::encode(message, &hit.addresses, hit.authoritative);
                self.sink.send_to(&reply, datagram.source).await?;

                RelayMetrics::inc(&self.metrics.cache_hits);
                debug!(
                    domain = %question.name,
                    addresses = hit.addresses.len(),
                    authoritative = hit.authoritative,
                    client = %datagram.source,
                    "Answered from cache"
                );
                self.log_query(QueryLog::answered(question.name.as_str(), hit.addresses.clone()));

                Ok(RelayOutcome::Answered {
                    addresses: hit.addresses.len(),
                    authoritative: hit.authoritative,
                })
            }
            _ => {
                let domain = question.name.clone();
                let outcome = self.forward(datagram, message.header.id).await?;
                self.log_query(QueryLog::forwarded(domain));
                Ok(outcome)
            }
        }
    }

    async fn forward(
        &self,
        datagram: Datagram,
        client_id: u16,
    ) -> Result<RelayOutcome, DomainError> {
        let server_id = match self.mux.allocate(client_id, datagram.source) {
            Ok(id) => id,
            Err(e) => {
                RelayMetrics::inc(&self.metrics.dropped);
                return Err(e);
            }
        };

        let mut payload = datagram.payload;
        wire::rewrite_transaction_id(&mut payload, server_id);

        if let Err(e) = self.sink.send_to(&payload, self.upstream).await {
            self.mux.release(server_id);
            return Err(e);
        }

        RelayMetrics::inc(&self.metrics.forwarded);
        debug!(
            client = %datagram.source,
            client_id,
            server_id,
            upstream = %self.upstream,
            "Forwarded query upstream"
        );
        Ok(RelayOutcome::Forwarded { server_id })
    }

    async fn relay_response(
        &self,
        datagram: Datagram,
        message: &Message,
    ) -> Result<RelayOutcome, DomainError> {
        RelayMetrics::inc(&self.metrics.responses);

        let server_id = message.header.id;
        let Some(binding) = self.mux.lookup(server_id) else {
            RelayMetrics::inc(&self.metrics.dropped);
            return Err(DomainError::UnknownTransaction(server_id));
        };

        let mut payload = datagram.payload;
        wire::rewrite_transaction_id(&mut payload, binding.client_id);
        let sent = self.sink.send_to(&payload, binding.client_addr).await;

        if message.header.response_code == ResponseCode::NoError && !message.answers.is_empty() {
            if let Some(question) = message.first_question() {
                let answers: Vec<(Ipv4Addr, u32)> = message
                    .answer_addresses()
                    .take(MAX_ANSWER_ADDRESSES)
                    .collect();
                if !answers.is_empty() {
                    self.cache
                        .update(&question.name, &answers, message.header.authoritative);
                    trace!(domain = %question.name, addresses = answers.len(), "Cached upstream answer");
                }
            }
        }

        self.mux.release(server_id);
        sent?;

        RelayMetrics::inc(&self.metrics.relayed);
        debug!(
            client = %binding.client_addr,
            client_id = binding.client_id,
            server_id,
            rcode = %message.header.response_code,
            "Relayed upstream response"
        );
        Ok(RelayOutcome::Relayed {
            client: binding.client_addr,
        })
    }

    fn log_query(&self, entry: QueryLog) {
        if let Some(log) = &self.query_log {
            log.record(entry);
        }
    }
}
