use crate::clock::now_secs;
use dnsrelay_application::ports::{ClientBinding, TransactionMuxPort};
use dnsrelay_domain::DomainError;
use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, trace, warn};

/// Usable ids are `1..=MAX_TRANSACTIONS`; 0 is never handed out.
pub const MAX_TRANSACTIONS: usize = u16::MAX as usize;
pub const DEFAULT_TRANSACTION_TTL_SECS: u64 = 30;

const FREE_LIST_CAPACITY: usize = MAX_TRANSACTIONS - 1;

#[derive(Debug, Clone, Copy)]
struct Slot {
    binding: ClientBinding,
    expires_at: u64,
}

impl Slot {
    #[inline]
    fn is_live(&self, now: u64) -> bool {
        now <= self.expires_at
    }
}

struct TableState {
    /// Indexed by server id; index 0 stays empty.
    slots: Vec<Option<Slot>>,
    free: VecDeque<u16>,
    cursor: u16,
}

impl TableState {
    fn is_live(&self, id: u16, now: u64) -> bool {
        self.slots[id as usize].is_some_and(|slot| slot.is_live(now))
    }

    fn next_from_free_list(&mut self, now: u64) -> Option<u16> {
        while let Some(id) = self.free.pop_front() {
            // The age scan may have claimed this id since it was released.
            if !self.is_live(id, now) {
                return Some(id);
            }
        }
        None
    }

    fn next_from_scan(&mut self, now: u64) -> Option<u16> {
        for _ in 0..MAX_TRANSACTIONS {
            let id = self.cursor;
            self.cursor = (self.cursor % MAX_TRANSACTIONS as u16) + 1;
            if !self.is_live(id, now) {
                return Some(id);
            }
        }
        None
    }
}

/// Fixed-size table mapping relay-assigned transaction ids to the client
/// that sent the original query.
///
/// Released ids are recycled through a FIFO free list; when it is empty a
/// rotating cursor scans one full pass for a slot that is empty or expired.
pub struct TransactionTable {
    state: Mutex<TableState>,
    ttl_secs: u64,
}

impl TransactionTable {
    pub fn new(ttl_secs: u64) -> Self {
        Self {
            state: Mutex::new(TableState {
                slots: vec![None; MAX_TRANSACTIONS + 1],
                free: VecDeque::new(),
                cursor: 1,
            }),
            ttl_secs,
        }
    }

    fn lock(&self) -> MutexGuard<'_, TableState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn allocate_at(
        &self,
        client_id: u16,
        client_addr: SocketAddr,
        now: u64,
    ) -> Result<u16, DomainError> {
        let mut state = self.lock();

        let id = match state.next_from_free_list(now) {
            Some(id) => id,
            None => match state.next_from_scan(now) {
                Some(id) => id,
                None => {
                    warn!(client = %client_addr, "Transaction id pool exhausted");
                    return Err(DomainError::PoolExhausted);
                }
            },
        };

        state.slots[id as usize] = Some(Slot {
            binding: ClientBinding {
                client_id,
                client_addr,
            },
            expires_at: now.saturating_add(self.ttl_secs),
        });
        trace!(client_id, server_id = id, client = %client_addr, "Allocated transaction id");
        Ok(id)
    }

    pub fn lookup_at(&self, server_id: u16, now: u64) -> Option<ClientBinding> {
        if server_id == 0 {
            return None;
        }
        let state = self.lock();
        state.slots[server_id as usize]
            .filter(|slot| slot.is_live(now))
            .map(|slot| slot.binding)
    }

    pub fn sweep_at(&self, now: u64) -> usize {
        let mut state = self.lock();
        let mut cleared = 0;
        for slot in state.slots.iter_mut() {
            if slot.is_some_and(|s| !s.is_live(now)) {
                *slot = None;
                cleared += 1;
            }
        }
        if cleared > 0 {
            debug!(cleared, "Swept expired transaction ids");
        }
        cleared
    }

    pub fn live_count_at(&self, now: u64) -> usize {
        self.lock()
            .slots
            .iter()
            .filter(|slot| slot.is_some_and(|s| s.is_live(now)))
            .count()
    }
}

impl Default for TransactionTable {
    fn default() -> Self {
        Self::new(DEFAULT_TRANSACTION_TTL_SECS)
    }
}

impl TransactionMuxPort for TransactionTable {
    fn allocate(&self, client_id: u16, client_addr: SocketAddr) -> Result<u16, DomainError> {
        self.allocate_at(client_id, client_addr, now_secs())
    }

    fn lookup(&self, server_id: u16) -> Option<ClientBinding> {
        self.lookup_at(server_id, now_secs())
    }

    fn release(&self, server_id: u16) {
        if server_id == 0 {
            return;
        }
        let mut state = self.lock();
        if state.slots[server_id as usize].take().is_none() {
            return;
        }
        if state.free.len() < FREE_LIST_CAPACITY {
            state.free.push_back(server_id);
        }
        trace!(server_id, "Released transaction id");
    }

    fn sweep(&self) -> usize {
        self.sweep_at(now_secs())
    }

    fn live_count(&self) -> usize {
        self.live_count_at(now_secs())
    }
}
