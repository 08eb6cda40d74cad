//! RFC 1035 wire format.
//!
//! [`decode`] turns a datagram into an owned [`Message`] tree; [`encode`]
//! synthesizes the A-record replies the relay answers from its cache. Outbound
//! names are never compressed, inbound compression pointers are followed with
//! bounds and loop checks.

mod error;
mod header;
mod message;
mod name;
mod reader;
mod writer;

pub use error::ParseError;
pub use header::{Header, Opcode, ResponseCode};
pub use message::{Message, Question};
pub use name::{MAX_LABEL_LEN, MAX_NAME_LEN, MAX_POINTER_HOPS};
pub use reader::{decode, peek_header};
pub use writer::{encode, rewrite_transaction_id, MAX_ANSWER_ADDRESSES, RESPONSE_TTL};
