#![allow(dead_code)]

pub mod harness;
pub mod packets;

pub use harness::*;
pub use packets::*;
