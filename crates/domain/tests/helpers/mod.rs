#![allow(dead_code)]

pub use packets::*;
