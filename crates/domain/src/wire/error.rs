use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Message truncated: needed {needed} byte(s) at offset {offset}")]
    Truncated { offset: usize, needed: usize },

    #[error("Compression pointer at offset {offset} targets {target}, which is not an earlier offset")]
    InvalidPointer { offset: usize, target: usize },

    #[error("Name at offset {offset} follows more than {limit} compression pointers")]
    PointerLimit { offset: usize, limit: usize },

    #[error("Unsupported label type {byte:#04x} at offset {offset}")]
    UnsupportedLabel { offset: usize, byte: u8 },
}
