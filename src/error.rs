use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, HuffmanError>;

#[derive(Error, Debug)]
pub enum HuffmanError {
    #[error("cannot compress an empty buffer")]
    EmptyInput,
    #[error("malformed header: {0}")]
    MalformedHeader(String),
    #[error("malformed tree at byte {position} of {tree_size}: {reason}")]
    MalformedTree {
        position: usize,
        tree_size: usize,
        reason: &'static str,
    },
    #[error("malformed stream at bit {bit}: {reason}")]
    MalformedStream { bit: usize, reason: &'static str },
    /// Only from calling `bits::pack` with a table built for other data;
    /// `compress` builds its table from the input and never hits it.
    #[error("byte {0:#04x} has no code in the table")]
    MissingCode(u8),
    #[error("serialized tree is {0} bytes, the header holds at most 8191")]
    UnsupportedTreeSize(usize),
    #[error("bit I/O failed: {0}")]
    Io(#[from] io::Error),
}
