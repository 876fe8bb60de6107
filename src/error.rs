// src/error.rs
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RofError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Unknown model code: 0x{0:02X}")]
    UnknownModel(u8),

    #[error("Truncated header: field '{field}' at offset {offset} needs {needed} bytes, {available} available")]
    TruncatedHeader {
        field: &'static str,
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("Truncated data: sample block needs {expected} bytes, {available} available")]
    TruncatedData { expected: u64, available: u64 },

    #[error("Negative point count in header: {0}")]
    NegativePointCount(i32),
}

pub type Result<T> = std::result::Result<T, RofError>;
