//! Error type for protocol encoding and decoding.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProtoError {
    /// The stream ended before a complete frame was read.
    #[error("truncated stream reading {stage}: expected {expected} bytes, got {received}")]
    Truncated {
        stage: &'static str,
        expected: usize,
        received: usize,
    },

    /// The underlying reader hit its read timeout.
    #[error("timed out reading {stage}")]
    TimedOut { stage: &'static str },

    #[error("payload too large: {0} bytes")]
    PayloadTooLarge(usize),

    #[error("invalid MAC address {0:?}")]
    InvalidMac(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ProtoError>;
