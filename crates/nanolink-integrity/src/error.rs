//! Integrity error types

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum IntegrityError {
    #[error("message length {length} exceeds maximum of {max} bytes")]
    LengthExceeded { length: usize, max: usize },

    #[error("key must be exactly {expected} bytes, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    #[error("invalid signature mask: {0}")]
    InvalidMask(String),

    #[error("authentication tag mismatch")]
    TagMismatch,

    #[error("invalid hex input: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}

pub type Result<T> = std::result::Result<T, IntegrityError>;
