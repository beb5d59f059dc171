//! Error types for Claimchain Core.

use thiserror::Error;

/// Core errors that can occur while encoding, decoding or parsing ledger data.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("malformed challenge: {0}")]
    MalformedChallenge(String),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid signature encoding: {0}")]
    InvalidSignatureEncoding(String),

    #[error("encoding error: {0}")]
    Encoding(String),

    #[error("decoding error: {0}")]
    Decoding(String),

    /// A claim record is missing an identity field.
    #[error("invalid claim record: {0}")]
    InvalidRecord(String),

    /// A stored block body could not be decoded. This is data corruption.
    #[error("block {height} body failed to decode: {reason}")]
    DecodeFailure { height: u64, reason: String },
}

impl CoreError {
    /// Attach a block height to a decoding error.
    pub fn at_height(self, height: u64) -> Self {
        match self {
            CoreError::DecodeFailure { reason, .. }
            | CoreError::Decoding(reason)
            | CoreError::InvalidRecord(reason) => {
                CoreError::DecodeFailure { height, reason }
            }
            other => other,
        }
    }
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
