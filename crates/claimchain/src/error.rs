//! Error types for the Registry.

use claimchain_core::CoreError;
use claimchain_store::StoreError;
use thiserror::Error;

/// Errors that can occur during Registry operations.
///
/// None of these are fatal: a rejected submission leaves the ledger
/// untouched and may be retried with a fresh challenge.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The message is not `address:timestamp:tag`.
    #[error("malformed challenge: {0}")]
    MalformedChallenge(String),

    /// The challenge is older than the validation window.
    #[error("challenge expired: issued at {issued_at}, {elapsed}s ago (window {window}s)")]
    ExpiredChallenge {
        issued_at: i64,
        elapsed: i64,
        window: i64,
    },

    /// The signature does not match the message and address.
    #[error("invalid signature")]
    InvalidSignature,

    /// The submission cannot be stored as a well-formed claim record.
    #[error("invalid claim: {0}")]
    InvalidClaim(String),

    /// A stored block body is corrupt.
    #[error("block {height} body failed to decode: {reason}")]
    DecodeFailure { height: u64, reason: String },

    /// Rejected configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Other core error (e.g. body encoding).
    #[error("core error: {0}")]
    Core(#[source] CoreError),

    /// Storage error.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

impl From<CoreError> for RegistryError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::MalformedChallenge(msg) => RegistryError::MalformedChallenge(msg),
            CoreError::InvalidAddress(_) | CoreError::InvalidSignatureEncoding(_) => {
                RegistryError::InvalidSignature
            }
            CoreError::InvalidRecord(reason) => RegistryError::InvalidClaim(reason),
            CoreError::DecodeFailure { height, reason } => {
                RegistryError::DecodeFailure { height, reason }
            }
            other => RegistryError::Core(other),
        }
    }
}

/// Result type for Registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;
