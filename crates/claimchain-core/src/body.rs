//! Block bodies: the tagged payload stored (encoded) in every block.
//!
//! Height 0 carries a [`GenesisPayload`]; every other height carries a
//! [`ClaimRecord`]. Bodies are CBOR-encoded with `ciborium`. Decoding is
//! strict: unknown fields, trailing bytes and empty identity fields are all
//! rejected rather than producing a partially-populated record.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::crypto::{Address, ClaimSignature};
use crate::error::CoreError;

/// The note stored in the genesis block unless configured otherwise.
pub const DEFAULT_GENESIS_NOTE: &str = "First block in the chain - Genesis block";

/// Sentinel payload of the genesis block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenesisPayload {
    pub note: String,
}

impl GenesisPayload {
    pub fn new(note: impl Into<String>) -> Self {
        Self { note: note.into() }
    }
}

impl Default for GenesisPayload {
    fn default() -> Self {
        Self::new(DEFAULT_GENESIS_NOTE)
    }
}

/// An admitted ownership claim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClaimRecord {
    /// The address that proved control by signing `message`.
    pub address: Address,

    /// The challenge message that was signed.
    pub message: String,

    /// Signature over `message` by `address`.
    pub signature: ClaimSignature,

    /// Opaque client payload (e.g. star coordinates and a story).
    pub claim: serde_json::Value,
}

impl ClaimRecord {
    /// Reject records whose identity fields are empty.
    pub fn check(&self) -> Result<(), CoreError> {
        if self.address.as_str().is_empty() {
            return Err(CoreError::InvalidRecord("empty address".into()));
        }
        if self.message.is_empty() {
            return Err(CoreError::InvalidRecord("empty message".into()));
        }
        Ok(())
    }
}

/// The decoded form of a block body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BlockBody {
    Genesis(GenesisPayload),
    Claim(ClaimRecord),
}

impl BlockBody {
    /// Serialize to CBOR bytes.
    ///
    /// Claim records are checked first, so everything that encodes also
    /// decodes.
    pub fn encode(&self) -> Result<Bytes, CoreError> {
        if let BlockBody::Claim(record) = self {
            record.check()?;
        }
        let mut buf = Vec::new();
        ciborium::into_writer(self, &mut buf).map_err(|e| CoreError::Encoding(e.to_string()))?;
        Ok(buf.into())
    }

    /// Deserialize from CBOR bytes.
    pub fn decode(bytes: &[u8]) -> Result<Self, CoreError> {
        let mut cursor = std::io::Cursor::new(bytes);
        let body: BlockBody =
            ciborium::from_reader(&mut cursor).map_err(|e| CoreError::Decoding(e.to_string()))?;

        let consumed = cursor.position() as usize;
        if consumed != bytes.len() {
            return Err(CoreError::Decoding(format!(
                "{} trailing bytes after body",
                bytes.len() - consumed
            )));
        }

        if let BlockBody::Claim(record) = &body {
            record.check()?;
        }
        Ok(body)
    }

    /// Decode a body that must hold a claim record.
    pub fn decode_claim(bytes: &[u8]) -> Result<ClaimRecord, CoreError> {
        match Self::decode(bytes)? {
            BlockBody::Claim(record) => Ok(record),
            BlockBody::Genesis(_) => Err(CoreError::Decoding(
                "expected a claim record, found a genesis payload".into(),
            )),
        }
    }

    /// Get the claim record, if this is a claim body.
    pub fn as_claim(&self) -> Option<&ClaimRecord> {
        match self {
            BlockBody::Claim(record) => Some(record),
            BlockBody::Genesis(_) => None,
        }
    }
}

impl From<ClaimRecord> for BlockBody {
    fn from(record: ClaimRecord) -> Self {
        BlockBody::Claim(record)
    }
}

impl From<GenesisPayload> for BlockBody {
    fn from(payload: GenesisPayload) -> Self {
        BlockBody::Genesis(payload)
    }
}
