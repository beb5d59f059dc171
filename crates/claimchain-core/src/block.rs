//! Block: one hash-linked entry of the ledger.
//!
//! A block is sealed exactly once: its hash is computed from the other four
//! fields at construction and never recomputed afterwards. Integrity is
//! checked by recomputing and comparing, never by overwriting.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::body::BlockBody;
use crate::canonical::canonical_block_bytes;
use crate::error::CoreError;
use crate::types::BlockHash;

/// A sealed ledger block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Position in the ledger (0 for genesis).
    pub height: u64,

    /// Append time, seconds since the Unix epoch.
    pub time: i64,

    /// Hash of the preceding block (None for genesis).
    pub previous_block_hash: Option<BlockHash>,

    /// Blake3 over the canonical encoding of the four fields above plus `body`.
    pub hash: BlockHash,

    /// Encoded [`BlockBody`].
    pub body: Bytes,
}

impl Block {
    /// Build a block and compute its hash.
    pub fn seal(
        height: u64,
        time: i64,
        previous_block_hash: Option<BlockHash>,
        body: impl Into<Bytes>,
    ) -> Self {
        let body = body.into();
        let hash = compute_hash(height, time, previous_block_hash.as_ref(), &body);
        Self {
            height,
            time,
            previous_block_hash,
            hash,
            body,
        }
    }

    /// Recompute the hash from the stored fields (excluding the stored hash).
    pub fn compute_hash(&self) -> BlockHash {
        compute_hash(
            self.height,
            self.time,
            self.previous_block_hash.as_ref(),
            &self.body,
        )
    }

    /// Check that the stored hash matches the stored fields.
    pub fn self_check(&self) -> bool {
        self.compute_hash() == self.hash
    }

    /// Check if this is the genesis block.
    pub fn is_genesis(&self) -> bool {
        self.height == 0
    }

    /// Decode the body.
    pub fn decode_body(&self) -> Result<BlockBody, CoreError> {
        BlockBody::decode(&self.body).map_err(|e| e.at_height(self.height))
    }
}

fn compute_hash(
    height: u64,
    time: i64,
    previous_block_hash: Option<&BlockHash>,
    body: &[u8],
) -> BlockHash {
    BlockHash::digest(&canonical_block_bytes(height, time, previous_block_hash, body))
}
