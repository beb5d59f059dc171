//! Store trait: the abstract interface to the ledger.
//!
//! The registry only ever talks to the ledger through this trait. The
//! in-memory implementation is the only one; durability is out of scope.

use async_trait::async_trait;
use bytes::Bytes;
use claimchain_core::{Block, BlockHash, Clock};

use crate::error::Result;

/// The Store trait: async interface to an append-only block sequence.
///
/// # Design Notes
///
/// - **Append-only**: blocks are never removed, reordered or rewritten.
/// - **Atomic append**: height assignment, linkage to the previous hash and
///   insertion happen as one step; concurrent appends are strictly ordered.
/// - **Consistent reads**: a read observes the ledger either before or after
///   any concurrent append, never in between.
#[async_trait]
pub trait Store: Send + Sync {
    // ─────────────────────────────────────────────────────────────────────────
    // Write Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Append the genesis block if the ledger is empty.
    ///
    /// Idempotent: when the ledger already has blocks, returns the existing
    /// block 0 and ignores `genesis_body`.
    async fn initialize(&self, genesis_body: Bytes, clock: &dyn Clock) -> Result<Block>;

    /// Append a block holding `body`.
    ///
    /// Only the registry calls this, and only with a verified claim body.
    /// The block gets `height = len` and the previous block's hash (`None`
    /// if the ledger is empty). `clock` is read after the tip is locked, so
    /// block times never decrease as height increases.
    async fn append(&self, body: Bytes, clock: &dyn Clock) -> Result<Block>;

    // ─────────────────────────────────────────────────────────────────────────
    // Read Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Height of the last block, or `None` before initialization.
    async fn current_height(&self) -> Result<Option<u64>>;

    /// Number of blocks.
    async fn len(&self) -> Result<u64>;

    /// Check if the ledger has no blocks.
    async fn is_empty(&self) -> Result<bool> {
        Ok(self.len().await? == 0)
    }

    /// Get a block by height.
    async fn block_at_height(&self, height: u64) -> Result<Option<Block>>;

    /// Get a block by hash.
    async fn block_by_hash(&self, hash: &BlockHash) -> Result<Option<Block>>;

    /// Get blocks with `start <= height <= end`, ordered by height.
    async fn blocks_range(&self, start: u64, end: u64) -> Result<Vec<Block>>;

    /// Get every block, taken as one consistent view.
    async fn snapshot(&self) -> Result<Vec<Block>>;
}
