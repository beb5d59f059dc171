//! In-memory implementation of the Store trait.
//!
//! All blocks live in a `Vec` behind a single `RwLock`. Appends take the
//! write lock for the whole read-tip/seal/insert sequence; reads take the
//! read lock and clone out. Nothing survives the store being dropped.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use bytes::Bytes;
use tracing::info;

use claimchain_core::{Block, BlockHash, Clock};

use crate::error::{Result, StoreError};
use crate::traits::Store;

/// In-memory ledger.
///
/// Thread-safe via RwLock; share it (or the registry owning it) through an `Arc`.
pub struct MemoryStore {
    inner: RwLock<Ledger>,
}

#[derive(Default)]
struct Ledger {
    /// Blocks indexed by height.
    blocks: Vec<Block>,

    /// Hash index: block hash -> height.
    by_hash: HashMap<BlockHash, u64>,
}

impl Ledger {
    /// Seal a block on top of the current tip and store it.
    fn push(&mut self, body: Bytes, now: i64) -> Block {
        let height = self.blocks.len() as u64;
        let previous = self.blocks.last().map(|b| b.hash);
        let block = Block::seal(height, now, previous, body);

        self.by_hash.insert(block.hash, height);
        self.blocks.push(block.clone());
        block
    }
}

impl MemoryStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Ledger::default()),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Ledger>> {
        self.inner.read().map_err(|_| StoreError::LockPoisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Ledger>> {
        self.inner.write().map_err(|_| StoreError::LockPoisoned)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn initialize(&self, genesis_body: Bytes, clock: &dyn Clock) -> Result<Block> {
        let mut inner = self.write()?;

        if let Some(genesis) = inner.blocks.first() {
            return Ok(genesis.clone());
        }

        let genesis = inner.push(genesis_body, clock.now_secs());
        info!(hash = %genesis.hash, "created genesis block");
        Ok(genesis)
    }

    async fn append(&self, body: Bytes, clock: &dyn Clock) -> Result<Block> {
        let mut inner = self.write()?;
        let block = inner.push(body, clock.now_secs());
        info!(height = block.height, hash = %block.hash, "appended block");
        Ok(block)
    }

    async fn current_height(&self) -> Result<Option<u64>> {
        let inner = self.read()?;
        Ok(inner.blocks.last().map(|b| b.height))
    }

    async fn len(&self) -> Result<u64> {
        let inner = self.read()?;
        Ok(inner.blocks.len() as u64)
    }

    async fn block_at_height(&self, height: u64) -> Result<Option<Block>> {
        let inner = self.read()?;
        let Ok(index) = usize::try_from(height) else {
            return Ok(None);
        };
        Ok(inner.blocks.get(index).cloned())
    }

    async fn block_by_hash(&self, hash: &BlockHash) -> Result<Option<Block>> {
        let inner = self.read()?;

        let Some(&height) = inner.by_hash.get(hash) else {
            return Ok(None);
        };

        inner
            .blocks
            .get(height as usize)
            .cloned()
            .map(Some)
            .ok_or_else(|| {
                StoreError::InvalidData(format!("hash {hash} indexed at missing height {height}"))
            })
    }

    async fn blocks_range(&self, start: u64, end: u64) -> Result<Vec<Block>> {
        let inner = self.read()?;

        Ok(inner
            .blocks
            .iter()
            .skip_while(|b| b.height < start)
            .take_while(|b| b.height <= end)
            .cloned()
            .collect())
    }

    async fn snapshot(&self) -> Result<Vec<Block>> {
        let inner = self.read()?;
        Ok(inner.blocks.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use claimchain_core::{validate_chain, ChainViolation, ManualClock};
    use proptest::prelude::*;

    const NOW: i64 = 1_736_870_400;

    fn genesis_body() -> Bytes {
        Bytes::from_static(b"genesis")
    }

    async fn initialized_store(claims: usize) -> MemoryStore {
        let store = MemoryStore::new();
        let clock = ManualClock::new(NOW);
        store.initialize(genesis_body(), &clock).await.unwrap();
        for i in 0..claims {
            clock.advance(1);
            store
                .append(Bytes::from(format!("claim {i}")), &clock)
                .await
                .unwrap();
        }
        store
    }

    #[tokio::test]
    async fn test_empty_store() {
        let store = MemoryStore::new();
        assert_eq!(store.current_height().await.unwrap(), None);
        assert_eq!(store.len().await.unwrap(), 0);
        assert!(store.is_empty().await.unwrap());
    }

    #[tokio::test]
    async fn test_initialize_creates_genesis() {
        let store = MemoryStore::new();
        let genesis = store
            .initialize(genesis_body(), &ManualClock::new(NOW))
            .await
            .unwrap();

        assert_eq!(genesis.height, 0);
        assert_eq!(genesis.time, NOW);
        assert_eq!(genesis.previous_block_hash, None);
        assert_eq!(store.current_height().await.unwrap(), Some(0));
        assert_eq!(store.len().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_initialize_idempotent() {
        let store = MemoryStore::new();
        let first = store
            .initialize(genesis_body(), &ManualClock::new(NOW))
            .await
            .unwrap();
        let second = store
            .initialize(Bytes::from_static(b"other"), &ManualClock::new(NOW + 60))
            .await
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(store.len().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_append_links_to_previous() {
        let store = initialized_store(3).await;
        let blocks = store.snapshot().await.unwrap();

        assert_eq!(blocks.len(), 4);
        for i in 1..blocks.len() {
            assert_eq!(blocks[i].height, i as u64);
            assert_eq!(blocks[i].previous_block_hash, Some(blocks[i - 1].hash));
        }
        assert!(validate_chain(&blocks).is_empty());
    }

    #[tokio::test]
    async fn test_append_on_empty_store_has_no_previous() {
        let store = MemoryStore::new();
        let block = store
            .append(Bytes::from_static(b"x"), &ManualClock::new(NOW))
            .await
            .unwrap();
        assert_eq!(block.height, 0);
        assert_eq!(block.previous_block_hash, None);
    }

    #[tokio::test]
    async fn test_lookup_by_height_and_hash() {
        let store = initialized_store(2).await;
        let block = store.block_at_height(2).await.unwrap().unwrap();

        let by_hash = store.block_by_hash(&block.hash).await.unwrap().unwrap();
        assert_eq!(block, by_hash);

        assert!(store.block_at_height(3).await.unwrap().is_none());
        assert!(store.block_at_height(u64::MAX).await.unwrap().is_none());
        assert!(store.block_by_hash(&BlockHash::ZERO).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_blocks_range() {
        let store = initialized_store(5).await;

        let range = store.blocks_range(2, 4).await.unwrap();
        let heights: Vec<u64> = range.iter().map(|b| b.height).collect();
        assert_eq!(heights, vec![2, 3, 4]);

        assert!(store.blocks_range(10, 20).await.unwrap().is_empty());
        assert_eq!(store.blocks_range(4, 100).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_tampered_body_detected() {
        let store = initialized_store(3).await;

        store.inner.write().unwrap().blocks[2].body = Bytes::from_static(b"tampered");

        let blocks = store.snapshot().await.unwrap();
        assert_eq!(
            validate_chain(&blocks),
            vec![ChainViolation::Integrity { height: 2 }]
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_appends_are_serialized() {
        let store = Arc::new(MemoryStore::new());
        let clock = Arc::new(ManualClock::new(NOW));
        store.initialize(genesis_body(), clock.as_ref()).await.unwrap();

        let mut handles = Vec::new();
        for i in 0..64 {
            let store = Arc::clone(&store);
            let clock = Arc::clone(&clock);
            handles.push(tokio::spawn(async move {
                clock.advance(1);
                store
                    .append(Bytes::from(format!("claim {i}")), clock.as_ref())
                    .await
                    .unwrap()
            }));
        }

        let mut heights = Vec::new();
        for handle in handles {
            heights.push(handle.await.unwrap().height);
        }
        heights.sort_unstable();
        assert_eq!(heights, (1..=64).collect::<Vec<u64>>());

        let blocks = store.snapshot().await.unwrap();
        assert_eq!(blocks.len(), 65);
        assert!(validate_chain(&blocks).is_empty());
        assert!(blocks.windows(2).all(|w| w[0].time <= w[1].time));
    }

    proptest! {
        #[test]
        fn test_linkage_holds_for_any_length(bodies in prop::collection::vec(any::<Vec<u8>>(), 0..40)) {
            let rt = tokio::runtime::Runtime::new().unwrap();
            let blocks = rt.block_on(async {
                let store = MemoryStore::new();
                let clock = ManualClock::new(NOW);
                store.initialize(genesis_body(), &clock).await.unwrap();
                for body in bodies {
                    store.append(Bytes::from(body), &clock).await.unwrap();
                }
                store.snapshot().await.unwrap()
            });

            prop_assert_eq!(blocks[0].previous_block_hash, None);
            for i in 1..blocks.len() {
                prop_assert_eq!(blocks[i].previous_block_hash, Some(blocks[i - 1].hash));
            }
            prop_assert!(validate_chain(&blocks).is_empty());
        }
    }
}
