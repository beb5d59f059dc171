//! Chain validation: integrity and linkage checks over a whole ledger.
//!
//! Validation never stops at the first problem. Every block is checked and
//! every violation is reported, so one pass reveals all corruption.

use std::fmt;

use crate::block::Block;

/// A single problem found while walking the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChainViolation {
    /// The stored hash does not match the block's fields.
    Integrity { height: u64 },

    /// `block[height].hash` differs from `block[height + 1].previous_block_hash`.
    Link { height: u64 },

    /// The block at `index` claims a different height.
    Height { index: u64, found: u64 },

    /// The genesis block names a predecessor.
    GenesisLink,
}

impl fmt::Display for ChainViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainViolation::Integrity { height } => {
                write!(f, "block {height}: stored hash does not match contents")
            }
            ChainViolation::Link { height } => {
                write!(f, "block {height}: successor does not link to its hash")
            }
            ChainViolation::Height { index, found } => {
                write!(f, "block at index {index} has height {found}")
            }
            ChainViolation::GenesisLink => write!(f, "genesis block has a previous hash"),
        }
    }
}

/// Validate an entire chain, returning every violation found.
///
/// For each index `i`:
/// - the block's hash is recomputed and compared (`Integrity`)
/// - unless `i` is last, `blocks[i].hash` must equal
///   `blocks[i + 1].previous_block_hash` (`Link`)
///
/// An empty result means the chain is valid.
pub fn validate_chain(blocks: &[Block]) -> Vec<ChainViolation> {
    let mut violations = Vec::new();

    if let Some(genesis) = blocks.first() {
        if genesis.previous_block_hash.is_some() {
            violations.push(ChainViolation::GenesisLink);
        }
    }

    for (index, block) in blocks.iter().enumerate() {
        let index = index as u64;

        if block.height != index {
            violations.push(ChainViolation::Height {
                index,
                found: block.height,
            });
        }

        if !block.self_check() {
            violations.push(ChainViolation::Integrity { height: index });
        }

        if let Some(next) = blocks.get(index as usize + 1) {
            if next.previous_block_hash != Some(block.hash) {
                violations.push(ChainViolation::Link { height: index });
            }
        }
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BlockHash;
    use bytes::Bytes;

    fn build_chain(n: u64) -> Vec<Block> {
        let mut blocks: Vec<Block> = Vec::new();
        for height in 0..n {
            let prev = blocks.last().map(|b| b.hash);
            let body = format!("body {height}").into_bytes();
            blocks.push(Block::seal(height, 1_000 + height as i64, prev, body));
        }
        blocks
    }

    #[test]
    fn test_empty_chain_is_valid() {
        assert!(validate_chain(&[]).is_empty());
    }

    #[test]
    fn test_untampered_chain_is_valid() {
        for n in [1, 2, 5, 20] {
            assert!(validate_chain(&build_chain(n)).is_empty(), "chain of {n}");
        }
    }

    #[test]
    fn test_tampered_body_reports_integrity() {
        let mut chain = build_chain(5);
        chain[2].body = Bytes::from_static(b"tampered");

        assert_eq!(
            validate_chain(&chain),
            vec![ChainViolation::Integrity { height: 2 }]
        );
    }

    #[test]
    fn test_tampered_last_block_is_reported() {
        let mut chain = build_chain(4);
        chain[3].body = Bytes::from_static(b"tampered");

        assert_eq!(
            validate_chain(&chain),
            vec![ChainViolation::Integrity { height: 3 }]
        );
    }

    #[test]
    fn test_rehashed_block_reports_link_at_predecessor() {
        let mut chain = build_chain(4);
        // Re-seal block 2 with a new body: its own hash is consistent again,
        // but block 3 still points at the old hash.
        chain[2] = Block::seal(2, chain[2].time, chain[2].previous_block_hash, b"forged".to_vec());

        assert_eq!(validate_chain(&chain), vec![ChainViolation::Link { height: 2 }]);
    }

    #[test]
    fn test_broken_previous_hash_reports_integrity_and_link() {
        let mut chain = build_chain(3);
        chain[1].previous_block_hash = Some(BlockHash::ZERO);

        let violations = validate_chain(&chain);
        assert!(violations.contains(&ChainViolation::Integrity { height: 1 }));
        assert!(violations.contains(&ChainViolation::Link { height: 0 }));
        assert_eq!(violations.len(), 2);
    }

    #[test]
    fn test_collects_all_violations() {
        let mut chain = build_chain(6);
        chain[1].body = Bytes::from_static(b"x");
        chain[4].body = Bytes::from_static(b"y");

        assert_eq!(
            validate_chain(&chain),
            vec![
                ChainViolation::Integrity { height: 1 },
                ChainViolation::Integrity { height: 4 },
            ]
        );
    }

    #[test]
    fn test_height_gap_detected() {
        let mut chain = build_chain(3);
        chain[2] = Block::seal(7, 1_002, Some(chain[1].hash), b"body 2".to_vec());

        assert_eq!(
            validate_chain(&chain),
            vec![ChainViolation::Height { index: 2, found: 7 }]
        );
    }

    #[test]
    fn test_genesis_with_previous_hash_detected() {
        let chain = vec![Block::seal(0, 1, Some(BlockHash::ZERO), b"g".to_vec())];
        assert_eq!(validate_chain(&chain), vec![ChainViolation::GenesisLink]);
    }

    #[test]
    fn test_violation_display() {
        let v = ChainViolation::Integrity { height: 4 };
        assert_eq!(v.to_string(), "block 4: stored hash does not match contents");
    }
}
