//! Owner-indexed queries over a chain snapshot.

use serde::{Deserialize, Serialize};

use crate::block::Block;
use crate::body::{BlockBody, ClaimRecord};
use crate::crypto::Address;
use crate::error::CoreError;
use crate::types::BlockHash;

/// A decoded claim together with the block that holds it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnedClaim {
    pub height: u64,
    pub hash: BlockHash,
    pub time: i64,
    pub record: ClaimRecord,
}

impl OwnedClaim {
    /// Decode the claim stored in a non-genesis block.
    pub fn from_block(block: &Block) -> Result<Self, CoreError> {
        let record =
            BlockBody::decode_claim(&block.body).map_err(|e| e.at_height(block.height))?;
        Ok(Self {
            height: block.height,
            hash: block.hash,
            time: block.time,
            record,
        })
    }
}

/// List every claim owned by `address`, in ascending height order.
///
/// The genesis block is skipped. Any other body that does not decode to a
/// claim record aborts the query with [`CoreError::DecodeFailure`].
pub fn claims_by_owner(blocks: &[Block], address: &Address) -> Result<Vec<OwnedClaim>, CoreError> {
    let mut claims = Vec::new();
    for block in blocks.iter().skip(1) {
        let claim = OwnedClaim::from_block(block)?;
        if &claim.record.address == address {
            claims.push(claim);
        }
    }
    Ok(claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::GenesisPayload;
    use crate::crypto::Keypair;
    use bytes::Bytes;
    use serde_json::json;

    fn claim_body(keypair: &Keypair, n: u32) -> Bytes {
        let message = format!("{}:{}:starRegistry", keypair.address(), 1_000 + n);
        BlockBody::from(ClaimRecord {
            address: keypair.address(),
            signature: keypair.sign(message.as_bytes()),
            message,
            claim: json!({ "story": format!("star {n}") }),
        })
        .encode()
        .unwrap()
    }

    fn build_chain(bodies: Vec<Bytes>) -> Vec<Block> {
        let genesis_body = BlockBody::from(GenesisPayload::default()).encode().unwrap();
        let mut blocks = vec![Block::seal(0, 1_000, None, genesis_body)];
        for body in bodies {
            let prev = blocks.last().map(|b| b.hash);
            let height = blocks.len() as u64;
            blocks.push(Block::seal(height, 1_000 + height as i64, prev, body));
        }
        blocks
    }

    #[test]
    fn test_filters_by_owner_in_height_order() {
        let alice = Keypair::from_seed(&[0x01; 32]);
        let bob = Keypair::from_seed(&[0x02; 32]);
        let chain = build_chain(vec![
            claim_body(&alice, 1),
            claim_body(&bob, 2),
            claim_body(&alice, 3),
        ]);

        let claims = claims_by_owner(&chain, &alice.address()).unwrap();
        let heights: Vec<u64> = claims.iter().map(|c| c.height).collect();
        assert_eq!(heights, vec![1, 3]);
        assert_eq!(claims[1].record.claim, json!({ "story": "star 3" }));
        assert_eq!(claims[0].hash, chain[1].hash);

        let claims = claims_by_owner(&chain, &bob.address()).unwrap();
        assert_eq!(claims.len(), 1);
        assert_eq!(claims[0].height, 2);
    }

    #[test]
    fn test_unknown_owner_is_empty() {
        let alice = Keypair::from_seed(&[0x01; 32]);
        let chain = build_chain(vec![claim_body(&alice, 1)]);

        let claims = claims_by_owner(&chain, &Address::new("nobody")).unwrap();
        assert!(claims.is_empty());
    }

    #[test]
    fn test_genesis_only_chain_is_empty() {
        let chain = build_chain(vec![]);
        let claims = claims_by_owner(&chain, &Address::new("anyone")).unwrap();
        assert!(claims.is_empty());
    }

    #[test]
    fn test_corrupt_body_surfaces_error() {
        let alice = Keypair::from_seed(&[0x01; 32]);
        let chain = build_chain(vec![
            claim_body(&alice, 1),
            Bytes::from_static(b"\x00garbage"),
        ]);

        let result = claims_by_owner(&chain, &alice.address());
        assert!(matches!(result, Err(CoreError::DecodeFailure { height: 2, .. })));
    }

    #[test]
    fn test_genesis_payload_past_height_zero_is_corrupt() {
        let genesis_body = BlockBody::from(GenesisPayload::default()).encode().unwrap();
        let chain = build_chain(vec![genesis_body]);

        let result = claims_by_owner(&chain, &Address::new("anyone"));
        assert!(matches!(result, Err(CoreError::DecodeFailure { height: 1, .. })));
    }
}
