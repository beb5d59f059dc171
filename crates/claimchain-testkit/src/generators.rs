//! Proptest generators for property-based testing.

use proptest::prelude::*;
use serde_json::Value;

use claimchain_core::{BlockHash, ClaimRecord, Keypair};

use crate::fixtures::{build_chain, TestFixture};

/// Generate a random keypair.
pub fn keypair() -> impl Strategy<Value = Keypair> {
    any::<[u8; 32]>().prop_map(|seed| Keypair::from_seed(&seed))
}

/// Generate a random BlockHash.
pub fn block_hash() -> impl Strategy<Value = BlockHash> {
    any::<[u8; 32]>().prop_map(BlockHash::from_bytes)
}

/// Generate a reasonable timestamp (seconds).
pub fn timestamp() -> impl Strategy<Value = i64> {
    0i64..=4_102_444_800i64
}

/// Generate a float-free JSON leaf.
fn json_leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        "[ -~]{0,32}".prop_map(Value::from),
    ]
}

/// Generate an opaque claim payload: a flat JSON object.
pub fn claim_payload() -> impl Strategy<Value = Value> {
    prop::collection::btree_map("[a-z]{1,8}", json_leaf(), 0..6)
        .prop_map(|map| Value::Object(map.into_iter().collect()))
}

/// Parameters for generating a signed claim record.
#[derive(Debug, Clone)]
pub struct ClaimParams {
    pub seed: [u8; 32],
    pub issued_at: i64,
    pub claim: Value,
}

impl Arbitrary for ClaimParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (any::<[u8; 32]>(), timestamp(), claim_payload())
            .prop_map(|(seed, issued_at, claim)| ClaimParams {
                seed,
                issued_at,
                claim,
            })
            .boxed()
    }
}

/// Generate a signed claim record from parameters.
pub fn record_from_params(params: &ClaimParams) -> ClaimRecord {
    TestFixture::with_seed(params.seed).make_record(params.issued_at, params.claim.clone())
}

/// Generate records signed by one of `owners` wallets (small seeds, so owners repeat).
pub fn records_with_owners(owners: u8, max_len: usize) -> impl Strategy<Value = Vec<ClaimRecord>> {
    prop::collection::vec((0..owners, claim_payload()), 0..=max_len).prop_map(|items| {
        items
            .into_iter()
            .map(|(owner, claim)| TestFixture::with_seed([owner; 32]).make_record(0, claim))
            .collect()
    })
}
