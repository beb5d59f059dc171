//! Test fixtures and helpers.
//!
//! Common setup code for integration tests: a deterministic wallet, a clock
//! that only moves when told to, and a registry wired to both.

use std::sync::Arc;

use serde_json::json;

use claimchain::{ClaimSubmission, Registry, RegistryConfig};
use claimchain_core::{Address, Block, BlockBody, ClaimRecord, GenesisPayload, Keypair, ManualClock};
use claimchain_store::MemoryStore;

/// Start time used by fixtures (2025-01-14T16:00:00Z).
pub const FIXTURE_NOW: i64 = 1_736_870_400;

/// A test fixture with a wallet and a manual clock.
pub struct TestFixture {
    pub keypair: Keypair,
    pub clock: Arc<ManualClock>,
}

impl TestFixture {
    /// Create a new test fixture with a random keypair.
    pub fn new() -> Self {
        Self {
            keypair: Keypair::generate(),
            clock: Arc::new(ManualClock::new(FIXTURE_NOW)),
        }
    }

    /// Create with a deterministic keypair from seed.
    pub fn with_seed(seed: [u8; 32]) -> Self {
        Self {
            keypair: Keypair::from_seed(&seed),
            clock: Arc::new(ManualClock::new(FIXTURE_NOW)),
        }
    }

    /// The fixture wallet's address.
    pub fn address(&self) -> Address {
        self.keypair.address()
    }

    /// Build an in-memory registry driven by this fixture's clock.
    pub async fn registry(&self) -> claimchain::Result<Registry<MemoryStore>> {
        self.registry_with_config(RegistryConfig::default()).await
    }

    /// Build an in-memory registry with a custom configuration.
    pub async fn registry_with_config(
        &self,
        config: RegistryConfig,
    ) -> claimchain::Result<Registry<MemoryStore>> {
        Registry::builder(MemoryStore::new())
            .clock(self.clock.clone())
            .config(config)
            .build()
            .await
    }

    /// Sign `message` and wrap it in a submission carrying `claim`.
    pub fn sign_submission(&self, message: &str, claim: serde_json::Value) -> ClaimSubmission {
        ClaimSubmission {
            address: self.address(),
            message: message.to_string(),
            signature: self.keypair.sign(message.as_bytes()),
            claim,
        }
    }

    /// Request a challenge from `registry`, sign it and submit a star claim.
    pub async fn submit_star(
        &self,
        registry: &Registry<MemoryStore>,
        story: &str,
    ) -> claimchain::Result<Block> {
        let message = registry.request_validation(&self.address()).message();
        registry
            .submit_claim(self.sign_submission(&message, star(story)))
            .await
    }

    /// Build a signed claim record without going through a registry.
    pub fn make_record(&self, issued_at: i64, claim: serde_json::Value) -> ClaimRecord {
        let message = format!("{}:{}:starRegistry", self.address(), issued_at);
        ClaimRecord {
            address: self.address(),
            signature: self.keypair.sign(message.as_bytes()),
            message,
            claim,
        }
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// A star claim payload.
pub fn star(story: &str) -> serde_json::Value {
    json!({
        "ra": "16h 29m 1.0s",
        "dec": "-26° 29' 24.9",
        "story": story,
    })
}

/// Seal a chain of `records.len() + 1` blocks without a store.
pub fn build_chain(records: &[ClaimRecord]) -> Vec<Block> {
    let mut blocks = Vec::with_capacity(records.len() + 1);
    let genesis = BlockBody::from(GenesisPayload::default())
        .encode()
        .expect("genesis body encodes");
    blocks.push(Block::seal(0, FIXTURE_NOW, None, genesis));

    for record in records {
        let body = BlockBody::from(record.clone())
            .encode()
            .expect("claim body encodes");
        let height = blocks.len() as u64;
        let prev = blocks.last().map(|b| b.hash);
        blocks.push(Block::seal(height, FIXTURE_NOW + height as i64, prev, body));
    }
    blocks
}

/// Create fixtures with distinct deterministic wallets.
pub fn multi_party_fixtures(count: usize) -> Vec<TestFixture> {
    (0..count)
        .map(|i| {
            let mut seed = [0u8; 32];
            seed[..8].copy_from_slice(&(i as u64).to_le_bytes());
            TestFixture::with_seed(seed)
        })
        .collect()
}
