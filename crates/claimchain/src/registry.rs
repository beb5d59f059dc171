//! The Registry: ownership verification in front of the ledger.
//!
//! A client asks for a challenge, signs it with the key behind its address,
//! and submits the signature together with its claim. The registry checks
//! the message shape, the time window and the signature, and only then
//! appends a block. Reads (lookups, owner queries, validation) go straight
//! to a consistent snapshot of the store.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use claimchain_core::{
    claims_by_owner, validate_chain, Address, Block, BlockBody, BlockHash, ChainViolation,
    Challenge, ClaimRecord, ClaimSignature, Clock, Ed25519Verifier, GenesisPayload, OwnedClaim,
    SignatureVerifier, SystemClock,
};
use claimchain_store::{Store, StoreError};

use crate::config::RegistryConfig;
use crate::error::{RegistryError, Result};

/// What a client submits to register a claim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimSubmission {
    /// The address claiming ownership.
    pub address: Address,
    /// The challenge message previously issued for `address`.
    pub message: String,
    /// Signature over `message` by `address`.
    pub signature: ClaimSignature,
    /// Opaque claim payload.
    pub claim: serde_json::Value,
}

/// The main Registry struct.
///
/// Owns the ledger store. Share it across tasks with `Arc<Registry<S>>`.
pub struct Registry<S: Store> {
    store: Arc<S>,
    verifier: Arc<dyn SignatureVerifier>,
    clock: Arc<dyn Clock>,
    config: RegistryConfig,
}

impl<S: Store> Registry<S> {
    /// Open a registry with the system clock and Ed25519 verification.
    ///
    /// The genesis block is created if the store is empty.
    pub async fn new(store: S, config: RegistryConfig) -> Result<Self> {
        RegistryBuilder::new(store).config(config).build().await
    }

    /// Start building a registry with custom collaborators.
    pub fn builder(store: S) -> RegistryBuilder<S> {
        RegistryBuilder::new(store)
    }

    /// Get the configuration.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Get the store reference.
    pub fn store(&self) -> &S {
        &self.store
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Ownership Verification
    // ─────────────────────────────────────────────────────────────────────────

    /// Issue a challenge for `address`.
    ///
    /// Nothing is recorded: the message carries its own issue time.
    pub fn request_validation(&self, address: &Address) -> Challenge {
        let challenge = Challenge::new(
            address.clone(),
            self.clock.now_secs(),
            self.config.challenge_tag.as_str(),
        );
        debug!(%address, issued_at = challenge.issued_at, "issued challenge");
        challenge
    }

    /// Verify a submission and, if it passes, append it as a new block.
    ///
    /// The window is judged against the clock as read on entry; the block
    /// time is read again by the store once the ledger tip is locked.
    /// On any error the ledger is unchanged.
    pub async fn submit_claim(&self, submission: ClaimSubmission) -> Result<Block> {
        let now = self.clock.now_secs();

        if let Err(e) = self.verify_submission(&submission, now) {
            warn!(address = %submission.address, error = %e, "rejected claim submission");
            return Err(e);
        }

        let address = submission.address.clone();
        let body = BlockBody::from(ClaimRecord {
            address: submission.address,
            message: submission.message,
            signature: submission.signature,
            claim: submission.claim,
        })
        .encode()
        .map_err(|e| {
            let e = RegistryError::from(e);
            warn!(%address, error = %e, "rejected claim submission");
            e
        })?;

        let block = self.store.append(body, self.clock.as_ref()).await?;
        info!(height = block.height, hash = %block.hash, "admitted claim");
        Ok(block)
    }

    /// Run the shape, window and signature checks in that order.
    fn verify_submission(&self, submission: &ClaimSubmission, now: i64) -> Result<Challenge> {
        let challenge = Challenge::parse(&submission.message)?;

        let window = self.config.validation_window_secs;
        if challenge.is_expired(now, window) {
            return Err(RegistryError::ExpiredChallenge {
                issued_at: challenge.issued_at,
                elapsed: challenge.elapsed(now),
                window,
            });
        }

        if !self
            .verifier
            .verify(&submission.message, &submission.address, &submission.signature)
        {
            return Err(RegistryError::InvalidSignature);
        }

        Ok(challenge)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Query Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Height of the last block.
    pub async fn current_height(&self) -> Result<u64> {
        self.store
            .current_height()
            .await?
            .ok_or_else(|| StoreError::InvalidData("ledger has no genesis block".into()).into())
    }

    /// Number of blocks, genesis included.
    pub async fn len(&self) -> Result<u64> {
        Ok(self.store.len().await?)
    }

    /// Get a block by height.
    pub async fn block_at_height(&self, height: u64) -> Result<Option<Block>> {
        Ok(self.store.block_at_height(height).await?)
    }

    /// Get a block by hash.
    pub async fn block_by_hash(&self, hash: &BlockHash) -> Result<Option<Block>> {
        Ok(self.store.block_by_hash(hash).await?)
    }

    /// Get the decoded claim held by a block.
    ///
    /// `None` for an unknown hash and for the genesis block.
    pub async fn claim_by_hash(&self, hash: &BlockHash) -> Result<Option<OwnedClaim>> {
        match self.store.block_by_hash(hash).await? {
            Some(block) if !block.is_genesis() => Ok(Some(OwnedClaim::from_block(&block)?)),
            _ => Ok(None),
        }
    }

    /// List every claim owned by `address`, ascending by height.
    pub async fn claims_by_owner(&self, address: &Address) -> Result<Vec<OwnedClaim>> {
        let blocks = self.store.snapshot().await?;
        Ok(claims_by_owner(&blocks, address)?)
    }

    /// Walk the whole chain and report every integrity or link violation.
    pub async fn validate_chain(&self) -> Result<Vec<ChainViolation>> {
        let blocks = self.store.snapshot().await?;
        let violations = validate_chain(&blocks);
        for violation in &violations {
            warn!(%violation, "chain violation");
        }
        Ok(violations)
    }
}

/// Builder for [`Registry`].
pub struct RegistryBuilder<S: Store> {
    store: S,
    verifier: Arc<dyn SignatureVerifier>,
    clock: Arc<dyn Clock>,
    config: RegistryConfig,
}

impl<S: Store> RegistryBuilder<S> {
    /// Start with the system clock, Ed25519 verification and default config.
    pub fn new(store: S) -> Self {
        Self {
            store,
            verifier: Arc::new(Ed25519Verifier),
            clock: Arc::new(SystemClock),
            config: RegistryConfig::default(),
        }
    }

    /// Set the configuration.
    pub fn config(mut self, config: RegistryConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the signature verifier.
    pub fn verifier(mut self, verifier: Arc<dyn SignatureVerifier>) -> Self {
        self.verifier = verifier;
        self
    }

    /// Set the clock.
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Validate the config, initialize the ledger and build the registry.
    pub async fn build(self) -> Result<Registry<S>> {
        self.config.validate()?;

        let genesis_body = BlockBody::from(GenesisPayload::new(&self.config.genesis_note)).encode()?;
        self.store
            .initialize(genesis_body, self.clock.as_ref())
            .await?;

        Ok(Registry {
            store: Arc::new(self.store),
            verifier: self.verifier,
            clock: self.clock,
            config: self.config,
        })
    }
}
