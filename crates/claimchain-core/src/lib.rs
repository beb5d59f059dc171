//! # Claimchain Core
//!
//! Pure primitives for Claimchain: blocks, claim bodies, challenges and chain
//! validation.
//!
//! This crate contains no I/O, no storage, no locking. It is pure computation
//! over hash-linked blocks.
//!
//! ## Key Types
//!
//! - [`Block`] - One sealed, hash-linked ledger entry
//! - [`BlockHash`] - Blake3 hash over a block's canonical fields
//! - [`BlockBody`] - Tagged body: genesis sentinel or [`ClaimRecord`]
//! - [`Challenge`] - The self-describing message a client signs
//! - [`ChainViolation`] - A problem found by [`validate_chain`]
//!
//! ## Canonicalization
//!
//! Block hashes are computed over deterministic CBOR. See [`canonical`].

pub mod block;
pub mod body;
pub mod canonical;
pub mod challenge;
pub mod clock;
pub mod crypto;
pub mod error;
pub mod query;
pub mod types;
pub mod validation;

pub use block::Block;
pub use body::{BlockBody, ClaimRecord, GenesisPayload, DEFAULT_GENESIS_NOTE};
pub use canonical::canonical_block_bytes;
pub use challenge::{Challenge, DEFAULT_CHALLENGE_TAG, DEFAULT_VALIDATION_WINDOW_SECS};
pub use clock::{Clock, ManualClock, SystemClock};
pub use crypto::{Address, ClaimSignature, Ed25519Verifier, Keypair, SignatureVerifier};
pub use error::CoreError;
pub use query::{claims_by_owner, OwnedClaim};
pub use types::BlockHash;
pub use validation::{validate_chain, ChainViolation};
