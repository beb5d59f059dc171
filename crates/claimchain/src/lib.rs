//! # Claimchain
//!
//! An append-only, hash-linked ledger of ownership claims, guarded by a
//! time-boxed challenge/response protocol.
//!
//! ## Overview
//!
//! - **Blocks**: each block stores the hash of its predecessor; hashes are
//!   computed once, at append time
//! - **Challenges**: `"{address}:{unix_secs}:{tag}"`, valid for 300 seconds
//! - **Claims**: admitted only when the challenge is signed by the address
//! - **Validation**: a full walk of the chain reports every broken hash or link
//!
//! ## Usage
//!
//! ```rust,no_run
//! use claimchain::{ClaimSubmission, Registry, RegistryConfig};
//! use claimchain::core::Keypair;
//! use claimchain::store::MemoryStore;
//!
//! async fn example() {
//!     let registry = Registry::new(MemoryStore::new(), RegistryConfig::default())
//!         .await
//!         .unwrap();
//!
//!     // The client asks for a challenge and signs it with its wallet
//!     let wallet = Keypair::generate();
//!     let message = registry.request_validation(&wallet.address()).message();
//!     let signature = wallet.sign(message.as_bytes());
//!
//!     let block = registry
//!         .submit_claim(ClaimSubmission {
//!             address: wallet.address(),
//!             message,
//!             signature,
//!             claim: serde_json::json!({ "story": "my star" }),
//!         })
//!         .await
//!         .unwrap();
//!     assert_eq!(block.height, 1);
//!
//!     assert!(registry.validate_chain().await.unwrap().is_empty());
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `claimchain::core` - Core primitives (Block, BlockHash, Challenge, etc.)
//! - `claimchain::store` - Ledger storage

pub mod config;
pub mod error;
pub mod registry;

// Re-export component crates
pub use claimchain_core as core;
pub use claimchain_store as store;

// Re-export main types for convenience
pub use config::RegistryConfig;
pub use error::{RegistryError, Result};
pub use registry::{ClaimSubmission, Registry, RegistryBuilder};

// Re-export commonly used core types
pub use claimchain_core::{
    Address, Block, BlockBody, BlockHash, ChainViolation, Challenge, ClaimRecord, ClaimSignature,
    Keypair, OwnedClaim,
};
