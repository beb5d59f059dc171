//! # Claimchain Store
//!
//! Storage abstraction for the Claimchain ledger. Provides a trait-based
//! interface over an append-only block sequence, with an in-memory
//! implementation.
//!
//! ## Key Types
//!
//! - [`Store`] - The async trait for all ledger operations
//! - [`MemoryStore`] - In-memory ledger guarded by a single `RwLock`
//! - [`StoreError`] - Store failures
//!
//! ## Usage
//!
//! ```rust,no_run
//! use bytes::Bytes;
//! use claimchain_core::SystemClock;
//! use claimchain_store::{MemoryStore, Store};
//!
//! async fn example() {
//!     let store = MemoryStore::new();
//!
//!     // Genesis first; calling this again is a no-op
//!     let genesis = store
//!         .initialize(Bytes::from_static(b"genesis"), &SystemClock)
//!         .await
//!         .unwrap();
//!     assert_eq!(genesis.height, 0);
//!
//!     // Later blocks are appended by the registry after verification
//!     // let block = store.append(encoded_claim, &SystemClock).await.unwrap();
//! }
//! ```
//!
//! ## Design Notes
//!
//! - **Append-only**: no deletion, no reordering, no rewriting
//! - **Serialized writes**: height, linkage and block time are assigned under
//!   the write lock
//! - **Memory-resident**: nothing is persisted

pub mod error;
pub mod memory;
pub mod traits;

pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use traits::Store;
