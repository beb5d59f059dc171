//! # Claimchain Testkit
//!
//! Testing utilities for Claimchain.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: a deterministic wallet, a manual clock and a registry wired to both
//! - **Chains**: sealed block sequences built without a store
//! - **Generators**: Proptest strategies for property-based testing
//!
//! ## Test Fixtures
//!
//! ```rust,no_run
//! use claimchain_testkit::{star, TestFixture};
//!
//! async fn example() {
//!     let fixture = TestFixture::with_seed([0x01; 32]);
//!     let registry = fixture.registry().await.unwrap();
//!     let block = fixture.submit_star(&registry, "my star").await.unwrap();
//!     assert_eq!(block.height, 1);
//!
//!     // Time only moves when the test says so
//!     fixture.clock.advance(301);
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use claimchain_core::validate_chain;
//! use claimchain_testkit::{build_chain, generators::records_with_owners};
//!
//! proptest! {
//!     #[test]
//!     fn sealed_chains_validate(records in records_with_owners(4, 30)) {
//!         prop_assert!(validate_chain(&build_chain(&records)).is_empty());
//!     }
//! }
//! ```

pub mod fixtures;
pub mod generators;

pub use fixtures::{build_chain, multi_party_fixtures, star, TestFixture, FIXTURE_NOW};
pub use generators::{record_from_params, records_with_owners, ClaimParams};
