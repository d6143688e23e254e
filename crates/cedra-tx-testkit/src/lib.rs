//! # Cedra Transaction Testkit
//!
//! Testing utilities for Cedra transactions.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Known transactions with expected bytes, signatures, and hashes
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: An account wired to an in-memory node
//!
//! ## Golden Vectors
//!
//! ```rust
//! use cedra_tx_testkit::vectors::verify_all_vectors;
//!
//! for (name, passed, detail) in verify_all_vectors() {
//!     assert!(passed, "{}: {}", name, detail);
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use cedra_tx_testkit::generators::TransactionParams;
//!
//! proptest! {
//!     #[test]
//!     fn signing_is_deterministic(params: TransactionParams) {
//!         let s1 = params.raw.sign(&params.account).unwrap();
//!         let s2 = params.raw.sign(&params.account).unwrap();
//!         prop_assert_eq!(s1.to_bytes(), s2.to_bytes());
//!     }
//! }
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{multi_party_fixtures, TestFixture};
pub use generators::TransactionParams;
pub use vectors::{all_vectors, signed_transaction_from_vector, verify_all_vectors, GoldenVector};
