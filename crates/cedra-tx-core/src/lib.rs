//! # Cedra Transaction Core
//!
//! Pure primitives for building and signing Cedra transactions.
//!
//! This crate contains no I/O and no networking. It is pure computation:
//! canonical encoding, key and address derivation, and signing.
//!
//! ## Key Types
//!
//! - [`Account`] - Ed25519 signing key plus its derived [`AccountAddress`]
//! - [`StructTag`] - Fully-qualified on-chain type name (`0x1::module::Name`)
//! - [`TransactionPayload`] - Entry-function call with pre-encoded arguments
//! - [`RawTransaction`] - Unsigned transaction
//! - [`SignedTransaction`] - Raw transaction plus [`Authenticator`]
//!
//! ## Canonicalization
//!
//! All wire bytes are produced by the [`canonical`] module: ULEB128 lengths
//! and variant tags, little-endian fixed-width integers, raw 32-byte
//! addresses. The same value always encodes to the same bytes.

pub mod account;
pub mod address;
pub mod authenticator;
pub mod canonical;
pub mod crypto;
pub mod error;
pub mod payload;
pub mod struct_tag;
pub mod transaction;

pub use account::Account;
pub use address::{derive_resource_address, AccountAddress};
pub use authenticator::Authenticator;
pub use canonical::{Decoder, Encoder, FixedWidth};
pub use crypto::{Ed25519PublicKey, Ed25519Signature, Sha3Hash};
pub use error::{CoreError, Result};
pub use payload::TransactionPayload;
pub use struct_tag::StructTag;
pub use transaction::{raw_transaction_salt, transaction_hash, RawTransaction, SignedTransaction};
