//! # Cedra Transactions
//!
//! Build, sign, submit, and confirm transactions on a Cedra network.
//!
//! ## Overview
//!
//! - **Prepare**: fetch the sender's sequence number and a gas estimate
//!   concurrently and fill in a [`RawTransaction`]
//! - **Sign**: domain-separated Ed25519 signature over the canonical bytes
//! - **Submit**: post the signed bytes to a node, get back the hash
//! - **Confirm**: poll the node until the transaction commits or a deadline passes
//!
//! ## Usage
//!
//! ```rust,no_run
//! use cedra_tx::{Account, AccountAddress, CedraClient, Chain, ChainId, ClientConfig};
//!
//! async fn example() -> cedra_tx::Result<()> {
//!     let config = ClientConfig::new(Chain::new(ChainId::TESTNET, "https://node.example/v1"));
//!     let client = CedraClient::connect(config)?;
//!
//!     let sender = Account::from_private_key_hex("ed25519-priv-0x...")?;
//!     let receiver = AccountAddress::from_hex("0xc745...")?;
//!
//!     let hash = client.transfer(&sender, receiver, 100_000_000).await?;
//!     let outcome = client.await_execution(&hash, None).await?;
//!     assert!(outcome.is_confirmed());
//!     Ok(())
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `cedra_tx::core` - Encoding, accounts, signing
//! - `cedra_tx::node` - Node access (HTTP and in-memory)

pub mod client;
pub mod config;
pub mod deploy;
pub mod error;

// Re-export component crates
pub use cedra_tx_core as core;
pub use cedra_tx_node as node;

pub use client::{CedraClient, ExecutionOutcome};
pub use config::{Chain, ChainConfig, ChainId, ClientConfig};
pub use error::{ClientError, Result};

// Re-export commonly used core types
pub use cedra_tx_core::{
    Account, AccountAddress, Authenticator, RawTransaction, SignedTransaction, StructTag,
    TransactionPayload,
};
