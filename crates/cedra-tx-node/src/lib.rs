//! # Cedra Transaction Node Access
//!
//! The [`NodeClient`] trait is everything the transaction client needs from a
//! full node. Two implementations are provided:
//!
//! - [`HttpNode`] - REST client built on `reqwest`
//! - [`memory::MemoryNode`] - in-memory node for tests

pub mod error;
pub mod http;
pub mod models;
pub mod node;

pub use error::{NodeError, Result};
pub use http::HttpNode;
pub use models::{AccountInfo, GasEstimate, PendingTransaction, TransactionStatus};
pub use node::{memory, NodeClient};
