//! Error types for the transaction client.

use std::time::Duration;

use cedra_tx_core::CoreError;
use cedra_tx_node::NodeError;
use thiserror::Error;

use crate::config::ChainId;

/// Errors that can occur while preparing, submitting, or confirming a
/// transaction.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Malformed input: keys, addresses, type tags, signing.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The sender's sequence number could not be fetched. Nothing was built.
    #[error("failed to fetch sequence number: {0}")]
    SequenceFetchFailed(#[source] NodeError),

    /// The gas price estimate could not be fetched.
    ///
    /// `prepare` absorbs this and uses a gas unit price of 0.
    #[error("failed to estimate gas price: {0}")]
    GasEstimateFailed(#[source] NodeError),

    /// The node refused or did not answer the submission.
    #[error("failed to submit transaction: {0}")]
    SubmissionFailed(#[source] NodeError),

    /// The node failed while the client was polling for the outcome.
    #[error("failed to confirm transaction: {0}")]
    ConfirmationFailed(#[source] NodeError),

    /// The transaction did not reach a terminal state before the deadline.
    #[error("transaction {hash} not confirmed within {timeout:?}")]
    ConfirmationTimeout { hash: String, timeout: Duration },

    #[error("unknown chain: {0}")]
    UnknownChain(ChainId),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Constructing the node client failed.
    #[error("node error: {0}")]
    Node(#[source] NodeError),
}

impl ClientError {
    /// The caller supplied something invalid; retrying unchanged won't help.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            ClientError::Core(_)
                | ClientError::UnknownChain(_)
                | ClientError::InvalidConfig(_)
                | ClientError::Io(_)
        )
    }

    /// The node or the network path to it failed, or the deadline passed.
    pub fn is_network_error(&self) -> bool {
        matches!(
            self,
            ClientError::SequenceFetchFailed(_)
                | ClientError::GasEstimateFailed(_)
                | ClientError::SubmissionFailed(_)
                | ClientError::ConfirmationFailed(_)
                | ClientError::ConfirmationTimeout { .. }
                | ClientError::Node(_)
        )
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
