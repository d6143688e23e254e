//! Error types for node access.

use thiserror::Error;

/// Errors returned by a [`NodeClient`](crate::NodeClient).
#[derive(Debug, Error)]
pub enum NodeError {
    /// The HTTP request could not be sent or its body not read.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The node answered with a status other than 200 or 202.
    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    /// The body parsed but a field was missing or out of range.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("invalid url: {0}")]
    Url(String),

    /// The node could not serve the request (used by the in-memory node).
    #[error("node unavailable: {0}")]
    Unavailable(String),
}

impl NodeError {
    /// Whether the failure happened on the network path rather than in the
    /// node's answer.
    pub fn is_transport(&self) -> bool {
        matches!(self, NodeError::Http(_) | NodeError::Unavailable(_))
    }
}

/// Result type for node operations.
pub type Result<T> = std::result::Result<T, NodeError>;
