//! Error types for the handover agent.

use thiserror::Error;

/// Result type alias for agent operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in agent operations.
#[derive(Error, Debug)]
pub enum Error {
    // Protocol boundary errors
    #[error("malformed indication: {0}")]
    MalformedIndication(String),

    #[error("subscription to node {node} failed: {reason}")]
    SubscriptionFailed { node: String, reason: String },

    #[error("control request rejected by node {node}: {reason}")]
    ControlRejected { node: String, reason: String },

    #[error("topology watch failed: {0}")]
    TopologyWatchFailed(String),

    // Runtime errors
    #[error("indication queue closed")]
    QueueClosed,

    // Serialization errors
    #[error("serialization error: {0}")]
    Serialization(String),

    // Generic errors
    #[error("internal error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
