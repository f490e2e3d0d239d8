//! Error types for the node adapter.

use notion_icon_core::IconError;
use thiserror::Error;

/// Result type for node execution.
pub type NodeResult<T> = Result<T, NodeError>;

/// Failure reported by the host runtime itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct HostError(pub String);

/// Why a single record failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ItemError {
    #[error("missing required parameter '{0}'")]
    MissingParameter(String),

    #[error("invalid value for parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("unsupported operation '{operation}' on resource '{resource}'")]
    UnsupportedOperation { resource: String, operation: String },

    #[error(transparent)]
    Icon(#[from] IconError),
}

/// Errors that abort a whole execution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NodeError {
    #[error("failed to load credentials '{name}': {reason}")]
    Credentials { name: String, reason: String },

    /// First failing record when the host is not in lenient mode.
    #[error("item {index}: {source}")]
    Item {
        index: usize,
        #[source]
        source: ItemError,
    },
}

impl NodeError {
    /// Index of the input record that caused the failure, if any.
    #[must_use]
    pub fn item_index(&self) -> Option<usize> {
        match self {
            Self::Item { index, .. } => Some(*index),
            Self::Credentials { .. } => None,
        }
    }
}
