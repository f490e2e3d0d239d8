//! Error types for the icon pipeline.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, IconError>;

/// Failure reported by an [`HttpTransport`](crate::HttpTransport) before any
/// response was received.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Stage of the pipeline an error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    Normalize,
    /// Local checks on the icon input before any network call.
    Resolve,
    UploadSlot,
    #[serde(rename = "upload-to-storage")]
    StorageUpload,
    Commit,
    VerifyCredentials,
}

impl Stage {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Normalize => "normalize",
            Self::Resolve => "resolve",
            Self::UploadSlot => "upload-slot",
            Self::StorageUpload => "upload-to-storage",
            Self::Commit => "commit",
            Self::VerifyCredentials => "verify-credentials",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What went wrong talking to a remote endpoint.
///
/// `status` is `None` when no HTTP response was received or the failure was
/// detected locally (e.g. a response missing required fields).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFailure {
    pub status: Option<u16>,
    pub detail: String,
}

impl RemoteFailure {
    /// Non-success HTTP status with the response body as detail.
    pub fn http(status: u16, body: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            detail: body.into(),
        }
    }

    /// Failure without an HTTP status.
    pub fn other(detail: impl Into<String>) -> Self {
        Self {
            status: None,
            detail: detail.into(),
        }
    }
}

impl From<TransportError> for RemoteFailure {
    fn from(err: TransportError) -> Self {
        Self::other(err.0)
    }
}

impl fmt::Display for RemoteFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.status, self.detail.is_empty()) {
            (Some(status), true) => write!(f, "HTTP {status}"),
            (Some(status), false) => write!(f, "HTTP {status}: {}", self.detail),
            (None, _) => f.write_str(&self.detail),
        }
    }
}

/// Errors that can occur while setting a page icon.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IconError {
    #[error("invalid page ID: {input}")]
    InvalidIdentifier { input: String },

    #[error("icon URL must not be empty")]
    MissingIconUrl,

    #[error("no binary data found in property '{property}'")]
    MissingBinaryInput { property: String },

    #[error("failed to get upload URL: {0}")]
    UploadSlot(RemoteFailure),

    #[error("failed to upload file to storage: {0}")]
    StorageUpload(RemoteFailure),

    #[error("failed to update page icon: {0}")]
    Commit(RemoteFailure),

    #[error("credential check failed: {0}")]
    VerifyCredentials(RemoteFailure),
}

impl IconError {
    /// Returns the stage this error was raised in.
    #[must_use]
    pub const fn stage(&self) -> Stage {
        match self {
            Self::InvalidIdentifier { .. } => Stage::Normalize,
            Self::MissingIconUrl | Self::MissingBinaryInput { .. } => Stage::Resolve,
            Self::UploadSlot(_) => Stage::UploadSlot,
            Self::StorageUpload(_) => Stage::StorageUpload,
            Self::Commit(_) => Stage::Commit,
            Self::VerifyCredentials(_) => Stage::VerifyCredentials,
        }
    }

    /// Returns the HTTP status of the failing response, if there was one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::UploadSlot(f)
            | Self::StorageUpload(f)
            | Self::Commit(f)
            | Self::VerifyCredentials(f) => f.status,
            _ => None,
        }
    }

    /// Returns true if the error was detected before any network call.
    #[must_use]
    pub const fn is_local(&self) -> bool {
        matches!(self.stage(), Stage::Normalize | Stage::Resolve)
    }
}
