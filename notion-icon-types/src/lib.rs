//! Core type definitions for notion-icon.
//!
//! This crate holds the transport-agnostic pieces shared by the pipeline and
//! the host adapter:
//! - Page identifier normalization (`PageRef`, `PageId`)
//! - Read-only workspace credentials
//! - The per-record icon request and the JSON result returned to the host
//!
//! Nothing here performs I/O.

mod credentials;
mod ids;
mod request;
mod result;

pub use credentials::Credentials;
pub use ids::{PageId, PageRef};
pub use request::{BinaryPayload, IconInput, IconRequest, IconSource, DEFAULT_FILE_NAME, DEFAULT_MIME_TYPE};
pub use result::{IconResult, SUCCESS_MESSAGE};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building request types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("invalid page ID: {input}")]
    InvalidPageId { input: String },

    #[error("invalid icon source: {0} (expected \"url\" or \"upload\")")]
    InvalidIconSource(String),

    #[error("credentials are missing {field}")]
    IncompleteCredentials { field: &'static str },
}
