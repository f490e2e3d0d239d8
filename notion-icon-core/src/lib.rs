//! Page icon pipeline for the notion-icon node.
//!
//! Setting an icon is a strictly linear sequence of stages:
//!
//! 1. Normalize the page reference into a canonical [`PageId`].
//! 2. Resolve the icon: use the given URL verbatim, or request an upload slot
//!    from the service and post the binary to the signed storage endpoint.
//! 3. Commit one transaction that sets `format.page_icon` and touches the
//!    page's edit metadata.
//!
//! There are no retries and nothing is rolled back: an upload that succeeds
//! before a failed commit is left orphaned in the remote store.
//!
//! All network access goes through the [`HttpTransport`] capability and all
//! nondeterminism through [`IdGenerator`] and [`Clock`], so the pipeline can
//! be driven by fakes in tests.
//!
//! [`PageId`]: notion_icon_types::PageId

mod api;
mod clock;
mod config;
mod error;
mod ids;
mod setter;
mod transport;
mod wire;

pub use api::NotionApi;
pub use clock::{Clock, SystemClock};
pub use config::{
    NotionConfig, DEFAULT_API_BASE_URL, DEFAULT_CLIENT_VERSION, DEFAULT_REFERER,
    DEFAULT_USER_ACTION, DEFAULT_USER_AGENT,
};
pub use error::{IconError, PipelineResult, RemoteFailure, Stage, TransportError};
pub use ids::{IdGenerator, RandomIds};
pub use setter::{normalize, IconSetter, IconUpdate};
pub use transport::{
    FilePart, HttpBody, HttpRequest, HttpResponse, HttpTransport, MultipartForm,
    ReqwestTransport,
};
pub use wire::{
    Command, EditMetadata, Operation, Pointer, SaveTransactionsRequest, Transaction,
    TransactionDebug, UploadFileUrlRequest, UploadFileUrlResponse, UploadSlot, BLOCK_TABLE,
    UPLOAD_BUCKET, USER_TABLE,
};
