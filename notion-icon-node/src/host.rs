use crate::error::HostError;
use async_trait::async_trait;
use notion_icon_core::HttpTransport;
use notion_icon_types::{BinaryPayload, Credentials};

/// Capabilities the node needs from the workflow runtime.
///
/// Item indices are positions in the current input batch, `0..item_count()`.
#[async_trait]
pub trait NodeHost: Send + Sync {
    type Http: HttpTransport;

    /// Number of input records in this execution.
    fn item_count(&self) -> usize;

    /// Resolved value of a node parameter for one record.
    ///
    /// `None` means the parameter was not set; the node then falls back to
    /// the default from its description.
    fn parameter(&self, index: usize, name: &str) -> Option<serde_json::Value>;

    /// Looks up a named credential.
    async fn credentials(&self, name: &str) -> Result<Credentials, HostError>;

    /// Binary attachment stored under `property` on one record.
    fn binary_input(&self, index: usize, property: &str) -> Option<BinaryPayload>;

    /// Whether failed records become `{success: false}` outputs instead of
    /// aborting the execution.
    fn continue_on_fail(&self) -> bool;

    fn http(&self) -> &Self::Http;
}
