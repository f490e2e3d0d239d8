//! Remote service configuration.

use serde::{Deserialize, Serialize};

pub const DEFAULT_API_BASE_URL: &str = "https://www.notion.so/api/v3";
pub const DEFAULT_CLIENT_VERSION: &str = "23.13.0.2800";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/123.0.0.0 Safari/537.36";
pub const DEFAULT_REFERER: &str = "https://www.notion.so/";
/// Tag recorded in `debug.userAction` of every committed transaction.
pub const DEFAULT_USER_ACTION: &str = "NotionSetIconUpdate";

/// Endpoint and client-identification settings.
///
/// The header values are what the service's web client sends; the service
/// rejects requests without them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotionConfig {
    /// Base URL of the internal API (e.g. `https://www.notion.so/api/v3`).
    pub api_base_url: String,
    /// Value of the `notion-client-version` header.
    pub client_version: String,
    pub user_agent: String,
    pub referer: String,
    pub user_action: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for NotionConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            client_version: DEFAULT_CLIENT_VERSION.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            referer: DEFAULT_REFERER.to_string(),
            user_action: DEFAULT_USER_ACTION.to_string(),
            timeout_secs: 60,
        }
    }
}

impl NotionConfig {
    /// Full URL of an API method, e.g. `saveTransactionsFanout`.
    #[must_use]
    pub fn endpoint(&self, method: &str) -> String {
        format!("{}/{method}", self.api_base_url.trim_end_matches('/'))
    }
}
