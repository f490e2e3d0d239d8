//! Output record returned to the host for each input record.

use crate::PageId;
use serde::{Deserialize, Serialize};

/// Message attached to every successful result.
pub const SUCCESS_MESSAGE: &str = "Page icon updated successfully";

/// JSON shape: `{success, pageId, iconUrl, message}` on success,
/// `{success: false, error}` on failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IconResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl IconResult {
    pub fn updated(page_id: &PageId, icon_url: impl Into<String>) -> Self {
        Self {
            success: true,
            page_id: Some(page_id.to_string()),
            icon_url: Some(icon_url.into()),
            message: Some(SUCCESS_MESSAGE.to_string()),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            page_id: None,
            icon_url: None,
            message: None,
            error: Some(error.into()),
        }
    }
}
