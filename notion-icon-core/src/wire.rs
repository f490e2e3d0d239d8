//! Request and response bodies of the service's internal API.

use indexmap::IndexMap;
use notion_icon_types::PageId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Record table that pages live in.
pub const BLOCK_TABLE: &str = "block";
/// Table of the user an edit is attributed to.
pub const USER_TABLE: &str = "notion_user";
/// Storage bucket class requested for icon uploads.
pub const UPLOAD_BUCKET: &str = "secure";

/// A record in the service's data model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pointer {
    pub table: String,
    pub id: String,
    pub space_id: String,
}

impl Pointer {
    pub fn block(page_id: &PageId, space_id: impl Into<String>) -> Self {
        Self {
            table: BLOCK_TABLE.to_string(),
            id: page_id.to_string(),
            space_id: space_id.into(),
        }
    }
}

// ── getUploadFileUrl ────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadFileUrlRequest {
    pub bucket: String,
    pub name: String,
    pub content_type: String,
    pub record: Pointer,
    pub support_extra_headers: bool,
    pub content_length: usize,
}

impl UploadFileUrlRequest {
    /// Slot request for a file attached to `page_id`.
    pub fn for_page(
        page_id: &PageId,
        space_id: &str,
        file_name: &str,
        content_type: &str,
        content_length: usize,
    ) -> Self {
        Self {
            bucket: UPLOAD_BUCKET.to_string(),
            name: file_name.to_string(),
            content_type: content_type.to_string(),
            record: Pointer::block(page_id, space_id),
            support_extra_headers: true,
            content_length,
        }
    }
}

/// Raw slot response. Every field is optional on the wire; see
/// [`UploadFileUrlResponse::into_slot`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadFileUrlResponse {
    pub signed_upload_post_url: Option<String>,
    /// Form fields to forward verbatim, in this order, before the file.
    #[serde(default)]
    pub fields: IndexMap<String, String>,
    pub url: Option<String>,
}

impl UploadFileUrlResponse {
    /// Returns the slot, or `None` if either URL is missing or empty.
    #[must_use]
    pub fn into_slot(self) -> Option<UploadSlot> {
        let signed_upload_url = self.signed_upload_post_url.filter(|u| !u.is_empty())?;
        let final_attachment_url = self.url.filter(|u| !u.is_empty())?;
        Some(UploadSlot {
            signed_upload_url,
            upload_fields: self.fields,
            final_attachment_url,
        })
    }
}

/// A time-limited upload target. Used once, right after it is issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadSlot {
    pub signed_upload_url: String,
    pub upload_fields: IndexMap<String, String>,
    /// Becomes valid only once the upload has completed.
    pub final_attachment_url: String,
}

// ── saveTransactionsFanout ──────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Command {
    Set,
    Update,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    pub pointer: Pointer,
    pub path: Vec<String>,
    pub command: Command,
    pub args: serde_json::Value,
}

/// Arguments of the root `update` that touches a page's edit metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditMetadata {
    pub last_edited_time: i64,
    pub last_edited_by_id: String,
    pub last_edited_by_table: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDebug {
    pub user_action: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: Uuid,
    pub space_id: String,
    pub debug: TransactionDebug,
    pub operations: Vec<Operation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveTransactionsRequest {
    pub request_id: Uuid,
    pub transactions: Vec<Transaction>,
}

impl SaveTransactionsRequest {
    /// Envelope with a single transaction that sets the page icon to `icon`
    /// and marks the page as edited by `user_id` at `edited_at`.
    #[allow(clippy::too_many_arguments)]
    pub fn set_page_icon(
        request_id: Uuid,
        transaction_id: Uuid,
        page_id: &PageId,
        space_id: &str,
        user_id: &str,
        user_action: &str,
        icon: &str,
        edited_at: i64,
    ) -> Self {
        let pointer = Pointer::block(page_id, space_id);

        let operations = vec![
            Operation {
                pointer: pointer.clone(),
                path: vec!["format".to_string(), "page_icon".to_string()],
                command: Command::Set,
                args: serde_json::Value::String(icon.to_string()),
            },
            Operation {
                pointer,
                path: Vec::new(),
                command: Command::Update,
                args: serde_json::json!(EditMetadata {
                    last_edited_time: edited_at,
                    last_edited_by_id: user_id.to_string(),
                    last_edited_by_table: USER_TABLE.to_string(),
                }),
            },
        ];

        Self {
            request_id,
            transactions: vec![Transaction {
                id: transaction_id,
                space_id: space_id.to_string(),
                debug: TransactionDebug {
                    user_action: user_action.to_string(),
                },
                operations,
            }],
        }
    }
}
