//! Per-record icon requests.

use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// File name used when the host's binary attachment has none.
pub const DEFAULT_FILE_NAME: &str = "icon.png";
/// Mime type used when the host's binary attachment has none.
pub const DEFAULT_MIME_TYPE: &str = "image/png";

/// Where the icon comes from, as selected by the `iconSource` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconSource {
    #[default]
    Url,
    Upload,
}

impl IconSource {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Url => "url",
            Self::Upload => "upload",
        }
    }
}

impl fmt::Display for IconSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IconSource {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "url" => Ok(Self::Url),
            "upload" => Ok(Self::Upload),
            other => Err(Error::InvalidIconSource(other.to_string())),
        }
    }
}

/// Binary attachment to upload as the icon.
#[derive(Clone, PartialEq, Eq)]
pub struct BinaryPayload {
    pub data: Vec<u8>,
    pub file_name: String,
    pub mime_type: String,
}

impl BinaryPayload {
    /// Builds a payload, falling back to `icon.png` / `image/png`.
    pub fn new(data: Vec<u8>, file_name: Option<String>, mime_type: Option<String>) -> Self {
        Self {
            data,
            file_name: file_name
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| DEFAULT_FILE_NAME.to_string()),
            mime_type: mime_type
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| DEFAULT_MIME_TYPE.to_string()),
        }
    }

    /// Exact byte length sent as `contentLength`.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl fmt::Debug for BinaryPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BinaryPayload")
            .field("len", &self.data.len())
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .finish()
    }
}

/// The icon to apply. Exactly one source is populated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IconInput {
    /// An icon token used verbatim: a remote URL or an emoji.
    Url(String),
    /// Binary content uploaded to the service first.
    Upload(BinaryPayload),
}

/// One record's worth of work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconRequest {
    /// Raw page reference exactly as the user supplied it.
    pub page_ref: String,
    pub icon: IconInput,
}

impl IconRequest {
    pub fn from_url(page_ref: impl Into<String>, icon_url: impl Into<String>) -> Self {
        Self {
            page_ref: page_ref.into(),
            icon: IconInput::Url(icon_url.into()),
        }
    }

    pub fn from_upload(page_ref: impl Into<String>, payload: BinaryPayload) -> Self {
        Self {
            page_ref: page_ref.into(),
            icon: IconInput::Upload(payload),
        }
    }

    #[must_use]
    pub fn source(&self) -> IconSource {
        match self.icon {
            IconInput::Url(_) => IconSource::Url,
            IconInput::Upload(_) => IconSource::Upload,
        }
    }
}
