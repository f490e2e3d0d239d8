//! TOML configuration file.
//!
//! ```toml
//! [api]
//! api_base_url = "https://www.notion.so/api/v3"
//! timeout_secs = 30
//!
//! [credentials]
//! space_id = "..."
//! user_id = "..."
//! cookies_file = "cookies.txt"   # or token_v2 = "..."
//! ```

use crate::cookies;
use crate::error::{CliError, CliResult};
use notion_icon_core::NotionConfig;
use notion_icon_types::Credentials;
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub api: NotionConfig,
    pub credentials: CredentialSettings,
}

impl CliConfig {
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn load(path: &Path) -> CliResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml(&text).map_err(|source| CliError::Config {
            path: path.to_path_buf(),
            source,
        })?;

        // A relative cookies file is relative to the config file.
        if let (Some(cookies), Some(dir)) = (&config.credentials.cookies_file, path.parent()) {
            if cookies.is_relative() {
                config.credentials.cookies_file = Some(dir.join(cookies));
            }
        }
        Ok(config)
    }
}

/// Credential values from any one source; unset fields are `None`.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CredentialSettings {
    pub token_v2: Option<String>,
    pub space_id: Option<String>,
    pub user_id: Option<String>,
    /// Netscape cookies file to take `token_v2` from.
    pub cookies_file: Option<PathBuf>,
}

impl fmt::Debug for CredentialSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialSettings")
            .field("token_v2", &self.token_v2.as_ref().map(|_| "[redacted]"))
            .field("space_id", &self.space_id)
            .field("user_id", &self.user_id)
            .field("cookies_file", &self.cookies_file)
            .finish()
    }
}

impl CredentialSettings {
    /// Fields set in `overrides` win over those in `self`.
    #[must_use]
    pub fn overlay(self, overrides: CredentialSettings) -> Self {
        Self {
            token_v2: overrides.token_v2.or(self.token_v2),
            space_id: overrides.space_id.or(self.space_id),
            user_id: overrides.user_id.or(self.user_id),
            cookies_file: overrides.cookies_file.or(self.cookies_file),
        }
    }

    /// Builds credentials, reading the cookies file only if no token is set.
    pub fn resolve(self) -> CliResult<Credentials> {
        let token_v2 = match (non_empty(self.token_v2), &self.cookies_file) {
            (Some(token), _) => token,
            (None, Some(path)) => cookies::session_token(path)?,
            (None, None) => return Err(CliError::MissingCredential("token_v2")),
        };
        let space_id = non_empty(self.space_id).ok_or(CliError::MissingCredential("space_id"))?;
        let user_id = non_empty(self.user_id).ok_or(CliError::MissingCredential("user_id"))?;
        Ok(Credentials::new(token_v2, space_id, user_id))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
