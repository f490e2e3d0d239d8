//! Workspace credentials for the remote service.

use crate::{Error, Result};
use serde::Deserialize;
use std::fmt;

/// Session credentials for one workspace member.
///
/// Owned by the host's credential store; the pipeline only ever borrows it.
/// `Debug` redacts the session token and the type is deliberately not
/// `Serialize`.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct Credentials {
    /// Value of the `token_v2` session cookie.
    #[serde(alias = "tokenV2")]
    pub token_v2: String,
    /// Workspace ("space") id the page belongs to.
    #[serde(alias = "spaceId")]
    pub space_id: String,
    /// Id of the user the edits are attributed to.
    #[serde(alias = "userId")]
    pub user_id: String,
}

impl Credentials {
    pub fn new(
        token_v2: impl Into<String>,
        space_id: impl Into<String>,
        user_id: impl Into<String>,
    ) -> Self {
        Self {
            token_v2: token_v2.into(),
            space_id: space_id.into(),
            user_id: user_id.into(),
        }
    }

    /// Checks that every field is populated.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("token_v2", &self.token_v2),
            ("space_id", &self.space_id),
            ("user_id", &self.user_id),
        ];
        match fields.iter().find(|(_, value)| value.trim().is_empty()) {
            Some((field, _)) => Err(Error::IncompleteCredentials { field: *field }),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("token_v2", &"[redacted]")
            .field("space_id", &self.space_id)
            .field("user_id", &self.user_id)
            .finish()
    }
}
