//! Support code for the `notion-icon` binary: config files, cookie import
//! and file type detection.

pub mod config;
pub mod cookies;
pub mod error;
pub mod mime;

pub use config::{CliConfig, CredentialSettings};
pub use cookies::{notion_cookies, parse_netscape, session_token, Cookie, SESSION_COOKIE};
pub use error::{CliError, CliResult};
pub use mime::{guess_mime_type, mime_type_for};
