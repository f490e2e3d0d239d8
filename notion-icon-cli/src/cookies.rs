//! Netscape `cookies.txt` import.
//!
//! Each cookie is one line of seven tab-separated fields:
//! `domain  include_subdomains  path  secure  expires  name  value`.
//! Lines starting with `#` are comments, except the `#HttpOnly_` domain
//! prefix that browsers write for HTTP-only cookies.

use crate::error::{CliError, CliResult};
use std::fmt;
use std::path::Path;

/// Name of the session cookie carrying the API token.
pub const SESSION_COOKIE: &str = "token_v2";

const SERVICE_DOMAIN: &str = "notion.so";
const HTTP_ONLY_PREFIX: &str = "#HttpOnly_";

#[derive(Clone, PartialEq, Eq)]
pub struct Cookie {
    pub domain: String,
    pub include_subdomains: bool,
    pub path: String,
    pub secure: bool,
    pub http_only: bool,
    /// Unix seconds; 0 for session cookies.
    pub expires: i64,
    pub name: String,
    pub value: String,
}

impl fmt::Debug for Cookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cookie")
            .field("domain", &self.domain)
            .field("path", &self.path)
            .field("name", &self.name)
            .field("value", &"[redacted]")
            .finish_non_exhaustive()
    }
}

/// Parses every well-formed cookie line; anything else is skipped.
pub fn parse_netscape(text: &str) -> Vec<Cookie> {
    text.lines().filter_map(parse_line).collect()
}

fn parse_line(line: &str) -> Option<Cookie> {
    let line = line.trim_end_matches('\r');
    let (line, http_only) = match line.strip_prefix(HTTP_ONLY_PREFIX) {
        Some(rest) => (rest, true),
        None if line.is_empty() || line.starts_with('#') => return None,
        None => (line, false),
    };

    let parts: Vec<&str> = line.split('\t').collect();
    let [domain, include_subdomains, path, secure, expires, name, value] = parts.as_slice() else {
        return None;
    };

    Some(Cookie {
        domain: domain.trim().to_string(),
        include_subdomains: include_subdomains.trim().eq_ignore_ascii_case("true"),
        path: path.trim().to_string(),
        secure: secure.trim().eq_ignore_ascii_case("true"),
        http_only,
        expires: expires.trim().parse().unwrap_or(0),
        name: name.trim().to_string(),
        value: value.trim().to_string(),
    })
}

/// Keeps only cookies set for the service's domain.
pub fn notion_cookies(cookies: Vec<Cookie>) -> Vec<Cookie> {
    cookies
        .into_iter()
        .filter(|c| c.domain.contains(SERVICE_DOMAIN))
        .collect()
}

/// Reads the session token from a cookies file.
pub fn session_token(path: &Path) -> CliResult<String> {
    let text = std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    notion_cookies(parse_netscape(&text))
        .into_iter()
        .find(|c| c.name == SESSION_COOKIE && !c.value.is_empty())
        .map(|c| c.value)
        .ok_or_else(|| CliError::NoSessionCookie {
            path: path.to_path_buf(),
        })
}
