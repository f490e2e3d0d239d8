//! Page identifiers.
//!
//! The remote service addresses pages by a UUID-shaped block id. Users paste
//! either the bare 32 hex characters (with or without hyphens) or a page URL
//! whose last path segment ends in the id, e.g.
//! `https://www.notion.so/acme/Roadmap-278c413b2a6880e4bcc3f1fcee4839ca`.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of hex digits in an id once hyphens are removed.
const HEX_LEN: usize = 32;

/// How a raw page reference is interpreted before extracting the id.
///
/// Any input containing a `/` is treated as a URL. Hex digits are matched
/// case-sensitively in both variants: uppercase input is rejected, not folded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageRef<'a> {
    /// The id is the trailing run of 32 hex digits.
    Url(&'a str),
    /// The whole value (minus hyphens) must be the id.
    Bare(&'a str),
}

impl<'a> PageRef<'a> {
    /// Classifies a raw reference.
    #[must_use]
    pub fn classify(raw: &'a str) -> Self {
        if raw.contains('/') {
            Self::Url(raw)
        } else {
            Self::Bare(raw)
        }
    }

    /// Returns the raw input this reference was built from.
    #[must_use]
    pub fn raw(&self) -> &'a str {
        match self {
            Self::Url(raw) | Self::Bare(raw) => raw,
        }
    }

    /// Extracts the 32 lowercase hex digits, if present.
    fn hex_digits(&self) -> Option<String> {
        let stripped = strip_hyphens(self.raw());
        match self {
            Self::Url(_) => trailing_hex(&stripped).map(str::to_owned),
            Self::Bare(_) => {
                (stripped.len() == HEX_LEN && stripped.bytes().all(is_lower_hex)).then_some(stripped)
            }
        }
    }
}

/// A page id in canonical 8-4-4-4-12 lowercase form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PageId(String);

impl PageId {
    /// Normalizes a bare id or page URL into canonical form.
    pub fn parse(raw: &str) -> Result<Self> {
        PageRef::classify(raw)
            .hex_digits()
            .map(|hex| Self::from_hex(&hex))
            .ok_or_else(|| Error::InvalidPageId {
                input: raw.to_string(),
            })
    }

    /// `hex` must be exactly 32 ASCII hex digits.
    fn from_hex(hex: &str) -> Self {
        Self(format!(
            "{}-{}-{}-{}-{}",
            &hex[0..8],
            &hex[8..12],
            &hex[12..16],
            &hex[16..20],
            &hex[20..32]
        ))
    }

    /// Returns the canonical hyphenated form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the 32 digits without hyphens.
    #[must_use]
    pub fn simple(&self) -> String {
        strip_hyphens(&self.0)
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for PageId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PageId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<PageId> for String {
    fn from(id: PageId) -> Self {
        id.0
    }
}

impl AsRef<str> for PageId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn strip_hyphens(s: &str) -> String {
    s.chars().filter(|c| *c != '-').collect()
}

fn is_lower_hex(b: u8) -> bool {
    matches!(b, b'0'..=b'9' | b'a'..=b'f')
}

/// Last `HEX_LEN` characters of `s` when they are all lowercase hex.
fn trailing_hex(s: &str) -> Option<&str> {
    let start = s.len().checked_sub(HEX_LEN)?;
    if !s.as_bytes()[start..].iter().copied().all(is_lower_hex) {
        return None;
    }
    // All trailing bytes are ASCII, so `start` is a char boundary.
    s.get(start..)
}
