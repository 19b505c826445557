//! # Frontmatter Properties
//!
//! A [`Property`] is one `key: value` line of a frontmatter block.
//!
//! Values are normalized once, when the property is built, whether it came from a
//! file ([`Property::parse`]) or from a request ([`Property::new`]):
//!
//! 1. **Link cleanup**: a value holding an unquoted `[[wikilink]]` is rewritten to the
//!    canonical `"[[target]]"` form. Only the first link survives; any text around it
//!    is dropped. Values that already contain `"[[` are left alone.
//! 2. **Quote unwrap**: a line written as `"Key: Value"` (key opens a quote, value
//!    closes it) loses both quotes.
//! 3. **Flag values**: a value left empty after the first two steps (`key:`) becomes
//!    `false`.
//!
//! Link cleanup runs before quote unwrap, so the unwrap sees the cleaned value.
//! Normalizing an already normalized property changes nothing, which is what makes
//! `parse(p.to_string()) == p` hold.

use crate::error::{FrontmatError, Result};
use serde::Serialize;
use std::fmt;

pub const SEPARATOR: char = ':';

const LINK_OPEN: &str = "[[";
const LINK_CLOSE: &str = "]]";
const QUOTED_LINK_OPEN: &str = "\"[[";
const QUOTE: char = '"';
const FLAG_VALUE: &str = "false";

#[derive(Debug, Clone, Serialize)]
pub struct Property {
    key: String,
    value: String,
    #[serde(skip)]
    source: Option<String>,
}

impl Property {
    /// Parses one line of a frontmatter block.
    ///
    /// The line must contain exactly one `:`. Trailing line terminators are ignored.
    pub fn parse(line: &str) -> Result<Self> {
        let text = line.trim_end_matches(['\r', '\n']);
        let mut pieces = text.split(SEPARATOR);
        let (Some(key), Some(value), None) = (pieces.next(), pieces.next(), pieces.next()) else {
            return Err(FrontmatError::malformed(text));
        };

        let mut property =
            Self::normalized(key, value).ok_or_else(|| FrontmatError::malformed(text))?;
        property.source = Some(text.to_string());
        Ok(property)
    }

    /// Builds a property from an explicit key and value.
    ///
    /// The same normalization as [`Property::parse`] applies, so a property added by a
    /// mutation is indistinguishable from one read back from disk. Neither side may
    /// contain the separator, since the serialized line would no longer parse.
    pub fn new(key: impl AsRef<str>, value: impl AsRef<str>) -> Result<Self> {
        let (key, value) = (key.as_ref(), value.as_ref());
        if key.contains(SEPARATOR) || value.contains(SEPARATOR) {
            return Err(FrontmatError::malformed(format!("{}{} {}", key, SEPARATOR, value)));
        }
        Self::normalized(key, value)
            .ok_or_else(|| FrontmatError::malformed(format!("{}{} {}", key, SEPARATOR, value)))
    }

    fn normalized(key: &str, value: &str) -> Option<Self> {
        let (key, mut value) = unwrap_quotes(key.trim(), &clean_link(value.trim()));
        if key.is_empty() {
            return None;
        }
        // Checked after unwrapping: `"k: "` leaves nothing behind either.
        if value.is_empty() {
            value = FLAG_VALUE.to_string();
        }
        Some(Self {
            key,
            value,
            source: None,
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// The raw line this property was parsed from, if it came from a file.
    pub fn source_line(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Takes over the value of an already normalized property.
    pub(crate) fn assign_value(&mut self, other: &Property) {
        self.value = other.value.clone();
    }
}

impl PartialEq for Property {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.value == other.value
    }
}

impl Eq for Property {}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{} {}", self.key, SEPARATOR, self.value)
    }
}

fn clean_link(value: &str) -> String {
    if !value.contains(LINK_OPEN) || value.contains(QUOTED_LINK_OPEN) {
        return value.to_string();
    }

    let after_open = value
        .split_once(LINK_OPEN)
        .map_or(value, |(_, rest)| rest)
        .trim();
    let inner = after_open.split(LINK_CLOSE).next().unwrap_or_default().trim();
    let inner = inner
        .strip_prefix(QUOTE)
        .and_then(|rest| rest.strip_suffix(QUOTE))
        .unwrap_or(inner);

    format!("{QUOTE}{LINK_OPEN}{inner}{LINK_CLOSE}{QUOTE}")
}

fn unwrap_quotes(key: &str, value: &str) -> (String, String) {
    let (mut key, mut value) = (key, value);
    // Loop so nested wrapping still reaches a fixed point.
    while let (Some(k), Some(v)) = (key.strip_prefix(QUOTE), value.strip_suffix(QUOTE)) {
        key = k.trim();
        value = v.trim();
    }
    (key.to_string(), value.to_string())
}
