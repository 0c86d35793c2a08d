//! URL path type for type-safe page URL handling.
//!
//! - Internal representation: Always decoded (human-readable)
//! - Browser boundary: Decode on input via [`UrlPath::from_browser`]

use std::borrow::Borrow;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Decoded page URL path
///
/// Invariants:
/// - Always decoded (no percent-encoding)
/// - Always starts with `/`
/// - Always ends with `/`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UrlPath(Arc<str>);

impl UrlPath {
    /// Create from browser URL (decode percent-encoding, strip query string and fragment).
    pub fn from_browser(encoded: &str) -> Self {
        use percent_encoding::percent_decode_str;

        let path = Self::strip_query_fragment(&collapse_leading_slashes(encoded.trim()));
        match percent_decode_str(&path).decode_utf8() {
            Ok(decoded) => Self::from_page(&decoded),
            Err(_) => Self::from_page(&path),
        }
    }

    /// Create page URL, inserting a missing leading and/or trailing slash.
    ///
    /// Total: every input yields a valid page URL, `""` becomes `/`.
    pub fn from_page(path: &str) -> Self {
        Self(Arc::from(normalize(path)))
    }

    /// Strip query string and fragment from a path using url crate.
    ///
    /// Returns the still-encoded path component.
    fn strip_query_fragment(path: &str) -> String {
        static BASE: std::sync::OnceLock<Option<url::Url>> = std::sync::OnceLock::new();
        let base = BASE.get_or_init(|| url::Url::parse("http://x").ok());

        match base.as_ref().map(|base| base.join(path)) {
            Some(Ok(parsed)) => parsed.path().to_string(),
            // Fallback to simple split if url parsing fails
            _ => path.split(['?', '#']).next().unwrap_or(path).to_string(),
        }
    }

    /// Get the decoded URL path as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if path starts with the given prefix.
    #[inline]
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.0.starts_with(prefix)
    }

    /// Replace the first occurrence of `from` with `to`.
    ///
    /// The result is re-normalized, so replacing `/en/` with `/` keeps
    /// the page URL invariants.
    pub fn replace_first(&self, from: &str, to: &str) -> Self {
        Self::from_page(&self.0.replacen(from, to, 1))
    }

    /// Prepend a single path segment: `/rest/` + `en` -> `/en/rest/`.
    pub fn with_segment_prefix(&self, segment: &str) -> Self {
        Self(Arc::from(format!("/{segment}{}", self.0)))
    }
}

/// `//en/about` would be joined as a scheme-relative URL with host `en`.
fn collapse_leading_slashes(path: &str) -> std::borrow::Cow<'_, str> {
    if path.starts_with("//") {
        format!("/{}", path.trim_start_matches('/')).into()
    } else {
        path.into()
    }
}

/// Insert a missing leading and/or trailing slash.
fn normalize(path: &str) -> String {
    let mut out = String::with_capacity(path.len() + 2);
    if !path.starts_with('/') {
        out.push('/');
    }
    out.push_str(path);
    if !out.ends_with('/') {
        out.push('/');
    }
    out
}

impl std::fmt::Display for UrlPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Default for UrlPath {
    fn default() -> Self {
        Self::from_page("/")
    }
}

impl AsRef<str> for UrlPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for UrlPath {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<String> for UrlPath {
    fn from(s: String) -> Self {
        Self::from_page(&s)
    }
}

impl From<&str> for UrlPath {
    fn from(s: &str) -> Self {
        Self::from_page(s)
    }
}

impl PartialEq<str> for UrlPath {
    fn eq(&self, other: &str) -> bool {
        self.0.as_ref() == other
    }
}

impl PartialEq<&str> for UrlPath {
    fn eq(&self, other: &&str) -> bool {
        self.0.as_ref() == *other
    }
}

impl Serialize for UrlPath {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for UrlPath {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::from_page(&s))
    }
}
