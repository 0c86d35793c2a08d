//! `[i18n]` section configuration.
//!
//! Declares the site's languages. The order of `languages` is significant:
//! when resolving a URL, prefixes are tried in this order and the first
//! match wins.
//!
//! # Example
//!
//! ```toml
//! [i18n]
//! default = "ko"              # Served at the site root, never prefixed
//! languages = ["ko", "en"]    # Every other key is served under `/<key>/`
//! ```

use crate::config::{ConfigDiagnostics, ConfigError, FieldPath};
use crate::core::LanguageSet;
use serde::{Deserialize, Serialize};

/// Raw `[i18n]` section, validated before a [`LanguageSet`] is built from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct I18nConfig {
    /// Default language key.
    pub default: String,

    /// Supported language keys in declaration order.
    pub languages: Vec<String>,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            default: "en".into(),
            languages: vec!["en".into()],
        }
    }
}

impl I18nConfig {
    pub const DEFAULT: FieldPath = FieldPath::new("i18n.default");
    pub const LANGUAGES: FieldPath = FieldPath::new("i18n.languages");

    /// Validate the language declaration.
    ///
    /// # Checks
    /// - `default` and `languages` are non-empty
    /// - every key is a single URL segment (no `/`, no whitespace)
    /// - no key is declared twice
    /// - `default` is one of `languages`
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.default.is_empty() {
            diag.error(Self::DEFAULT, "default language must not be empty");
        }

        if self.languages.is_empty() {
            diag.error_with_hint(
                Self::LANGUAGES,
                "no languages declared",
                format!("e.g.: {} = [\"ko\", \"en\"]", Self::LANGUAGES.as_str()),
            );
            return;
        }

        for (i, key) in self.languages.iter().enumerate() {
            if !is_valid_key(key) {
                diag.error_with_hint(
                    Self::LANGUAGES,
                    format!("invalid language key `{key}`"),
                    "language keys become URL prefixes and must be a single path segment",
                );
            }
            if self.languages[..i].contains(key) {
                diag.error(
                    Self::LANGUAGES,
                    format!("language `{key}` is declared more than once"),
                );
            }
        }

        if !self.default.is_empty() && !self.languages.contains(&self.default) {
            diag.error_with_hint(
                Self::DEFAULT,
                format!("default language `{}` is not declared", self.default),
                format!("add \"{}\" to {}", self.default, Self::LANGUAGES.as_str()),
            );
        }
    }

    /// Build the immutable [`LanguageSet`].
    pub fn language_set(&self) -> Result<LanguageSet, ConfigError> {
        LanguageSet::new(self.default.as_str(), self.languages.iter().map(String::as_str))
    }
}

fn is_valid_key(key: &str) -> bool {
    !key.is_empty() && !key.contains('/') && !key.chars().any(char::is_whitespace)
}
