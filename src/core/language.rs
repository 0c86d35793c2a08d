//! Language routing for multilingual sites.
//!
//! A site declares a default language and an ordered list of languages.
//! Pages of the default language live at the site root (`/about/`), pages
//! of every other language live under a `/<key>/` prefix (`/en/about/`).
//!
//! ```text
//! languages = ["ko", "en"], default = "ko"
//!
//!   /about/      ->  ko, base slug /about/
//!   /en/about/   ->  en, base slug /about/
//! ```
//!
//! The base slug is the language-neutral identity of a page: all
//! translations of one document share it.

use serde::Serialize;

use super::UrlPath;
use crate::config::ConfigError;

// ============================================================================
// LanguageSet
// ============================================================================

/// Default language plus the ordered list of supported languages.
///
/// Invariants (checked by [`LanguageSet::new`]):
/// - `languages` is non-empty and has no duplicates
/// - `default_key` is a member of `languages`
///
/// Declaration order matters: prefix matching tries languages in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageSet {
    #[serde(rename = "default")]
    default_key: String,
    languages: Vec<String>,
}

impl LanguageSet {
    pub fn new(
        default_key: impl Into<String>,
        languages: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<Self, ConfigError> {
        let default_key = default_key.into();
        let languages: Vec<String> = languages.into_iter().map(Into::into).collect();

        if languages.is_empty() {
            return Err(ConfigError::Validation("no languages declared".into()));
        }
        for (i, key) in languages.iter().enumerate() {
            if languages[..i].contains(key) {
                return Err(ConfigError::Validation(format!(
                    "language `{key}` is declared more than once"
                )));
            }
        }
        if !languages.contains(&default_key) {
            return Err(ConfigError::Validation(format!(
                "default language `{default_key}` is not in languages {languages:?}"
            )));
        }

        Ok(Self {
            default_key,
            languages,
        })
    }

    #[inline]
    pub fn default_key(&self) -> &str {
        &self.default_key
    }

    /// All languages in declaration order (default included).
    #[inline]
    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    #[inline]
    pub fn contains(&self, key: &str) -> bool {
        self.languages.iter().any(|l| l == key)
    }

    #[inline]
    pub fn is_default(&self, key: &str) -> bool {
        self.default_key == key
    }

    /// Non-default languages in declaration order.
    pub fn non_default(&self) -> impl Iterator<Item = &str> {
        self.languages
            .iter()
            .map(String::as_str)
            .filter(|l| *l != self.default_key)
    }
}

// ============================================================================
// LanguageInfo
// ============================================================================

/// Resolved language of a path and the path with its language prefix removed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageInfo {
    pub language_key: String,
    pub base_slug: UrlPath,
}

impl LanguageInfo {
    pub fn new(language_key: impl Into<String>, base_slug: UrlPath) -> Self {
        Self {
            language_key: language_key.into(),
            base_slug,
        }
    }

    /// Strip `/<language_key>/` from `slug` (first occurrence only).
    ///
    /// This is the declared-language rule used for content items:
    /// the language is known up front, only the base slug is derived.
    pub fn declared(language_key: &str, slug: &UrlPath) -> Self {
        let prefix = format!("/{language_key}/");
        Self::new(language_key, slug.replace_first(&prefix, "/"))
    }
}

impl std::fmt::Display for LanguageInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.language_key, self.base_slug)
    }
}

// ============================================================================
// LanguageResolver
// ============================================================================

/// Maps a URL path to its [`LanguageInfo`].
///
/// Built once from a [`LanguageSet`]; the `/<key>/` prefixes of all
/// non-default languages are precomputed in declaration order.
#[derive(Debug, Clone)]
pub struct LanguageResolver {
    default_key: String,
    /// `(key, "/key/")` for each non-default language.
    prefixes: Vec<(String, String)>,
}

impl LanguageResolver {
    pub fn new(languages: &LanguageSet) -> Self {
        let prefixes = languages
            .non_default()
            .map(|key| (key.to_owned(), format!("/{key}/")))
            .collect();
        Self {
            default_key: languages.default_key().to_owned(),
            prefixes,
        }
    }

    #[inline]
    pub fn default_key(&self) -> &str {
        &self.default_key
    }

    /// Resolve the language of `path`.
    ///
    /// The first non-default language (declaration order) whose `/<key>/`
    /// prefixes the normalized path wins, and that prefix is replaced by `/`.
    /// Without a match the path belongs to the default language unchanged.
    pub fn resolve(&self, path: &str) -> LanguageInfo {
        self.resolve_url(&UrlPath::from_page(path))
    }

    /// [`resolve`](Self::resolve) for an already normalized path.
    pub fn resolve_url(&self, path: &UrlPath) -> LanguageInfo {
        match self
            .prefixes
            .iter()
            .find(|(_, prefix)| path.starts_with(prefix))
        {
            Some((key, prefix)) => LanguageInfo::new(key.as_str(), path.replace_first(prefix, "/")),
            None => LanguageInfo::new(self.default_key.as_str(), path.clone()),
        }
    }

    /// Localized URL of `target` in `language_key` for this site.
    pub fn localize(&self, target: &str, language_key: &str) -> UrlPath {
        localized_url(&UrlPath::from_page(target), language_key, &self.default_key)
    }
}

/// Insert the `/<language_key>/` prefix into `target`, then drop the first
/// `/<default_key>/` segment so default-language URLs stay unprefixed.
///
/// ```text
/// /about/     + en (default ko)  ->  /en/about/
/// /ko/about/  + en (default ko)  ->  /en/about/
/// /about/     + ko (default ko)  ->  /about/
/// ```
pub fn localized_url(target: &UrlPath, language_key: &str, default_key: &str) -> UrlPath {
    target
        .with_segment_prefix(language_key)
        .replace_first(&format!("/{default_key}/"), "/")
}
