//! First-pass page routes.
//!
//! A route records what the page source *declares*: its URL and language.
//! The base slug is derived by stripping the declared language's own
//! prefix. The enrichment pass later re-derives both from the URL alone.

use serde::Serialize;
use std::path::PathBuf;

use super::{ContentItem, JsonMap};
use crate::config::StaticPageConfig;
use crate::core::{LanguageInfo, LanguageSet, UrlPath};

/// A page before locale metadata is attached.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRoute {
    /// URL the page is served at.
    pub path: UrlPath,
    /// Slug the route was created from (same as `path` for content pages).
    pub slug: UrlPath,
    pub language_key: String,
    pub base_slug: UrlPath,
    /// Source file, if the page comes from content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,
    /// Pass-through fields for the renderer.
    #[serde(flatten)]
    pub context: JsonMap,
}

impl PageRoute {
    /// Route for a page at `path` declaring `language_key` (default when `None`).
    pub fn new(path: UrlPath, language_key: Option<&str>, languages: &LanguageSet) -> Self {
        let language_key = language_key.unwrap_or(languages.default_key());
        let info = LanguageInfo::declared(language_key, &path);
        Self {
            slug: path.clone(),
            path,
            language_key: info.language_key,
            base_slug: info.base_slug,
            source: None,
            context: JsonMap::new(),
        }
    }

    pub fn from_content(item: &ContentItem, languages: &LanguageSet) -> Self {
        let mut route = Self::new(item.slug.clone(), item.language_key.as_deref(), languages);
        if !item.source.as_os_str().is_empty() {
            route.source = Some(item.source.clone());
        }
        route.context = item.fields.clone();
        route
    }

    pub fn from_static(page: &StaticPageConfig, languages: &LanguageSet) -> Self {
        let mut route = Self::new(page.path.clone(), page.lang.as_deref(), languages);
        route.context = page.extra.clone();
        route
    }

    /// Language and base slug as declared by the source.
    pub fn declared_info(&self) -> LanguageInfo {
        LanguageInfo::new(self.language_key.as_str(), self.base_slug.clone())
    }
}

impl AsRef<PageRoute> for PageRoute {
    fn as_ref(&self) -> &PageRoute {
        self
    }
}
