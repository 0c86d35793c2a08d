//! Translation suggestions for URLs without a page.
//!
//! When `/fr/about/` does not exist, pages sharing its base slug in other
//! languages (`/about/`, `/en/about/`) are offered as alternatives.

use serde::Serialize;

use super::PageRoute;
use crate::core::{LanguageInfo, LanguageResolver, UrlPath};

/// A translated page to link to from a "not found" page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub path: UrlPath,
    pub language_key: String,
}

/// Pages with the same base slug as `missing` in a different language.
///
/// Input order is preserved.
pub fn suggestions<P: AsRef<PageRoute>>(missing: &LanguageInfo, pages: &[P]) -> Vec<Suggestion> {
    pages
        .iter()
        .map(|page| page.as_ref())
        .filter(|page| {
            page.base_slug == missing.base_slug && page.language_key != missing.language_key
        })
        .map(|page| Suggestion {
            path: page.path.clone(),
            language_key: page.language_key.clone(),
        })
        .collect()
}

/// Resolve a raw request path and collect its suggestions.
pub fn suggest_for<P: AsRef<PageRoute>>(
    resolver: &LanguageResolver,
    requested: &str,
    pages: &[P],
) -> (LanguageInfo, Vec<Suggestion>) {
    let info = resolver.resolve_url(&UrlPath::from_browser(requested));
    let found = suggestions(&info, pages);
    (info, found)
}
