//! Language switcher entries for a page.

use serde::Serialize;

use crate::core::{LanguageResolver, LanguageSet, UrlPath, localized_url};

/// One language in the switcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuEntry {
    pub language_key: String,
    /// The current page's base slug in this language.
    pub url: UrlPath,
    /// Whether this is the language of the current page.
    pub selected: bool,
}

/// One entry per declared language, in declaration order.
pub fn language_menu(
    languages: &LanguageSet,
    resolver: &LanguageResolver,
    current: &str,
) -> Vec<MenuEntry> {
    let info = resolver.resolve(current);
    languages
        .languages()
        .iter()
        .map(|lang| MenuEntry {
            language_key: lang.clone(),
            url: localized_url(&info.base_slug, lang, languages.default_key()),
            selected: *lang == info.language_key,
        })
        .collect()
}
