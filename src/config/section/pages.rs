//! `[[pages]]` statically declared pages.
//!
//! Pages that do not come from content files (about, 404, paste, ...)
//! but still need language routing and locale metadata.
//!
//! # Example
//!
//! ```toml
//! [[pages]]
//! path = "/about/"
//!
//! [[pages]]
//! path = "/en/about/"
//! lang = "en"
//! title = "About Me"          # Extra keys pass through to the page context
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::core::{LanguageSet, UrlPath};
use serde::{Deserialize, Serialize};

/// A page declared in `tola.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaticPageConfig {
    /// Page URL (slashes are inserted when missing).
    pub path: UrlPath,

    /// Declared language; the default language when absent.
    #[serde(default)]
    pub lang: Option<String>,

    /// Additional fields copied into the page context.
    #[serde(flatten, default)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl StaticPageConfig {
    pub const PAGES: FieldPath = FieldPath::new("pages");

    pub fn validate(pages: &[Self], languages: &LanguageSet, diag: &mut ConfigDiagnostics) {
        for (i, page) in pages.iter().enumerate() {
            if let Some(lang) = &page.lang
                && !languages.contains(lang)
            {
                diag.error_with_hint(
                    Self::PAGES,
                    format!("page #{} (`{}`) uses undeclared language `{lang}`", i + 1, page.path),
                    format!("declared languages: {}", languages.languages().join(", ")),
                );
            }
            if pages[..i].iter().any(|p| p.path == page.path) {
                diag.error(Self::PAGES, format!("page `{}` is declared more than once", page.path));
            }
        }
    }
}
