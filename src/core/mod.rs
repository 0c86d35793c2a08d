//! Core types - pure abstractions shared across the codebase.

mod language;
mod url;

pub use language::{LanguageInfo, LanguageResolver, LanguageSet, localized_url};
pub use url::UrlPath;
