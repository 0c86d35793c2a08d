//! Page types: content discovery, routing, enrichment and 404 suggestions.
//!
//! | Module       | Purpose                                         |
//! |--------------|-------------------------------------------------|
//! | `content`    | Markdown files to content items                 |
//! | `route`      | First-pass routes (declared language)           |
//! | `builder`    | Enrichment pass (URL language + metadata)       |
//! | `not_found`  | Translation suggestions for missing pages       |
//! | `menu`       | Language switcher entries                       |

mod builder;
mod content;
mod frontmatter;
mod menu;
mod not_found;
mod route;

pub use builder::{BuildOutput, Inconsistency, PageBuilder, PageDescriptor};
pub use content::{ContentError, ContentItem, discover, file_slug};
pub use menu::{MenuEntry, language_menu};
pub use not_found::{Suggestion, suggest_for, suggestions};
pub use route::PageRoute;

/// A JSON object map for storing arbitrary metadata fields.
pub type JsonMap = serde_json::Map<String, serde_json::Value>;
