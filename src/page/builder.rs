//! Page building: first-pass routes, then enrichment with locale metadata.
//!
//! ```text
//! content items ─┐
//!                ├─> PageRoute (declared) ─> resolve(path) ─> PageDescriptor
//! [[pages]]     ─┘                              │
//!                                               └─> Inconsistency (if they disagree)
//! ```
//!
//! The enrichment pass is authoritative: language and base slug come from
//! the URL, not from what the source declared. Disagreements are reported
//! so the content can be fixed, never silently masked.

use serde::Serialize;
use std::fmt;
use std::sync::Arc;

use super::{ContentItem, PageRoute};
use crate::config::{ConfigError, StaticPageConfig};
use crate::core::{LanguageInfo, LanguageResolver, LanguageSet, UrlPath};
use crate::metadata::{DocumentStore, Metadata, MetadataLoader};
use crate::{debug, log};

// ============================================================================
// Output types
// ============================================================================

/// A fully built page, handed to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageDescriptor {
    #[serde(flatten)]
    pub route: PageRoute,
    pub metadata: Arc<Metadata>,
}

impl PageDescriptor {
    #[inline]
    pub fn path(&self) -> &UrlPath {
        &self.route.path
    }

    #[inline]
    pub fn language_key(&self) -> &str {
        &self.route.language_key
    }

    #[inline]
    pub fn base_slug(&self) -> &UrlPath {
        &self.route.base_slug
    }
}

impl AsRef<PageRoute> for PageDescriptor {
    fn as_ref(&self) -> &PageRoute {
        &self.route
    }
}

/// A page whose declared language disagrees with its URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Inconsistency {
    pub path: UrlPath,
    /// What the content item or page declaration said.
    pub declared: LanguageInfo,
    /// What the URL resolves to (the value that was used).
    pub resolved: LanguageInfo,
}

impl fmt::Display for Inconsistency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "`{}` declares {} but resolves to {}",
            self.path, self.declared, self.resolved
        )
    }
}

/// Result of the enrichment pass.
#[derive(Debug, Default)]
pub struct BuildOutput {
    pub pages: Vec<PageDescriptor>,
    pub inconsistencies: Vec<Inconsistency>,
}

// ============================================================================
// PageBuilder
// ============================================================================

/// Turns content items and declared pages into page descriptors.
pub struct PageBuilder<'a, S> {
    languages: &'a LanguageSet,
    resolver: LanguageResolver,
    metadata: &'a MetadataLoader<S>,
}

impl<'a, S: DocumentStore> PageBuilder<'a, S> {
    pub fn new(languages: &'a LanguageSet, metadata: &'a MetadataLoader<S>) -> Self {
        Self {
            languages,
            resolver: LanguageResolver::new(languages),
            metadata,
        }
    }

    /// First pass: one route per content item, `path = slug`.
    pub fn build_pages(&self, items: &[ContentItem]) -> Vec<PageRoute> {
        items
            .iter()
            .map(|item| PageRoute::from_content(item, self.languages))
            .collect()
    }

    /// First pass for statically declared pages.
    pub fn static_pages(&self, pages: &[StaticPageConfig]) -> Vec<PageRoute> {
        pages
            .iter()
            .map(|page| PageRoute::from_static(page, self.languages))
            .collect()
    }

    /// Second pass: resolve every route from its path and attach metadata.
    ///
    /// Fails without emitting any page when metadata for a language
    /// cannot be loaded.
    pub fn enrich(&self, routes: Vec<PageRoute>) -> Result<BuildOutput, ConfigError> {
        let mut output = BuildOutput {
            pages: Vec::with_capacity(routes.len()),
            inconsistencies: Vec::new(),
        };

        for route in routes {
            let resolved = self.resolver.resolve_url(&route.path);
            let declared = route.declared_info();
            if declared != resolved {
                let inconsistency = Inconsistency {
                    path: route.path.clone(),
                    declared,
                    resolved: resolved.clone(),
                };
                log!("warning"; "{}", inconsistency);
                output.inconsistencies.push(inconsistency);
            }

            let metadata = self.metadata.get(&resolved.language_key)?;
            debug!("build"; "{} -> {}", route.path, resolved);

            output.pages.push(PageDescriptor {
                route: PageRoute {
                    language_key: resolved.language_key,
                    base_slug: resolved.base_slug,
                    ..route
                },
                metadata,
            });
        }

        Ok(output)
    }

    /// Both passes over content items and declared pages.
    ///
    /// Content pages come first, in item order, followed by declared pages.
    pub fn build(
        &self,
        items: &[ContentItem],
        pages: &[StaticPageConfig],
    ) -> Result<BuildOutput, ConfigError> {
        let mut routes = self.build_pages(items);
        routes.extend(self.static_pages(pages));
        self.enrich(routes)
    }
}
