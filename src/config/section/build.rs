//! `[build]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [build]
//! content = "content"         # Markdown sources (relative to site root)
//! metadata = "metadata.toml"  # Base metadata; overrides are `metadata.<lang>.toml`
//! messages = "messages"       # Optional `<lang>.toml` UI message catalogs
//! output = "public"           # Where `pages.json` is written
//! strict = false              # Fail the build on slug/path language mismatches
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSectionConfig {
    /// Content source directory (Markdown files).
    pub content: PathBuf,

    /// Base metadata document (`.toml` or `.json`).
    pub metadata: PathBuf,

    /// Directory of per-language message catalogs.
    pub messages: Option<PathBuf>,

    /// Build output directory.
    pub output: PathBuf,

    /// Treat page language mismatches as errors instead of warnings.
    pub strict: bool,
}

impl Default for BuildSectionConfig {
    fn default() -> Self {
        Self {
            content: "content".into(),
            metadata: "metadata.toml".into(),
            messages: None,
            output: "public".into(),
            strict: false,
        }
    }
}

impl BuildSectionConfig {
    pub const CONTENT: FieldPath = FieldPath::new("build.content");
    pub const METADATA: FieldPath = FieldPath::new("build.metadata");
    pub const MESSAGES: FieldPath = FieldPath::new("build.messages");

    /// Resolve relative paths against the site root.
    pub fn normalize(&mut self, root: &Path) {
        self.content = root.join(&self.content);
        self.metadata = root.join(&self.metadata);
        self.output = root.join(&self.output);
        if let Some(messages) = self.messages.take() {
            self.messages = Some(root.join(messages));
        }
    }

    /// Validate paths (call after [`normalize`](Self::normalize)).
    ///
    /// A missing content directory only warns: a site may consist of
    /// statically declared pages alone.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !self.content.is_dir() {
            diag.warn(
                Self::CONTENT,
                format!("content directory `{}` not found", self.content.display()),
            );
        }

        if !self.metadata.is_file() {
            diag.error_with_hint(
                Self::METADATA,
                format!("metadata document `{}` not found", self.metadata.display()),
                "create it, e.g. metadata.toml with a [site] table",
            );
        }

        if let Some(messages) = &self.messages
            && !messages.is_dir()
        {
            diag.error(
                Self::MESSAGES,
                format!("messages directory `{}` not found", messages.display()),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let build = BuildSectionConfig::default();
        assert_eq!(build.content, PathBuf::from("content"));
        assert_eq!(build.metadata, PathBuf::from("metadata.toml"));
        assert!(build.messages.is_none());
        assert!(!build.strict);
    }

    #[test]
    fn test_normalize_joins_root() {
        let mut build = BuildSectionConfig {
            messages: Some("messages".into()),
            ..Default::default()
        };
        build.normalize(Path::new("/site"));
        assert_eq!(build.content, PathBuf::from("/site/content"));
        assert_eq!(build.metadata, PathBuf::from("/site/metadata.toml"));
        assert_eq!(build.messages, Some(PathBuf::from("/site/messages")));
    }

    #[test]
    fn test_validate_missing_paths() {
        let dir = TempDir::new().unwrap();
        let mut build = BuildSectionConfig {
            messages: Some("messages".into()),
            ..Default::default()
        };
        build.normalize(dir.path());

        let mut diag = ConfigDiagnostics::new();
        build.validate(&mut diag);
        // metadata + messages are errors, content only warns
        assert_eq!(diag.len(), 2);
        assert_eq!(diag.warnings().len(), 1);

        fs::create_dir_all(dir.path().join("content")).unwrap();
        fs::create_dir_all(dir.path().join("messages")).unwrap();
        fs::write(dir.path().join("metadata.toml"), "[site]\nname = \"x\"").unwrap();

        let mut diag = ConfigDiagnostics::new();
        build.validate(&mut diag);
        assert!(diag.is_empty());
        assert!(diag.warnings().is_empty());
    }
}
