//! Document storage for base and per-language metadata.
//!
//! The loader only needs "give me the document for this language"; where
//! documents live is up to the store. [`FsDocumentStore`] follows the
//! naming convention `metadata.toml` / `metadata.<lang>.toml`.

use rustc_hash::FxHashMap;
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::Metadata;
use crate::config::{ConfigError, language_variant};

/// Source of metadata documents.
///
/// `lang = None` addresses the base document, `Some(key)` the override
/// document of a non-default language.
pub trait DocumentStore {
    /// Human-readable location, used in error messages.
    fn location(&self, lang: Option<&str>) -> String;

    /// Read and parse a document. `Ok(None)` if it does not exist.
    fn read(&self, lang: Option<&str>) -> Result<Option<Metadata>, ConfigError>;
}

// ============================================================================
// Document formats
// ============================================================================

/// Supported document syntaxes, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Toml,
    Json,
}

impl DocumentFormat {
    /// `.json` is JSON, everything else is TOML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Toml,
        }
    }

    /// Parse `content` into a metadata table.
    pub fn parse(self, content: &str, location: &str) -> Result<Metadata, ConfigError> {
        let value: Value = match self {
            Self::Toml => toml::from_str(content).map_err(|e| ConfigError::Parse {
                location: location.to_owned(),
                message: e.message().to_owned(),
            })?,
            Self::Json => serde_json::from_str(content).map_err(|e| ConfigError::Parse {
                location: location.to_owned(),
                message: e.to_string(),
            })?,
        };

        match value {
            Value::Object(table) => Ok(table),
            _ => Err(ConfigError::NotATable {
                location: location.to_owned(),
            }),
        }
    }
}

// ============================================================================
// FsDocumentStore
// ============================================================================

/// Documents on disk next to each other: `metadata.toml`, `metadata.en.toml`.
#[derive(Debug, Clone)]
pub struct FsDocumentStore {
    base: PathBuf,
}

impl FsDocumentStore {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// Path of the document for `lang`.
    pub fn path(&self, lang: Option<&str>) -> PathBuf {
        match lang {
            Some(lang) => language_variant(&self.base, lang),
            None => self.base.clone(),
        }
    }
}

impl DocumentStore for FsDocumentStore {
    fn location(&self, lang: Option<&str>) -> String {
        self.path(lang).display().to_string()
    }

    fn read(&self, lang: Option<&str>) -> Result<Option<Metadata>, ConfigError> {
        let path = self.path(lang);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(ConfigError::Io(path, err)),
        };
        DocumentFormat::from_path(&path)
            .parse(&content, &path.display().to_string())
            .map(Some)
    }
}

// ============================================================================
// MemoryDocumentStore
// ============================================================================

/// In-memory documents, for hosts that keep metadata outside the filesystem.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocumentStore {
    base: Option<Metadata>,
    overrides: FxHashMap<String, Metadata>,
}

impl MemoryDocumentStore {
    pub fn new(base: Metadata) -> Self {
        Self {
            base: Some(base),
            overrides: FxHashMap::default(),
        }
    }

    pub fn with_override(mut self, lang: impl Into<String>, document: Metadata) -> Self {
        self.overrides.insert(lang.into(), document);
        self
    }
}

impl DocumentStore for MemoryDocumentStore {
    fn location(&self, lang: Option<&str>) -> String {
        match lang {
            Some(lang) => format!("<memory:{lang}>"),
            None => "<memory>".to_owned(),
        }
    }

    fn read(&self, lang: Option<&str>) -> Result<Option<Metadata>, ConfigError> {
        Ok(match lang {
            Some(lang) => self.overrides.get(lang).cloned(),
            None => self.base.clone(),
        })
    }
}
