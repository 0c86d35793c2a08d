//! UI message catalogs, one per language.
//!
//! Catalogs are nested tables in `messages/<lang>.toml` (or `.json`),
//! flattened into dot-separated keys for lookup:
//!
//! ```toml
//! # messages/en.toml
//! [404]
//! title = "Not Found"
//! goHome = "Go home"
//!
//! [language]
//! ko = "한국어"
//! en = "English"
//! ```
//!
//! becomes `404.title`, `404.goHome`, `language.ko`, `language.en`.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::ConfigError;
use crate::core::LanguageSet;
use crate::metadata::{DocumentFormat, Metadata};

/// Flattened `key -> message` pairs of one language.
pub type Catalog = BTreeMap<String, String>;

/// Catalogs of every declared language.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Messages {
    catalogs: BTreeMap<String, Catalog>,
}

impl Messages {
    /// Load `<dir>/<lang>.toml` (falling back to `.json`) for every language.
    ///
    /// A declared language without a catalog is a configuration error.
    pub fn load(dir: &Path, languages: &LanguageSet) -> Result<Self, ConfigError> {
        let mut catalogs = BTreeMap::new();
        for lang in languages.languages() {
            let path = catalog_path(dir, lang).ok_or_else(|| ConfigError::MissingDocument {
                lang: lang.clone(),
                location: dir.join(format!("{lang}.toml")).display().to_string(),
            })?;
            let content =
                fs::read_to_string(&path).map_err(|e| ConfigError::Io(path.clone(), e))?;
            let table = DocumentFormat::from_path(&path).parse(&content, &path.display().to_string())?;
            catalogs.insert(lang.clone(), flatten(&table));
        }
        crate::debug!("messages"; "loaded {} catalogs from {}", catalogs.len(), dir.display());
        Ok(Self { catalogs })
    }

    /// Look up a flattened key.
    pub fn get(&self, lang: &str, key: &str) -> Option<&str> {
        self.catalogs.get(lang)?.get(key).map(String::as_str)
    }

    /// Keys present in some catalog but missing from `lang`'s.
    pub fn missing_keys(&self, lang: &str) -> Vec<&str> {
        let Some(own) = self.catalogs.get(lang) else {
            return Vec::new();
        };
        let mut missing: Vec<&str> = self
            .catalogs
            .values()
            .flat_map(|c| c.keys())
            .filter(|k| !own.contains_key(*k))
            .map(String::as_str)
            .collect();
        missing.sort_unstable();
        missing.dedup();
        missing
    }
}

fn catalog_path(dir: &Path, lang: &str) -> Option<PathBuf> {
    ["toml", "json"]
        .iter()
        .map(|ext| dir.join(format!("{lang}.{ext}")))
        .find(|p| p.is_file())
}

/// Flatten nested tables into dot-separated keys.
///
/// Arrays are flattened by index (`menu.0`), scalars are stringified,
/// `null` leaves are dropped.
pub fn flatten(table: &Metadata) -> Catalog {
    let mut out = Catalog::new();
    for (key, value) in table {
        flatten_into(key, value, &mut out);
    }
    out
}

fn flatten_into(prefix: &str, value: &Value, out: &mut Catalog) {
    match value {
        Value::Object(table) => {
            for (key, value) in table {
                flatten_into(&format!("{prefix}.{key}"), value, out);
            }
        }
        Value::Array(items) => {
            for (i, value) in items.iter().enumerate() {
                flatten_into(&format!("{prefix}.{i}"), value, out);
            }
        }
        Value::String(s) => {
            out.insert(prefix.to_owned(), s.clone());
        }
        Value::Null => {}
        other => {
            out.insert(prefix.to_owned(), other.to_string());
        }
    }
}
