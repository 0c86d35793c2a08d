//! Per-language metadata with a populate-once cache.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::sync::Arc;

use super::{DocumentStore, Metadata, merge};
use crate::config::ConfigError;
use crate::core::LanguageSet;
use crate::debug;

/// Loads the base document for the default language and merges override
/// documents on top of it for every other language.
///
/// Each language is loaded at most once per loader; entries move from
/// absent to cached and are never evicted. Two threads racing on the same
/// missing key both compute an equal value and the first insert wins.
pub struct MetadataLoader<S> {
    store: S,
    default_key: String,
    cache: RwLock<FxHashMap<String, Arc<Metadata>>>,
}

impl<S: DocumentStore> MetadataLoader<S> {
    pub fn new(store: S, default_key: impl Into<String>) -> Self {
        Self {
            store,
            default_key: default_key.into(),
            cache: RwLock::new(FxHashMap::default()),
        }
    }

    /// Loader for the default language of `languages`.
    pub fn for_languages(store: S, languages: &LanguageSet) -> Self {
        Self::new(store, languages.default_key())
    }

    #[inline]
    pub fn default_key(&self) -> &str {
        &self.default_key
    }

    /// Metadata for `lang`.
    ///
    /// A missing or malformed document is a fatal [`ConfigError`].
    pub fn get(&self, lang: &str) -> Result<Arc<Metadata>, ConfigError> {
        let cached = self.cache.read().get(lang).cloned();
        if let Some(hit) = cached {
            debug!("metadata"; "cache hit for `{}`", lang);
            return Ok(hit);
        }

        let loaded = if lang == self.default_key {
            self.load_base()?
        } else {
            self.load_override(lang)?
        };

        let mut cache = self.cache.write();
        let entry = cache
            .entry(lang.to_owned())
            .or_insert_with(|| Arc::new(loaded));
        Ok(Arc::clone(entry))
    }

    /// Load every declared language up front.
    ///
    /// Surfaces configuration errors before any page is built.
    pub fn preload(&self, languages: &LanguageSet) -> Result<(), ConfigError> {
        for lang in languages.languages() {
            self.get(lang)?;
        }
        Ok(())
    }

    /// Number of cached languages.
    pub fn cached(&self) -> usize {
        self.cache.read().len()
    }

    fn load_base(&self) -> Result<Metadata, ConfigError> {
        debug!("metadata"; "loading base document {}", self.store.location(None));
        self.store
            .read(None)?
            .ok_or_else(|| ConfigError::MissingDocument {
                lang: self.default_key.clone(),
                location: self.store.location(None),
            })
    }

    fn load_override(&self, lang: &str) -> Result<Metadata, ConfigError> {
        let base = self.get(&self.default_key)?;

        let location = self.store.location(Some(lang));
        debug!("metadata"; "merging {} over base for `{}`", location, lang);
        let overlay = self
            .store
            .read(Some(lang))?
            .ok_or_else(|| ConfigError::MissingDocument {
                lang: lang.to_owned(),
                location,
            })?;

        Ok(merge::merged(&base, overlay))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{FsDocumentStore, MemoryDocumentStore};
    use parking_lot::Mutex;
    use serde_json::{Value, json};
    use std::fs;
    use tempfile::TempDir;

    fn table(value: Value) -> Metadata {
        match value {
            Value::Object(map) => map,
            other => panic!("not a table: {other}"),
        }
    }

    /// Counts reads per document key.
    struct CountingStore {
        inner: MemoryDocumentStore,
        reads: Mutex<FxHashMap<Option<String>, usize>>,
    }

    impl CountingStore {
        fn new(inner: MemoryDocumentStore) -> Self {
            Self {
                inner,
                reads: Mutex::new(FxHashMap::default()),
            }
        }

        fn reads(&self, lang: Option<&str>) -> usize {
            self.reads
                .lock()
                .get(&lang.map(str::to_owned))
                .copied()
                .unwrap_or(0)
        }
    }

    impl DocumentStore for CountingStore {
        fn location(&self, lang: Option<&str>) -> String {
            self.inner.location(lang)
        }

        fn read(&self, lang: Option<&str>) -> Result<Option<Metadata>, ConfigError> {
            *self.reads.lock().entry(lang.map(str::to_owned)).or_default() += 1;
            self.inner.read(lang)
        }
    }

    fn site_store() -> MemoryDocumentStore {
        MemoryDocumentStore::new(table(json!({
            "site": {"name": "블로그", "url": "https://example.com"},
            "author": {"name": "김", "links": ["a", "b"]},
        })))
        .with_override(
            "en",
            table(json!({
                "site": {"name": "Blog"},
                "author": {"name": "Kim", "links": ["c"]},
            })),
        )
    }

    #[test]
    fn test_default_language_is_base_document() {
        let loader = MetadataLoader::new(site_store(), "ko");
        let ko = loader.get("ko").unwrap();
        assert_eq!(ko["site"]["name"], "블로그");
    }

    #[test]
    fn test_override_merges_over_base() {
        let loader = MetadataLoader::new(site_store(), "ko");
        let en = loader.get("en").unwrap();
        assert_eq!(
            Value::Object((*en).clone()),
            json!({
                "site": {"name": "Blog", "url": "https://example.com"},
                "author": {"name": "Kim", "links": ["c"]},
            })
        );

        // Base stays untouched by the merge
        let ko = loader.get("ko").unwrap();
        assert_eq!(ko["author"]["links"], json!(["a", "b"]));
    }

    #[test]
    fn test_cache_reads_each_document_once() {
        let loader = MetadataLoader::new(CountingStore::new(site_store()), "ko");

        let first = loader.get("ko").unwrap();
        let second = loader.get("ko").unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        for _ in 0..5 {
            loader.get("en").unwrap();
        }
        assert_eq!(loader.store.reads(None), 1);
        assert_eq!(loader.store.reads(Some("en")), 1);
        assert_eq!(loader.cached(), 2);
    }

    #[test]
    fn test_override_first_loads_base_once() {
        let loader = MetadataLoader::new(CountingStore::new(site_store()), "ko");
        loader.get("en").unwrap();
        loader.get("ko").unwrap();
        assert_eq!(loader.store.reads(None), 1);
    }

    #[test]
    fn test_missing_override_is_fatal() {
        let loader = MetadataLoader::new(site_store(), "ko");
        let err = loader.get("ja").unwrap_err();
        assert!(matches!(err, ConfigError::MissingDocument { ref lang, .. } if lang == "ja"));
        // Failed loads are not cached
        assert_eq!(loader.cached(), 1);
    }

    #[test]
    fn test_missing_base_is_fatal() {
        let loader = MetadataLoader::new(MemoryDocumentStore::default(), "ko");
        assert!(matches!(
            loader.get("en"),
            Err(ConfigError::MissingDocument { ref lang, .. }) if lang == "ko"
        ));
    }

    #[test]
    fn test_preload_reports_missing_language() {
        let languages = LanguageSet::new("ko", ["ko", "en", "ja"]).unwrap();
        let loader = MetadataLoader::for_languages(site_store(), &languages);
        assert!(loader.preload(&languages).is_err());

        let languages = LanguageSet::new("ko", ["ko", "en"]).unwrap();
        let loader = MetadataLoader::for_languages(site_store(), &languages);
        loader.preload(&languages).unwrap();
        assert_eq!(loader.cached(), 2);
    }

    #[test]
    fn test_fs_documents() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("metadata.toml"),
            "[site]\nname = \"블로그\"\n[author]\nname = \"김\"\n",
        )
        .unwrap();
        fs::write(dir.path().join("metadata.en.toml"), "[site]\nname = \"Blog\"\n").unwrap();

        let loader = MetadataLoader::new(FsDocumentStore::new(dir.path().join("metadata.toml")), "ko");
        let en = loader.get("en").unwrap();
        assert_eq!(en["site"]["name"], "Blog");
        assert_eq!(en["author"]["name"], "김");
    }

    #[test]
    fn test_concurrent_first_access() {
        let loader = Arc::new(MetadataLoader::new(site_store(), "ko"));
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let loader = Arc::clone(&loader);
                let lang = if i % 2 == 0 { "ko" } else { "en" };
                std::thread::spawn(move || (lang, loader.get(lang).unwrap()))
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(loader.cached(), 2);
        for (lang, metadata) in &results {
            assert_eq!(**metadata, *loader.get(lang).unwrap());
        }
    }
}
