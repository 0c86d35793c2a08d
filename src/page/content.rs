//! Content discovery: Markdown files to content items.
//!
//! # Slugs
//!
//! ```text
//! content/hello.md              ->  /hello/
//! content/posts/rust/index.md   ->  /posts/rust/
//! content/hello.en.md           ->  /en/hello/      (lang = en)
//! content/en/hello.md           ->  /en/hello/      (lang from frontmatter or default)
//! ```
//!
//! A language suffix in the file stem only counts when it names a declared
//! language (`v1.2.md` is not a language). Frontmatter `lang` is used when
//! the file name carries none.

use jwalk::WalkDir;
use std::fs;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

use super::{JsonMap, frontmatter};
use crate::core::{LanguageSet, UrlPath, localized_url};

/// Frontmatter key holding the declared language.
const LANG_KEY: &str = "lang";

const CONTENT_EXTENSIONS: &[&str] = &["md", "markdown"];

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("`{path}`: {message}")]
    Frontmatter { path: PathBuf, message: String },

    #[error("`{path}` declares undeclared language `{lang}`")]
    UnknownLanguage { path: PathBuf, lang: String },
}

/// A parsed content file, as seen by the page builder.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentItem {
    /// Source file.
    pub source: PathBuf,
    /// File-path derived slug.
    pub slug: UrlPath,
    /// Declared language; the default language when absent.
    pub language_key: Option<String>,
    /// Frontmatter fields (except `lang`), passed through to the page context.
    pub fields: JsonMap,
}

impl ContentItem {
    /// Item with only a slug and optional language (no source file).
    pub fn new(slug: impl Into<UrlPath>, language_key: Option<&str>) -> Self {
        Self {
            source: PathBuf::new(),
            slug: slug.into(),
            language_key: language_key.map(str::to_owned),
            fields: JsonMap::new(),
        }
    }
}

/// Collect content items under `dir`, sorted by source path.
///
/// A missing directory yields no items.
pub fn discover(dir: &Path, languages: &LanguageSet) -> Result<Vec<ContentItem>, ContentError> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path())
        .filter(|p| is_content_file(p))
        .collect();
    files.sort();

    files
        .iter()
        .map(|path| load_item(dir, path, languages))
        .collect()
}

fn is_content_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| CONTENT_EXTENSIONS.contains(&ext))
}

/// Read one content file.
pub fn load_item(
    content_dir: &Path,
    path: &Path,
    languages: &LanguageSet,
) -> Result<ContentItem, ContentError> {
    let source = fs::read_to_string(path).map_err(|e| ContentError::Io(path.to_path_buf(), e))?;
    let mut fields = match frontmatter::extract(&source) {
        Ok(Some((fields, _body))) => fields,
        Ok(None) => JsonMap::new(),
        Err(message) => {
            return Err(ContentError::Frontmatter {
                path: path.to_path_buf(),
                message,
            });
        }
    };

    let relative = path.strip_prefix(content_dir).unwrap_or(path);
    let (slug, suffix) = file_slug(relative, languages);

    let frontmatter_lang = match fields.remove(LANG_KEY) {
        None => None,
        Some(serde_json::Value::String(lang)) => Some(lang),
        Some(other) => {
            return Err(ContentError::Frontmatter {
                path: path.to_path_buf(),
                message: format!("`{LANG_KEY}` must be a string, found `{other}`"),
            });
        }
    };

    let declared = match (suffix, frontmatter_lang) {
        (Some(suffix), Some(lang)) if suffix != lang => {
            return Err(ContentError::Frontmatter {
                path: path.to_path_buf(),
                message: format!(
                    "file name declares `{suffix}` but `{LANG_KEY}` is `{lang}`"
                ),
            });
        }
        (Some(lang), _) | (None, Some(lang)) => Some(lang),
        (None, None) => None,
    };

    if let Some(lang) = &declared
        && !languages.contains(lang)
    {
        return Err(ContentError::UnknownLanguage {
            path: path.to_path_buf(),
            lang: lang.clone(),
        });
    }

    Ok(ContentItem {
        source: path.to_path_buf(),
        slug: localize_slug(slug, declared.as_deref(), languages),
        language_key: declared,
        fields,
    })
}

/// Slug of a content-relative file path, plus its language suffix.
///
/// The extension is dropped, a trailing `index` collapses into its
/// directory, and a stem suffix naming a declared language is split off.
pub fn file_slug(relative: &Path, languages: &LanguageSet) -> (UrlPath, Option<String>) {
    let mut segments: Vec<String> = relative
        .parent()
        .into_iter()
        .flat_map(Path::components)
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    let stem = relative
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let (stem, lang) = match stem.rsplit_once('.') {
        Some((name, lang)) if languages.contains(lang) => (name.to_owned(), Some(lang.to_owned())),
        _ => (stem, None),
    };

    if stem != "index" && !stem.is_empty() {
        segments.push(stem);
    }

    let path = if segments.is_empty() {
        "/".to_owned()
    } else {
        format!("/{}/", segments.join("/"))
    };
    (UrlPath::from_page(&path), lang)
}

/// Give non-default content its language prefix unless the path already has it.
fn localize_slug(slug: UrlPath, declared: Option<&str>, languages: &LanguageSet) -> UrlPath {
    match declared {
        Some(lang) if !languages.is_default(lang) && !slug.starts_with(&format!("/{lang}/")) => {
            localized_url(&slug, lang, languages.default_key())
        }
        _ => slug,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn ko_en() -> LanguageSet {
        LanguageSet::new("ko", ["ko", "en"]).unwrap()
    }

    #[test]
    fn test_file_slug() {
        let langs = ko_en();
        let slug = |p: &str| file_slug(Path::new(p), &langs);

        assert_eq!(slug("hello.md"), (UrlPath::from_page("/hello/"), None));
        assert_eq!(slug("posts/rust/index.md"), (UrlPath::from_page("/posts/rust/"), None));
        assert_eq!(slug("index.md"), (UrlPath::from_page("/"), None));
        assert_eq!(
            slug("hello.en.md"),
            (UrlPath::from_page("/hello/"), Some("en".to_owned()))
        );
        assert_eq!(
            slug("posts/index.ko.md"),
            (UrlPath::from_page("/posts/"), Some("ko".to_owned()))
        );
        // Not a declared language
        assert_eq!(slug("v1.2.md"), (UrlPath::from_page("/v1.2/"), None));
    }

    #[test]
    fn test_discover() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("posts/rust")).unwrap();
        fs::write(root.join("posts/rust/index.md"), "---\ntitle: 러스트\n---\n").unwrap();
        fs::write(root.join("posts/rust/index.en.md"), "---\ntitle: Rust\n---\n").unwrap();
        fs::write(root.join("about.md"), "+++\nlang = \"en\"\n+++\n").unwrap();
        fs::write(root.join("notes.txt"), "ignored").unwrap();

        let items = discover(root, &ko_en()).unwrap();
        assert_eq!(items.len(), 3);

        assert_eq!(items[0].slug, "/en/about/");
        assert_eq!(items[0].language_key.as_deref(), Some("en"));
        assert!(items[0].fields.is_empty());

        assert_eq!(items[1].slug, "/en/posts/rust/");
        assert_eq!(items[1].fields["title"], "Rust");

        assert_eq!(items[2].slug, "/posts/rust/");
        assert_eq!(items[2].language_key, None);
        assert_eq!(items[2].fields["title"], "러스트");
    }

    #[test]
    fn test_existing_prefix_is_kept() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("en")).unwrap();
        fs::write(dir.path().join("en/hello.en.md"), "").unwrap();

        let items = discover(dir.path(), &ko_en()).unwrap();
        assert_eq!(items[0].slug, "/en/hello/");
    }

    #[test]
    fn test_unknown_language() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("hello.md"), "---\nlang: fr\n---\n").unwrap();
        assert!(matches!(
            discover(dir.path(), &ko_en()),
            Err(ContentError::UnknownLanguage { ref lang, .. }) if lang == "fr"
        ));
    }

    #[test]
    fn test_non_string_lang_is_rejected() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("hello.md"), "+++\nlang = 1\n+++\n").unwrap();
        assert!(matches!(
            discover(dir.path(), &ko_en()),
            Err(ContentError::Frontmatter { ref message, .. }) if message.contains("must be a string")
        ));
    }

    #[test]
    fn test_suffix_and_frontmatter_must_agree() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("hello.en.md"), "---\nlang: ko\n---\n").unwrap();
        assert!(matches!(
            discover(dir.path(), &ko_en()),
            Err(ContentError::Frontmatter { ref message, .. }) if message.contains("`en`")
        ));

        // Agreeing declarations are fine
        fs::write(dir.path().join("hello.en.md"), "---\nlang: en\n---\n").unwrap();
        let items = discover(dir.path(), &ko_en()).unwrap();
        assert_eq!(items[0].language_key.as_deref(), Some("en"));
        assert!(!items[0].fields.contains_key("lang"));
    }

    #[test]
    fn test_missing_dir() {
        let dir = TempDir::new().unwrap();
        assert!(discover(&dir.path().join("content"), &ko_en()).unwrap().is_empty());
    }
}
