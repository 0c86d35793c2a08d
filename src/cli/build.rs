//! Build command: content + declared pages -> `pages.json`.

use anyhow::{Context, Result, bail};
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::config::SiteConfig;
use crate::core::LanguageSet;
use crate::logger::plural;
use crate::messages::Messages;
use crate::metadata::{FsDocumentStore, MetadataLoader};
use crate::page::{BuildOutput, PageBuilder, PageDescriptor, discover};
use crate::log;

/// File names inside the output directory.
const PAGES_FILE: &str = "pages.json";
const MESSAGES_FILE: &str = "messages.json";

/// What the renderer receives.
#[derive(Debug, Serialize)]
pub struct Manifest<'a> {
    pub languages: &'a LanguageSet,
    pub pages: &'a [PageDescriptor],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub messages: Option<&'a Messages>,
}

/// Discover content and build every page descriptor.
///
/// Configuration errors abort before any page is returned. Language
/// mismatches are returned in the output, or fail the build in strict mode.
pub fn build_site(config: &SiteConfig) -> Result<BuildOutput> {
    let languages = config.languages()?;
    let loader = MetadataLoader::for_languages(
        FsDocumentStore::new(&config.build.metadata),
        &languages,
    );

    let items = discover(&config.build.content, &languages).with_context(|| {
        format!(
            "failed to read content in `{}`",
            config.root_relative(&config.build.content).display()
        )
    })?;

    // Every declared language needs its metadata, with or without pages
    loader.preload(&languages)?;

    let builder = PageBuilder::new(&languages, &loader);
    let output = builder.build(&items, &config.pages)?;

    log!("build"; "{} ({} from content, {} declared) in {}",
        plural(output.pages.len(), "page"),
        items.len(),
        config.pages.len(),
        plural(loader.cached(), "language"));

    if !output.inconsistencies.is_empty() {
        let summary = format!(
            "{} with a declared language that disagrees with its URL",
            plural(output.inconsistencies.len(), "page")
        );
        if config.build.strict {
            bail!("{summary}");
        }
        log!("warning"; "{}", summary);
    }

    Ok(output)
}

/// Run the build command.
pub fn run_build(config: &SiteConfig, to_stdout: bool) -> Result<()> {
    let languages = config.languages()?;
    let output = build_site(config)?;
    let messages = config
        .build
        .messages
        .as_deref()
        .map(|dir| Messages::load(dir, &languages))
        .transpose()?;

    if let Some(messages) = &messages {
        for lang in languages.languages() {
            let missing = messages.missing_keys(lang);
            if !missing.is_empty() {
                log!("messages"; "`{}` lacks {}: {}", lang, plural(missing.len(), "key"), missing.join(", "));
            }
        }
    }

    if to_stdout {
        let manifest = Manifest {
            languages: &languages,
            pages: &output.pages,
            messages: messages.as_ref(),
        };
        println!("{}", serde_json::to_string_pretty(&manifest)?);
        return Ok(());
    }

    let out_dir = &config.build.output;
    fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create `{}`", out_dir.display()))?;

    let manifest = Manifest {
        languages: &languages,
        pages: &output.pages,
        messages: None,
    };
    write_json(&out_dir.join(PAGES_FILE), &manifest)?;
    if let Some(messages) = &messages {
        write_json(&out_dir.join(MESSAGES_FILE), messages)?;
    }

    log!("build"; "wrote {}", config.root_relative(out_dir.join(PAGES_FILE)).display());
    Ok(())
}

fn write_json(path: &Path, value: &impl Serialize) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).with_context(|| format!("failed to write `{}`", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;
    use serde_json::Value;
    use tempfile::TempDir;

    fn site(dir: &Path, strict: bool) -> SiteConfig {
        fs::create_dir_all(dir.join("content/posts")).unwrap();
        fs::create_dir_all(dir.join("messages")).unwrap();
        fs::write(
            dir.join("tola.toml"),
            format!(
                r#"
[i18n]
default = "ko"
languages = ["ko", "en"]

[build]
messages = "messages"
strict = {strict}

[[pages]]
path = "/about/"

[[pages]]
path = "/en/about/"
lang = "en"
"#
            ),
        )
        .unwrap();
        fs::write(dir.join("metadata.toml"), "[site]\nname = \"블로그\"\n").unwrap();
        fs::write(dir.join("metadata.en.toml"), "[site]\nname = \"Blog\"\n").unwrap();
        fs::write(dir.join("messages/ko.toml"), "[404]\ntitle = \"없음\"\n").unwrap();
        fs::write(dir.join("messages/en.toml"), "[404]\ntitle = \"Not Found\"\n").unwrap();
        fs::write(dir.join("content/posts/hello.md"), "---\ntitle: 안녕\n---\n").unwrap();
        fs::write(dir.join("content/posts/hello.en.md"), "---\ntitle: Hello\n---\n").unwrap();

        SiteConfig::open(&dir.join("tola.toml")).unwrap()
    }

    #[test]
    fn test_build_site() {
        let dir = TempDir::new().unwrap();
        let config = site(dir.path(), false);

        let output = build_site(&config).unwrap();
        let paths: Vec<_> = output.pages.iter().map(|p| p.path().as_str()).collect();
        assert_eq!(paths, ["/en/posts/hello/", "/posts/hello/", "/about/", "/en/about/"]);
        assert!(output.inconsistencies.is_empty());
        assert_eq!(output.pages[0].metadata["site"]["name"], "Blog");
        assert_eq!(output.pages[1].metadata["site"]["name"], "블로그");
    }

    #[test]
    fn test_run_build_writes_manifest() {
        let dir = TempDir::new().unwrap();
        let config = site(dir.path(), false);
        run_build(&config, false).unwrap();

        let pages: Value =
            serde_json::from_str(&fs::read_to_string(dir.path().join("public/pages.json")).unwrap())
                .unwrap();
        assert_eq!(pages["languages"]["default"], "ko");
        assert_eq!(pages["pages"].as_array().unwrap().len(), 4);
        assert_eq!(pages["pages"][0]["title"], "Hello");
        assert_eq!(pages["pages"][0]["baseSlug"], "/posts/hello/");
        assert!(pages.get("messages").is_none());

        let messages: Value = serde_json::from_str(
            &fs::read_to_string(dir.path().join("public/messages.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(messages["en"]["404.title"], "Not Found");
    }

    #[test]
    fn test_strict_build_fails_on_mismatch() {
        let dir = TempDir::new().unwrap();
        let config = site(dir.path(), true);
        fs::create_dir_all(dir.path().join("content/en")).unwrap();
        fs::write(dir.path().join("content/en/stray.md"), "").unwrap();

        assert!(build_site(&config).is_err());

        let lenient = site(dir.path(), false);
        let output = build_site(&lenient).unwrap();
        assert_eq!(output.inconsistencies.len(), 1);
        assert_eq!(output.inconsistencies[0].path, "/en/stray/");
    }

    #[test]
    fn test_missing_override_aborts_build() {
        let dir = TempDir::new().unwrap();
        let config = site(dir.path(), false);
        fs::remove_file(dir.path().join("metadata.en.toml")).unwrap();

        let err = build_site(&config).unwrap_err();
        assert!(err.to_string().contains("`en`"));
    }

    #[test]
    fn test_language_without_pages_still_needs_override() {
        let dir = TempDir::new().unwrap();
        let mut config = site(dir.path(), false);
        config.i18n.languages.push("ja".into());

        let err = build_site(&config).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::MissingDocument { lang, .. }) if lang == "ja"
        ));
    }
}
