//! Lookup commands: `resolve`, `url` and `not-found`.
//!
//! Results go to stdout; progress and warnings go through the logger.

use anyhow::{Result, bail};
use owo_colors::{OwoColorize, Stream};

use super::build::build_site;
use crate::config::SiteConfig;
use crate::core::{LanguageResolver, UrlPath};
use crate::page::{MenuEntry, Suggestion, language_menu, suggest_for};

/// Print the language, base slug and language menu of a path.
pub fn run_resolve(config: &SiteConfig, path: &str) -> Result<()> {
    let languages = config.languages()?;
    let resolver = LanguageResolver::new(&languages);
    let url = UrlPath::from_browser(path);
    let info = resolver.resolve_url(&url);

    println!("{} {}", label("language:"), info.language_key);
    println!("{} {}", label("base slug:"), info.base_slug);
    print_menu(&language_menu(&languages, &resolver, url.as_str()));
    Ok(())
}

/// Print `path` localized into `lang`.
pub fn run_url(config: &SiteConfig, path: &str, lang: &str) -> Result<()> {
    let languages = config.languages()?;
    if !languages.contains(lang) {
        bail!(
            "language `{}` is not declared (expected one of: {})",
            lang,
            languages.languages().join(", ")
        );
    }
    let resolver = LanguageResolver::new(&languages);
    println!("{}", resolver.localize(path, lang));
    Ok(())
}

/// Build the site and print translations of a missing path.
pub fn run_not_found(config: &SiteConfig, path: &str) -> Result<()> {
    let languages = config.languages()?;
    let resolver = LanguageResolver::new(&languages);
    let output = build_site(config)?;
    let (info, found) = suggest_for(&resolver, path, &output.pages);

    println!("{} {} ({})", label("missing:"), info.base_slug, info.language_key);
    print_suggestions(&found);
    Ok(())
}

fn label(text: &str) -> String {
    text.if_supports_color(Stream::Stdout, |t| t.bold()).to_string()
}

fn print_menu(menu: &[MenuEntry]) {
    for entry in menu {
        let marker = if entry.selected { "*" } else { " " };
        println!("{} {:<6} {}", marker, entry.language_key, entry.url);
    }
}

fn print_suggestions(found: &[Suggestion]) {
    if found.is_empty() {
        println!(
            "{}",
            "no translations available".if_supports_color(Stream::Stdout, |t| t.dimmed())
        );
        return;
    }
    for suggestion in found {
        let key = format!("{:<6}", suggestion.language_key);
        println!(
            "  {} {}",
            key.if_supports_color(Stream::Stdout, |k| k.green()),
            suggestion.path
        );
    }
}
