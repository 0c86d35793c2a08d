//! Language routing and locale metadata for multilingual static sites.
//!
//! Every page URL is resolved to a language key and a language-neutral base
//! slug. Locale metadata is the base document deep-merged with a
//! per-language override, loaded once per language and shared by all pages.

pub mod cli;
pub mod config;
pub mod core;
pub mod logger;
pub mod messages;
pub mod metadata;
pub mod page;
