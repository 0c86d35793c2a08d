//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Language routing and locale metadata for multilingual static sites
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: tola.toml, searched upward from cwd)
    #[arg(short = 'C', long, global = true, default_value = "tola.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Print debug output (cache hits, per-page enrichment)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Build page descriptors for every content item and declared page
    #[command(visible_alias = "b")]
    Build {
        /// Output directory path (relative to project root)
        #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
        output: Option<PathBuf>,

        /// Fail on pages whose declared language disagrees with their URL
        #[arg(short, long)]
        strict: bool,

        /// Print the manifest to stdout instead of writing files
        #[arg(long)]
        stdout: bool,
    },

    /// Show the language, base slug and language menu of a URL path
    #[command(visible_alias = "r")]
    Resolve {
        /// URL path, e.g. /en/about/
        path: String,
    },

    /// Build the URL of a path in another language
    #[command(visible_alias = "u")]
    Url {
        /// Language-neutral path, e.g. /about/
        path: String,

        /// Target language key
        #[arg(short, long)]
        lang: String,
    },

    /// List existing translations for a URL that has no page
    #[command(name = "not-found", visible_alias = "nf")]
    NotFound {
        /// Requested URL (percent-encoded browser paths are accepted)
        path: String,
    },
}

impl Cli {
    /// Command-line override for `build.output`.
    pub fn output(&self) -> Option<&PathBuf> {
        match &self.command {
            Commands::Build { output, .. } => output.as_ref(),
            _ => None,
        }
    }

    /// Whether `--strict` was given.
    pub fn is_strict(&self) -> bool {
        matches!(self.command, Commands::Build { strict: true, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_build() {
        let cli = Cli::try_parse_from(["tola-i18n", "build", "-o", "dist", "--strict"]).unwrap();
        assert_eq!(cli.output(), Some(&PathBuf::from("dist")));
        assert!(cli.is_strict());
        assert_eq!(cli.config, PathBuf::from("tola.toml"));
    }

    #[test]
    fn test_parse_url() {
        let cli = Cli::try_parse_from(["tola-i18n", "-v", "url", "/about/", "--lang", "en"]).unwrap();
        assert!(cli.verbose);
        match &cli.command {
            Commands::Url { path, lang } => {
                assert_eq!(path, "/about/");
                assert_eq!(lang, "en");
            }
            other => panic!("unexpected command {other:?}"),
        }
        assert!(cli.output().is_none());
        assert!(!cli.is_strict());
    }

    #[test]
    fn test_parse_not_found_alias() {
        let cli = Cli::try_parse_from(["tola-i18n", "nf", "/fr/"]).unwrap();
        assert!(matches!(cli.command, Commands::NotFound { ref path } if path == "/fr/"));
    }
}
