//! tola-i18n - language routing for multilingual static sites.

use anyhow::Result;
use clap::{ColorChoice, Parser};
use tola_i18n::cli::{Cli, Commands, build, query};
use tola_i18n::config::SiteConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = SiteConfig::load(&cli)?;

    match &cli.command {
        Commands::Build { stdout, .. } => build::run_build(&config, *stdout),
        Commands::Resolve { path } => query::run_resolve(&config, path),
        Commands::Url { path, lang } => query::run_url(&config, path, lang),
        Commands::NotFound { path } => query::run_not_found(&config, path),
    }
}
