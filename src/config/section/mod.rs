//! Configuration section definitions.
//!
//! Each module corresponds to a section in `tola.toml`:
//!
//! | Module  | TOML Section | Purpose                                  |
//! |---------|--------------|------------------------------------------|
//! | `build` | `[build]`    | Content, metadata, messages, output      |
//! | `i18n`  | `[i18n]`     | Default language and declared languages  |
//! | `pages` | `[[pages]]`  | Statically declared pages                |

mod build;
mod i18n;
mod pages;

pub use build::BuildSectionConfig;
pub use i18n::I18nConfig;
pub use pages::StaticPageConfig;
