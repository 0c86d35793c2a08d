//! Locale metadata: a base document plus per-language overrides.
//!
//! ```text
//! metadata.toml       ─┐
//!                      ├─ deep merge ─> metadata for `en`
//! metadata.en.toml    ─┘
//! ```
//!
//! | Module   | Purpose                                           |
//! |----------|---------------------------------------------------|
//! | `merge`  | Recursive table merge (override wins)             |
//! | `store`  | Where documents come from (filesystem, memory)    |
//! | `loader` | Per-language cache over a store                   |

mod loader;
pub mod merge;
mod store;

pub use loader::MetadataLoader;
pub use store::{DocumentFormat, DocumentStore, FsDocumentStore, MemoryDocumentStore};

/// A metadata document: string keys to arbitrary nested values.
pub type Metadata = serde_json::Map<String, serde_json::Value>;
