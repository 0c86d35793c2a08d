//! Deep merge of metadata documents.

use serde_json::Value;

use super::Metadata;

/// Merge `overlay` into `base` in place.
///
/// For each key of `overlay`: when both sides hold a table the two are
/// merged recursively, otherwise the overlay value replaces the base value
/// wholesale. Arrays are replaced, never concatenated.
pub fn deep_merge(base: &mut Metadata, overlay: Metadata) {
    for (key, value) in overlay {
        match value {
            Value::Object(table) => match base.get_mut(&key) {
                Some(Value::Object(existing)) => deep_merge(existing, table),
                _ => {
                    base.insert(key, Value::Object(table));
                }
            },
            other => {
                base.insert(key, other);
            }
        }
    }
}

/// Merge `overlay` onto a copy of `base`, leaving `base` untouched.
pub fn merged(base: &Metadata, overlay: Metadata) -> Metadata {
    let mut out = base.clone();
    deep_merge(&mut out, overlay);
    out
}
