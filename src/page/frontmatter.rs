//! Frontmatter of Markdown content files.
//!
//! Only the fields are needed here (the declared language and whatever
//! the renderer wants passed through), so the body is returned untouched.

use serde_json::Value;

use super::JsonMap;

/// Split `content` into frontmatter fields and body.
///
/// `Ok(None)` when the file has no frontmatter block. TOML (`+++`) is
/// parsed strictly; YAML-like (`---`) blocks are read as `key: value` lines.
pub fn extract(content: &str) -> Result<Option<(JsonMap, &str)>, String> {
    match detect(content) {
        Some((fm, body, true)) => parse_toml(fm).map(|fields| Some((fields, body))),
        Some((fm, body, false)) => Ok(Some((parse_yaml_like(fm), body))),
        None => Ok(None),
    }
}

/// Detect and extract frontmatter.
/// Returns `(frontmatter, body, is_toml)` if found.
fn detect(content: &str) -> Option<(&str, &str, bool)> {
    let trimmed = content.trim_start();

    for (fence, is_toml) in [("---", false), ("+++", true)] {
        if trimmed.starts_with(fence)
            && let Some(end) = trimmed[3..].find(&format!("\n{fence}"))
        {
            let fm = trimmed[3..3 + end].trim();
            let body = trimmed[3 + end + 4..].trim_start_matches('\n');
            return Some((fm, body, is_toml));
        }
    }

    None
}

fn parse_toml(content: &str) -> Result<JsonMap, String> {
    match toml::from_str::<Value>(content) {
        Ok(Value::Object(fields)) => Ok(fields),
        Ok(_) => Err("frontmatter is not a table".to_owned()),
        Err(e) => Err(format!("invalid TOML frontmatter: {}", e.message())),
    }
}

/// Parse simple YAML-like frontmatter (`key: value` per line).
fn parse_yaml_like(content: &str) -> JsonMap {
    let mut fields = JsonMap::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some((key, value)) = line.split_once(':') {
            let key = key.trim();
            if !key.is_empty() {
                fields.insert(key.to_owned(), parse_yaml_value(value.trim()));
            }
        }
    }

    fields
}

/// Parse a YAML-like value string to JSON value
///
/// Supports:
/// - Booleans: `true`, `false`
/// - Null: `null`, `~`
/// - Numbers: `123`, `3.14`
/// - Quoted strings: `"a: b"`, `'a'`
/// - Strings: everything else
fn parse_yaml_value(s: &str) -> Value {
    if s.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if s.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }
    if s.eq_ignore_ascii_case("null") || s == "~" {
        return Value::Null;
    }
    if let Ok(n) = s.parse::<i64>() {
        return Value::Number(n.into());
    }
    if let Ok(n) = s.parse::<f64>()
        && let Some(num) = serde_json::Number::from_f64(n)
    {
        return Value::Number(num);
    }

    let unquoted = s
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .or_else(|| s.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')))
        .unwrap_or(s);
    Value::String(unquoted.to_owned())
}
