//! Small YAML helpers for reading scalar values and rendering them back
//! as single-line frontmatter entries.

use std::sync::LazyLock;

use regex::Regex;
use serde_yaml::Value;

/// A top-level `key:` at column zero, plain or quoted.
static TOP_LEVEL_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^(?:"([^"]*)"|'([^']*)'|([^\s#'"\-\[\]{}:,&*!|>%@`?][^:#]*?))\s*:(?:\s|$)"#)
        .expect("top-level key regex is valid")
});

/// Scalars that YAML would not read back as a plain string.
static RESERVED_PLAIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:true|false|yes|no|on|off|null|~|y|n|[-+]?(?:\d[\d_]*)?\.?\d+(?:e[-+]?\d+)?|0x[0-9a-f]+|0o[0-7]+|[-+]?\.inf|\.nan)$")
        .expect("reserved scalar regex is valid")
});

static SAFE_PLAIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\p{L}\p{N}][\p{L}\p{N} _./()+-]*$").expect("plain scalar regex is valid")
});

/// Parse the key of a top-level mapping entry.
///
/// Returns the unquoted key and the byte offset just past the key token.
pub fn top_level_key(line: &str) -> Option<(String, usize)> {
    let caps = TOP_LEVEL_KEY.captures(line)?;
    let (key, end) = if let Some(m) = caps.get(1) {
        (m.as_str(), m.end() + 1)
    } else if let Some(m) = caps.get(2) {
        (m.as_str(), m.end() + 1)
    } else {
        let m = caps.get(3)?;
        (m.as_str().trim_end(), m.start() + m.as_str().trim_end().len())
    };
    Some((key.to_string(), end))
}

/// Text of a scalar value, stringifying numbers and booleans.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_text(&tagged.value),
        _ => None,
    }
}

/// Human name for a value's YAML kind, used in error messages.
pub fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "list",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

/// Whether a value counts as absent for "missing field" purposes.
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// Whether `text` must be quoted to survive a YAML round trip as a string.
pub fn needs_quotes(text: &str) -> bool {
    text.is_empty()
        || text != text.trim()
        || !SAFE_PLAIN.is_match(text)
        || RESERVED_PLAIN.is_match(text)
}

/// Render a string as a single-line YAML scalar.
pub fn render_scalar(text: &str) -> String {
    if needs_quotes(text) {
        quote(text)
    } else {
        text.to_string()
    }
}

/// Render a string as a double-quoted YAML scalar.
pub fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for ch in text.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out.push('"');
    out
}

/// Render a list of strings in flow style: `[a, b]`.
pub fn render_flow_list(items: &[String]) -> String {
    let rendered: Vec<String> = items.iter().map(|item| render_scalar(item)).collect();
    format!("[{}]", rendered.join(", "))
}
