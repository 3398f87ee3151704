//! Frontmatter splitting and parsing
//!
//! A document starts with a `---` line, followed by a YAML mapping and a
//! closing `---` line. Everything after the closing line is the body.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde_yaml::{Mapping, Value};

use crate::yaml::{self, scalar_text};
use crate::{Error, Result};

/// The frontmatter delimiter line.
pub const DELIMITER: &str = "---";

const BOM: &str = "\u{feff}";

static YAML_LOCATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" at line \d+ column \d+").expect("location regex is valid"));

/// Raw pieces of a document with a frontmatter block.
///
/// `prefix + yaml + closing + body` reproduces the original text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Split<'a> {
    /// Optional BOM plus the opening delimiter line
    pub prefix: &'a str,
    /// YAML source between the delimiters
    pub yaml: &'a str,
    /// Closing delimiter line
    pub closing: &'a str,
    pub body: &'a str,
    /// 1-based file line of the first YAML line
    pub yaml_line: usize,
    /// 1-based file line of the first body line
    pub body_line: usize,
}

fn is_delimiter(line: &str) -> bool {
    line.trim_end() == DELIMITER
}

/// Locate the frontmatter block.
///
/// Returns `Ok(None)` when the document does not open with a delimiter
/// and [`Error::Unterminated`] when the block is never closed.
pub fn split(content: &str) -> Result<Option<Split<'_>>> {
    let start = if content.starts_with(BOM) { BOM.len() } else { 0 };
    let rest = &content[start..];

    let first_end = match rest.find('\n') {
        Some(idx) => idx + 1,
        None if is_delimiter(rest) => return Err(Error::Unterminated),
        None => return Ok(None),
    };
    if !is_delimiter(&rest[..first_end]) {
        return Ok(None);
    }

    let prefix_end = start + first_end;
    let mut offset = prefix_end;
    let mut line_no = 2;
    for raw in content[prefix_end..].split_inclusive('\n') {
        if is_delimiter(raw) {
            let closing_end = offset + raw.len();
            return Ok(Some(Split {
                prefix: &content[..prefix_end],
                yaml: &content[prefix_end..offset],
                closing: &content[offset..closing_end],
                body: &content[closing_end..],
                yaml_line: 2,
                body_line: line_no + 1,
            }));
        }
        offset += raw.len();
        line_no += 1;
    }
    Err(Error::Unterminated)
}

/// Parsed frontmatter values plus the file line of every top-level key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frontmatter {
    values: Mapping,
    key_lines: BTreeMap<String, usize>,
}

impl Frontmatter {
    /// Parse a YAML block whose first line sits on file line `first_line`.
    ///
    /// Duplicate top-level keys are rejected instead of letting the last
    /// definition silently win.
    pub fn from_yaml(source: &str, first_line: usize) -> Result<Self> {
        let mut key_lines = BTreeMap::new();
        for (idx, line) in source.lines().enumerate() {
            if let Some((key, _)) = yaml::top_level_key(line) {
                let line_no = first_line + idx;
                if key_lines.insert(key.clone(), line_no).is_some() {
                    return Err(Error::DuplicateKey { key, line: line_no });
                }
            }
        }

        if source.trim().is_empty() {
            return Ok(Self {
                values: Mapping::new(),
                key_lines,
            });
        }

        let value: Value = serde_yaml::from_str(source).map_err(|e| {
            let line = e.location().map(|loc| first_line + loc.line().saturating_sub(1));
            let message = YAML_LOCATION.replace_all(&e.to_string(), "").into_owned();
            Error::yaml(line, message)
        })?;

        match value {
            Value::Mapping(values) => Ok(Self { values, key_lines }),
            Value::Null => Ok(Self {
                values: Mapping::new(),
                key_lines,
            }),
            other => Err(Error::NotAMapping {
                found: yaml::kind_name(&other).to_string(),
            }),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Present with a non-blank value.
    pub fn has_value(&self, key: &str) -> bool {
        self.get(key).is_some_and(|v| !yaml::is_blank(v))
    }

    /// File line where `key` is defined.
    pub fn line_of(&self, key: &str) -> Option<usize> {
        self.key_lines.get(key).copied()
    }

    /// String keys in document order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().filter_map(Value::as_str)
    }

    /// Read a field as a list of strings, accepting a single scalar too.
    pub fn string_list(&self, key: &str) -> Option<Vec<String>> {
        match self.get(key)? {
            Value::Sequence(items) => Some(items.iter().filter_map(scalar_text).collect()),
            Value::Null => Some(Vec::new()),
            other => scalar_text(other).map(|s| vec![s]),
        }
    }

    pub fn as_mapping(&self) -> &Mapping {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A document split into parsed frontmatter and raw body.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDocument<'a> {
    pub frontmatter: Frontmatter,
    pub body: &'a str,
    /// 1-based file line of the first body line
    pub body_line: usize,
}

/// Split and parse a full document.
///
/// Fails with [`Error::MissingFrontmatter`] when there is no opening
/// delimiter, so callers can tell "not a CMS document" apart from a
/// broken one.
pub fn parse(content: &str) -> Result<ParsedDocument<'_>> {
    let split = split(content)?.ok_or(Error::MissingFrontmatter)?;
    let frontmatter = Frontmatter::from_yaml(split.yaml, split.yaml_line)?;
    Ok(ParsedDocument {
        frontmatter,
        body: split.body,
        body_line: split.body_line,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_pieces_reassemble() {
        let content = "---\ntitle: x\n---\n# Body\n";
        let split = split(content).unwrap().unwrap();
        assert_eq!(split.yaml, "title: x\n");
        assert_eq!(split.body, "# Body\n");
        assert_eq!(split.body_line, 4);
        let rebuilt = format!("{}{}{}{}", split.prefix, split.yaml, split.closing, split.body);
        assert_eq!(rebuilt, content);
    }

    #[test]
    fn test_split_handles_bom_and_crlf() {
        let content = "\u{feff}---\r\nid: adr-001\r\n---\r\nbody";
        let split = split(content).unwrap().unwrap();
        assert_eq!(split.yaml, "id: adr-001\r\n");
        assert_eq!(split.body, "body");
    }

    #[test]
    fn test_split_without_opening_delimiter() {
        assert_eq!(split("# Title\n---\n").unwrap(), None);
        assert_eq!(split("").unwrap(), None);
    }

    #[test]
    fn test_split_unterminated() {
        assert_eq!(split("---\ntitle: x\n").unwrap_err(), Error::Unterminated);
        assert_eq!(split("---").unwrap_err(), Error::Unterminated);
    }

    #[test]
    fn test_empty_block_parses_to_empty_mapping() {
        let doc = parse("---\n---\nbody\n").unwrap();
        assert!(doc.frontmatter.is_empty());
        assert_eq!(doc.body, "body\n");
        assert_eq!(doc.body_line, 3);
    }
}
