//! Text-preserving frontmatter edits
//!
//! Fixes must leave every byte they do not target untouched, so the
//! frontmatter is edited as lines rather than re-serialized. Each entry is
//! a top-level `key:` line plus any indented or list continuation lines.

use std::ops::Range;

use crate::frontmatter::split;
use crate::yaml::top_level_key;
use crate::Result;

/// Line-based editor over a document's frontmatter block.
#[derive(Debug, Clone)]
pub struct FrontmatterEditor<'a> {
    original: &'a str,
    prefix: &'a str,
    lines: Vec<String>,
    ending: &'static str,
    suffix: &'a str,
    changed: bool,
}

impl<'a> FrontmatterEditor<'a> {
    /// Open an editor, or `None` when the document has no frontmatter.
    pub fn new(content: &'a str) -> Result<Option<Self>> {
        let Some(split) = split(content)? else {
            return Ok(None);
        };
        let ending = if split.prefix.ends_with("\r\n") { "\r\n" } else { "\n" };
        let suffix_start = split.prefix.len() + split.yaml.len();
        Ok(Some(Self {
            original: content,
            prefix: split.prefix,
            lines: split.yaml.lines().map(str::to_string).collect(),
            ending,
            suffix: &content[suffix_start..],
            changed: false,
        }))
    }

    fn key_index(&self, key: &str) -> Option<usize> {
        self.lines
            .iter()
            .position(|line| top_level_key(line).is_some_and(|(k, _)| k == key))
    }

    fn is_continuation(line: &str) -> bool {
        line.starts_with([' ', '\t']) || line == "-" || line.starts_with("- ")
    }

    /// Line range occupied by `key`, including continuation lines.
    fn key_range(&self, key: &str) -> Option<Range<usize>> {
        let start = self.key_index(key)?;
        let mut end = start + 1;
        let mut probe = end;
        while probe < self.lines.len() {
            let line = &self.lines[probe];
            if line.trim().is_empty() {
                probe += 1;
                continue;
            }
            if !Self::is_continuation(line) {
                break;
            }
            probe += 1;
            end = probe;
        }
        Some(start..end)
    }

    pub fn has_key(&self, key: &str) -> bool {
        self.key_index(key).is_some()
    }

    /// Set `key` to an already-rendered YAML value on a single line.
    ///
    /// Replaces the whole existing entry, or appends a new one at the end
    /// of the block. Returns whether the text changed.
    pub fn set(&mut self, key: &str, rendered: &str) -> bool {
        let new_line = format!("{key}: {rendered}");
        match self.key_range(key) {
            Some(range) => {
                if range.len() == 1 && self.lines[range.start] == new_line {
                    return false;
                }
                self.lines.splice(range, [new_line]);
            }
            None => self.lines.push(new_line),
        }
        self.changed = true;
        true
    }

    /// Add `key` only when it is not defined yet.
    pub fn insert(&mut self, key: &str, rendered: &str) -> bool {
        if self.has_key(key) {
            return false;
        }
        self.set(key, rendered)
    }

    /// Remove `key` and its continuation lines.
    pub fn remove(&mut self, key: &str) -> bool {
        match self.key_range(key) {
            Some(range) => {
                self.lines.drain(range);
                self.changed = true;
                true
            }
            None => false,
        }
    }

    /// Rename `from` to `to`, keeping the value text as written.
    ///
    /// Does nothing when `from` is missing or `to` already exists.
    pub fn rename(&mut self, from: &str, to: &str) -> bool {
        if from == to || self.has_key(to) {
            return false;
        }
        let Some(idx) = self.key_index(from) else {
            return false;
        };
        let Some((_, key_end)) = top_level_key(&self.lines[idx]) else {
            return false;
        };
        let renamed = format!("{to}{}", &self.lines[idx][key_end..]);
        self.lines[idx] = renamed;
        self.changed = true;
        true
    }

    pub fn is_changed(&self) -> bool {
        self.changed
    }

    /// Produce the edited document. Unchanged documents come back verbatim.
    pub fn finish(self) -> String {
        if !self.changed {
            return self.original.to_string();
        }
        let mut out = String::with_capacity(self.original.len() + 64);
        out.push_str(self.prefix);
        for line in &self.lines {
            out.push_str(line);
            out.push_str(self.ending);
        }
        out.push_str(self.suffix);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const DOC: &str = "---\ntitle: Test\ntags:\n  - a\n  - b\nstatus: Draft\n---\nBody → 中文\n";

    #[test]
    fn test_unchanged_editor_returns_original() {
        let editor = FrontmatterEditor::new(DOC).unwrap().unwrap();
        assert_eq!(editor.finish(), DOC);
    }

    #[test]
    fn test_set_replaces_block_entry() {
        let mut editor = FrontmatterEditor::new(DOC).unwrap().unwrap();
        assert!(editor.set("tags", "[a, b]"));
        assert_eq!(
            editor.finish(),
            "---\ntitle: Test\ntags: [a, b]\nstatus: Draft\n---\nBody → 中文\n"
        );
    }

    #[test]
    fn test_set_same_value_is_noop() {
        let mut editor = FrontmatterEditor::new(DOC).unwrap().unwrap();
        assert!(!editor.set("status", "Draft"));
        assert!(!editor.is_changed());
    }

    #[test]
    fn test_insert_appends_before_closing_delimiter() {
        let mut editor = FrontmatterEditor::new(DOC).unwrap().unwrap();
        assert!(editor.insert("project_id", "my-project"));
        assert!(!editor.insert("title", "Other"));
        let out = editor.finish();
        assert!(out.contains("status: Draft\nproject_id: my-project\n---\n"));
    }

    #[test]
    fn test_remove_and_rename() {
        let mut editor = FrontmatterEditor::new(DOC).unwrap().unwrap();
        assert!(editor.remove("tags"));
        assert!(editor.rename("status", "state"));
        assert!(!editor.rename("missing", "other"));
        assert_eq!(editor.finish(), "---\ntitle: Test\nstate: Draft\n---\nBody → 中文\n");
    }

    #[test]
    fn test_crlf_documents_keep_crlf() {
        let doc = "---\r\ntitle: Test\r\n---\r\nBody\r\n";
        let mut editor = FrontmatterEditor::new(doc).unwrap().unwrap();
        editor.insert("tags", "[]");
        assert_eq!(editor.finish(), "---\r\ntitle: Test\r\ntags: []\r\n---\r\nBody\r\n");
    }

    #[test]
    fn test_no_frontmatter_yields_none() {
        assert!(FrontmatterEditor::new("# Just a heading\n").unwrap().is_none());
    }
}
