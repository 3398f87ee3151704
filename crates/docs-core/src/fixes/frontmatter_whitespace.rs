use docs_content::yaml::{render_flow_list, render_scalar};
use docs_content::{frontmatter, FrontmatterEditor};
use serde_yaml::Value;

use super::{Fix, FixContext, FixOutput};
use crate::Result;

/// Fields kept as `[]` when empty instead of being dropped.
const LIST_FIELDS: &[&str] = &["tags", "authors", "reviewers", "related"];

/// Trims whitespace around frontmatter strings and string list items, and
/// drops empty strings, nulls and empty lists. Empty list fields such as
/// `tags` become `[]`.
///
/// Multi-line values and lists holding non-strings are left alone.
pub struct FrontmatterWhitespace;

enum Edit {
    Set(String),
    Remove,
}

fn empty(key: &str) -> Edit {
    if LIST_FIELDS.contains(&key) {
        Edit::Set("[]".to_string())
    } else {
        Edit::Remove
    }
}

fn edit_for(key: &str, value: &Value) -> Option<Edit> {
    match value {
        Value::Null => Some(empty(key)),
        Value::String(text) if text.contains('\n') => None,
        Value::String(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                Some(empty(key))
            } else if trimmed != text {
                Some(Edit::Set(render_scalar(trimmed)))
            } else {
                None
            }
        }
        Value::Sequence(items) if items.is_empty() => {
            (!LIST_FIELDS.contains(&key)).then_some(Edit::Remove)
        }
        Value::Sequence(items) => {
            let texts = items.iter().map(Value::as_str).collect::<Option<Vec<&str>>>()?;
            if texts.iter().any(|t| t.contains('\n')) || texts.iter().all(|t| t.trim() == *t) {
                return None;
            }
            let trimmed: Vec<String> = texts.iter().map(|t| t.trim().to_string()).collect();
            Some(Edit::Set(render_flow_list(&trimmed)))
        }
        _ => None,
    }
}

impl Fix for FrontmatterWhitespace {
    fn name(&self) -> &'static str {
        "frontmatter-whitespace"
    }

    fn description(&self) -> &'static str {
        "Trim frontmatter values and drop empty ones"
    }

    fn apply_to(&self, _ctx: &FixContext<'_>, content: &str) -> Result<FixOutput> {
        let Ok(parsed) = frontmatter::parse(content) else {
            return Ok(FixOutput::unchanged(content));
        };
        let fm = &parsed.frontmatter;
        let edits: Vec<(String, Edit)> = fm
            .keys()
            .filter_map(|key| {
                let edit = edit_for(key, fm.get(key)?)?;
                Some((key.to_string(), edit))
            })
            .collect();
        if edits.is_empty() {
            return Ok(FixOutput::unchanged(content));
        }

        let Some(mut editor) = FrontmatterEditor::new(content)? else {
            return Ok(FixOutput::unchanged(content));
        };
        let mut changes = 0;
        for (key, edit) in edits {
            let changed = match edit {
                Edit::Set(rendered) => editor.set(&key, &rendered),
                Edit::Remove => editor.remove(&key),
            };
            if changed {
                changes += 1;
            }
        }
        Ok(FixOutput::new(editor.finish(), changes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixes::test_support::{apply_twice, ctx};
    use docs_schema::DocType;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_trims_strings_and_list_items() {
        let input = "---\ntitle: \"  Use Rust  \"\nauthor: [\" alice\", bob]\n---\nBody → 中文\n";
        let out = apply_twice(&FrontmatterWhitespace, &ctx(DocType::Rfc), input);
        assert_eq!(out.content, "---\ntitle: Use Rust\nauthor: [alice, bob]\n---\nBody → 中文\n");
        assert_eq!(out.changes, 2);
    }

    #[test]
    fn test_drops_empty_values() {
        let input = "---\ntitle: Use Rust\ndescription: \"\"\nsuperseded_by:\nreviewers:\ntags: \" \"\ndeciders: []\n---\n";
        let out = apply_twice(&FrontmatterWhitespace, &ctx(DocType::Adr), input);
        assert_eq!(out.content, "---\ntitle: Use Rust\nreviewers: []\ntags: []\n---\n");
        assert_eq!(out.changes, 5);
    }

    #[test]
    fn test_clean_frontmatter_untouched() {
        let input = "---\ntitle: Use Rust\ntags: []\nsummary: |\n  Two lines\n  of text\nsizes: [1, 2]\n---\n";
        let out = apply_twice(&FrontmatterWhitespace, &ctx(DocType::Adr), input);
        assert_eq!(out.changes, 0);
        assert_eq!(out.content, input);
    }

    #[test]
    fn test_quoted_numbers_stay_strings() {
        let input = "---\nversion: \" 2.0 \"\n---\n";
        let out = apply_twice(&FrontmatterWhitespace, &ctx(DocType::Generic), input);
        assert_eq!(out.content, "---\nversion: \"2.0\"\n---\n");
    }
}
