use std::collections::BTreeSet;

use docs_content::yaml::{render_flow_list, scalar_text};
use docs_content::{frontmatter, FrontmatterEditor};
use serde_yaml::Value;

use super::{Fix, FixContext, FixOutput};
use crate::Result;

/// Lowercases, hyphenates, deduplicates and sorts `tags`.
pub struct Tags;

/// Normalize one tag: lowercase, whitespace and underscores become `-`,
/// anything else outside `[a-z0-9-]` is dropped, dashes are collapsed.
pub fn normalize_tag(tag: &str) -> String {
    let mut out = String::with_capacity(tag.len());
    for ch in tag.trim().chars().flat_map(char::to_lowercase) {
        let mapped = match ch {
            c if c.is_whitespace() || c == '_' || c == '-' => '-',
            c if c.is_ascii_lowercase() || c.is_ascii_digit() => c,
            _ => continue,
        };
        if mapped == '-' && (out.is_empty() || out.ends_with('-')) {
            continue;
        }
        out.push(mapped);
    }
    out.trim_end_matches('-').to_string()
}

fn normalize_all<'a>(tags: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    tags.into_iter()
        .map(normalize_tag)
        .filter(|t| !t.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

impl Fix for Tags {
    fn name(&self) -> &'static str {
        "tags"
    }

    fn description(&self) -> &'static str {
        "Normalize tags to sorted, unique, lowercase-hyphenated lists"
    }

    fn apply_to(&self, _ctx: &FixContext<'_>, content: &str) -> Result<FixOutput> {
        let Ok(parsed) = frontmatter::parse(content) else {
            return Ok(FixOutput::unchanged(content));
        };
        let normalized = match parsed.frontmatter.get("tags") {
            Some(Value::Sequence(items)) => {
                let current: Vec<String> = items.iter().filter_map(scalar_text).collect();
                let normalized = normalize_all(current.iter().map(String::as_str));
                if current == normalized && current.len() == items.len() {
                    return Ok(FixOutput::unchanged(content));
                }
                normalized
            }
            Some(value) => match scalar_text(value) {
                Some(text) => normalize_all(text.split(',')),
                None => return Ok(FixOutput::unchanged(content)),
            },
            None => return Ok(FixOutput::unchanged(content)),
        };

        let Some(mut editor) = FrontmatterEditor::new(content)? else {
            return Ok(FixOutput::unchanged(content));
        };
        let changed = editor.set("tags", &render_flow_list(&normalized));
        Ok(FixOutput::new(editor.finish(), usize::from(changed)))
    }
}
