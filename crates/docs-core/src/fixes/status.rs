use docs_content::yaml::{render_scalar, scalar_text};
use docs_content::{frontmatter, FrontmatterEditor};
use docs_schema::builtin::valid_statuses;
use docs_schema::DocType;

use super::{Fix, FixContext, FixOutput};
use crate::Result;

/// Rewrites `status` to the canonical spelling for the document type.
pub struct Status;

/// Common spellings that map onto a canonical status.
fn synonyms(doc_type: DocType) -> &'static [(&'static str, &'static str)] {
    match doc_type {
        DocType::Adr => &[
            ("draft", "Proposed"),
            ("pending", "Proposed"),
            ("active", "Accepted"),
            ("approved", "Accepted"),
            ("done", "Accepted"),
            ("retired", "Deprecated"),
            ("obsolete", "Deprecated"),
            ("replaced", "Superseded"),
        ],
        DocType::Rfc => &[
            ("pending", "In Review"),
            ("review", "In Review"),
            ("approved", "Accepted"),
            ("done", "Implemented"),
            ("declined", "Rejected"),
        ],
        DocType::Memo => &[
            ("pending", "Draft"),
            ("public", "Published"),
            ("final", "Published"),
            ("retired", "Archived"),
        ],
        DocType::Prd => &[
            ("proposed", "Draft"),
            ("review", "In Review"),
            ("active", "In Progress"),
            ("done", "Completed"),
            ("closed", "Completed"),
            ("canceled", "Cancelled"),
        ],
        DocType::Frd => &[
            ("proposed", "Draft"),
            ("review", "In Review"),
            ("done", "Implemented"),
        ],
        DocType::PrdFaq => &[
            ("proposed", "Draft"),
            ("review", "In Review"),
            ("retired", "Archived"),
        ],
        DocType::Generic => &[],
    }
}

fn fold(text: &str) -> String {
    text.trim()
        .split([' ', '_', '-'])
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Canonical status for `value`, if it is recognized but misspelled.
pub fn canonical_status(doc_type: DocType, value: &str) -> Option<&'static str> {
    let valid = valid_statuses(doc_type);
    if valid.contains(&value) {
        return None;
    }
    let folded = fold(value);
    valid
        .iter()
        .copied()
        .find(|status| fold(status) == folded)
        .or_else(|| {
            synonyms(doc_type)
                .iter()
                .find(|(from, _)| *from == folded)
                .map(|(_, to)| *to)
        })
}

impl Fix for Status {
    fn name(&self) -> &'static str {
        "status"
    }

    fn description(&self) -> &'static str {
        "Map status synonyms and miscased values to the canonical status"
    }

    fn apply_to(&self, ctx: &FixContext<'_>, content: &str) -> Result<FixOutput> {
        let Ok(parsed) = frontmatter::parse(content) else {
            return Ok(FixOutput::unchanged(content));
        };
        let current = parsed.frontmatter.get("status").and_then(scalar_text);
        let Some(canonical) = current.and_then(|value| canonical_status(ctx.doc_type, &value)) else {
            return Ok(FixOutput::unchanged(content));
        };
        let Some(mut editor) = FrontmatterEditor::new(content)? else {
            return Ok(FixOutput::unchanged(content));
        };
        let changed = editor.set("status", &render_scalar(canonical));
        Ok(FixOutput::new(editor.finish(), usize::from(changed)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixes::test_support::{apply_twice, ctx};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(DocType::Adr, "accepted", Some("Accepted"))]
    #[case(DocType::Adr, "draft", Some("Proposed"))]
    #[case(DocType::Adr, "Accepted", None)]
    #[case(DocType::Rfc, "in_review", Some("In Review"))]
    #[case(DocType::Rfc, "approved", Some("Accepted"))]
    #[case(DocType::Prd, "Done", Some("Completed"))]
    #[case(DocType::Adr, "WIP", None)]
    #[case(DocType::Generic, "draft", None)]
    fn test_canonical_status(#[case] doc_type: DocType, #[case] value: &str, #[case] expected: Option<&str>) {
        assert_eq!(canonical_status(doc_type, value), expected);
    }

    #[test]
    fn test_rewrites_status_line_only() {
        let input = "---\ntitle: Use Rust\nstatus: in-review # keep?\nid: rfc-001\n---\nBody\n";
        let out = apply_twice(&Status, &ctx(DocType::Rfc), input);
        assert_eq!(out.content, "---\ntitle: Use Rust\nstatus: In Review\nid: rfc-001\n---\nBody\n");
        assert_eq!(out.changes, 1);
    }

    #[test]
    fn test_unknown_status_left_for_validation() {
        let input = "---\nstatus: WIP\n---\n";
        let out = apply_twice(&Status, &ctx(DocType::Adr), input);
        assert_eq!(out.changes, 0);
    }
}
