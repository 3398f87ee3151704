use std::sync::LazyLock;

use docs_content::lines::split_lines;
use docs_content::links::links_in_line;
use docs_content::markdown::scan_fences;
use regex::Regex;

use super::{split_head, Fix, FixContext, FixOutput};
use crate::validator::links::{classify, split_target};
use crate::Result;

/// `YYYY-MM-DD-<type>-NNN...` file names, optionally with an extension.
static DATED_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}-((?:adr|rfc|memo|prd|frd|prdfaq)-\d{1,6}[^/]*?)(?:\.mdx?)?$")
        .expect("dated name regex is valid")
});

/// Rewrites links to dated file names into the site's document ids:
/// `../rfcs/2025-01-02-rfc-003-api.md#x` becomes `../rfcs/rfc-003-api#x`.
pub struct InternalLinks;

/// New target for a stale internal link, if it needs one.
pub fn rewrite_target(target: &str) -> Option<String> {
    let (path, anchor) = split_target(target);
    let (dir, name) = match path.rfind('/') {
        Some(idx) => path.split_at(idx + 1),
        None => ("", path),
    };
    let caps = DATED_NAME.captures(name)?;
    let mut rewritten = format!("{dir}{}", caps.get(1)?.as_str());
    if let Some(anchor) = anchor {
        rewritten.push('#');
        rewritten.push_str(anchor);
    }
    Some(rewritten)
}

impl Fix for InternalLinks {
    fn name(&self) -> &'static str {
        "internal-links"
    }

    fn description(&self) -> &'static str {
        "Rewrite links to dated document files as extensionless document ids"
    }

    fn apply_to(&self, ctx: &FixContext<'_>, content: &str) -> Result<FixOutput> {
        let (head, body) = split_head(content);
        let lines = split_lines(body);
        let scan = scan_fences(lines.iter().map(|l| l.text));
        let structure = &ctx.project.structure;

        let mut out = String::with_capacity(content.len());
        out.push_str(head);
        let mut changes = 0;

        for (line, role) in lines.iter().zip(&scan.roles) {
            let mut text = line.text.to_string();
            if role.is_prose() {
                let mut edits: Vec<_> = links_in_line(line.text, 0)
                    .into_iter()
                    .filter(|link| classify(&link.target, structure).is_internal())
                    .filter_map(|link| Some((link.target_range.clone(), rewrite_target(&link.target)?)))
                    .collect();
                edits.sort_by_key(|(range, _)| std::cmp::Reverse(range.start));
                for (range, replacement) in edits {
                    text.replace_range(range, &replacement);
                    changes += 1;
                }
            }
            out.push_str(&text);
            out.push_str(line.ending);
        }

        Ok(FixOutput::new(out, changes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixes::test_support::{apply_twice, ctx};
    use docs_schema::DocType;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_rewrite_target() {
        assert_eq!(
            rewrite_target("../rfcs/2025-01-02-rfc-003-api.md#context").as_deref(),
            Some("../rfcs/rfc-003-api#context")
        );
        assert_eq!(rewrite_target("2024-12-01-adr-001-x.mdx").as_deref(), Some("adr-001-x"));
        assert_eq!(rewrite_target("./adr-001-x.md"), None);
        assert_eq!(rewrite_target("../guides/2025-01-02-notes.md"), None);
    }

    #[test]
    fn test_rewrites_only_prose_links() {
        let input = "---\nid: adr-002\n---\nSee [RFC](../rfcs/2025-01-02-rfc-003-api.md) → 中文 and [web](https://x.io/2025-01-02-rfc-003.md).\n\n```text\n[RFC](../rfcs/2025-01-02-rfc-003-api.md)\n```\n";
        let out = apply_twice(&InternalLinks, &ctx(DocType::Adr), input);
        assert_eq!(out.changes, 1);
        assert_eq!(
            out.content,
            "---\nid: adr-002\n---\nSee [RFC](../rfcs/rfc-003-api) → 中文 and [web](https://x.io/2025-01-02-rfc-003.md).\n\n```text\n[RFC](../rfcs/2025-01-02-rfc-003-api.md)\n```\n"
        );
    }

    #[test]
    fn test_multiple_links_on_one_line() {
        let input = "[a](2025-01-01-adr-001-a.md) and [b](2025-01-02-adr-002-b.md#d)\n";
        let out = apply_twice(&InternalLinks, &ctx(DocType::Adr), input);
        assert_eq!(out.content, "[a](adr-001-a) and [b](adr-002-b#d)\n");
        assert_eq!(out.changes, 2);
    }
}
