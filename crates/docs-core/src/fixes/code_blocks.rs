//! Fence repairs: missing languages, text after closing fences and a
//! block left open at the end of the file.

use docs_content::lines::{dominant_ending, split_lines};
use docs_content::markdown::{fence_marker, scan_fences};
use docs_content::LineRole;

use super::{split_head, Fix, FixContext, FixOutput};
use crate::validator::format::DEFAULT_FENCE_LANGUAGE;
use crate::Result;

pub struct CodeBlocks;

/// Indentation plus the fence run of a closing fence line.
fn fence_only(line: &str) -> &str {
    let trimmed = line.trim_start();
    let indent = line.len() - trimmed.len();
    let run = trimmed
        .chars()
        .next()
        .map_or(0, |marker| trimmed.chars().take_while(|c| *c == marker).count());
    &line[..indent + run]
}

impl Fix for CodeBlocks {
    fn name(&self) -> &'static str {
        "code-blocks"
    }

    fn description(&self) -> &'static str {
        "Add `text` to fences without a language, strip text after closing fences, close unclosed blocks"
    }

    fn apply_to(&self, _ctx: &FixContext<'_>, content: &str) -> Result<FixOutput> {
        let (head, body) = split_head(content);
        let lines = split_lines(body);
        let scan = scan_fences(lines.iter().map(|l| l.text));

        let mut out = String::with_capacity(content.len() + 16);
        out.push_str(head);
        let mut changes = 0;

        for (line, role) in lines.iter().zip(&scan.roles) {
            match role {
                LineRole::FenceOpen { info } if info.is_empty() => {
                    out.push_str(line.text.trim_end());
                    out.push_str(DEFAULT_FENCE_LANGUAGE);
                    changes += 1;
                }
                LineRole::FenceClose { trailing } if !trailing.is_empty() => {
                    out.push_str(fence_only(line.text));
                    changes += 1;
                }
                _ => out.push_str(line.text),
            }
            out.push_str(line.ending);
        }

        let opener = scan
            .unclosed
            .and_then(|idx| lines.get(idx))
            .and_then(|line| fence_marker(line.text));
        if let Some((marker, width, _)) = opener {
            let ending = dominant_ending(content);
            if !out.is_empty() && !out.ends_with('\n') {
                out.push_str(ending);
            }
            out.extend(std::iter::repeat_n(marker, width));
            out.push_str(ending);
            changes += 1;
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
    fn test_adds_default_language() {
        let input = "---\ntitle: x\n---\n\n```\nls\n```\n\n```rust\nfn main() {}\n```\n";
        let out = apply_twice(&CodeBlocks, &ctx(DocType::Rfc), input);
        assert_eq!(
            out.content,
            "---\ntitle: x\n---\n\n```text\nls\n```\n\n```rust\nfn main() {}\n```\n"
        );
        assert_eq!(out.changes, 1);
    }

    #[test]
    fn test_strips_text_after_closing_fence() {
        let out = apply_twice(&CodeBlocks, &ctx(DocType::Rfc), "```bash\nls\n```python\n");
        assert_eq!(out.content, "```bash\nls\n```\n");
        assert_eq!(out.changes, 1);
    }

    #[test]
    fn test_closes_unclosed_fence() {
        let out = apply_twice(&CodeBlocks, &ctx(DocType::Rfc), "Intro\n\n~~~~yaml\nkey: 1");
        assert_eq!(out.content, "Intro\n\n~~~~yaml\nkey: 1\n~~~~\n");
        assert_eq!(out.changes, 1);
    }

    #[test]
    fn test_frontmatter_delimiters_are_not_fences() {
        let input = "---\ntitle: \"```\"\n---\nplain\n";
        let out = apply_twice(&CodeBlocks, &ctx(DocType::Memo), input);
        assert_eq!(out.changes, 0);
        assert_eq!(out.content, input);
    }
}
