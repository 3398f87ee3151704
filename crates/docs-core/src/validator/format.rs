//! Markdown formatting phase

use docs_content::lines::{split_lines, trailing_whitespace_start};
use docs_content::markdown::{bare_number_tags, scan_fences};
use docs_content::LineRole;
use docs_schema::ValidationSettings;

use crate::document::DocumentRecord;
use crate::report::{Issue, Phase};

/// Language suggested for fences without one.
pub const DEFAULT_FENCE_LANGUAGE: &str = "text";

pub fn check(doc: &DocumentRecord, settings: &ValidationSettings) -> Vec<Issue> {
    let mut issues = Vec::new();

    for (idx, line) in split_lines(&doc.source).iter().enumerate() {
        if trailing_whitespace_start(line.text).is_some() {
            issues.push(Issue::error(Phase::Format, "trailing whitespace").at_line(Some(idx + 1)));
        }
    }

    let lines = split_lines(doc.body());
    let scan = scan_fences(lines.iter().map(|l| l.text));
    let first = doc.body_line;

    for (idx, role) in scan.roles.iter().enumerate() {
        let line_no = first + idx;
        match role {
            LineRole::FenceOpen { info } => {
                if info.is_empty() {
                    issues.push(
                        Issue::error(
                            Phase::Format,
                            format!(
                                "code block has no language; use ```{DEFAULT_FENCE_LANGUAGE} for plain text"
                            ),
                        )
                        .at_line(Some(line_no)),
                    );
                }
                let follows_prose = idx > 0
                    && scan.roles[idx - 1].is_prose()
                    && !lines[idx - 1].is_blank();
                if follows_prose {
                    issues.push(
                        Issue::error(Phase::Format, "code block must be preceded by a blank line")
                            .at_line(Some(line_no)),
                    );
                }
            }
            LineRole::FenceClose { trailing } if !trailing.is_empty() => {
                issues.push(
                    Issue::error(
                        Phase::Format,
                        format!(
                            "closing code fence has trailing text `{trailing}`; open a new block on its own line"
                        ),
                    )
                    .at_line(Some(line_no)),
                );
            }
            LineRole::Prose if settings.check_mdx => {
                let text = lines[idx].text;
                for range in bare_number_tags(text) {
                    issues.push(
                        Issue::error(
                            Phase::Format,
                            format!(
                                "`{}` is parsed as a JSX tag by MDX; wrap it in backticks or escape the `<`",
                                &text[range]
                            ),
                        )
                        .at_line(Some(line_no)),
                    );
                }
            }
            _ => {}
        }
    }

    if let Some(open) = scan.unclosed {
        issues.push(
            Issue::error(Phase::Format, "code block is never closed").at_line(Some(first + open)),
        );
    }
    issues
}
