use std::ops::Range;

use docs_content::lines::split_lines;
use docs_content::markdown::{bare_number_tags, scan_fences};

use super::{split_head, Fix, FixContext, FixOutput};
use crate::Result;

/// Wraps `<10ms`-style text in code spans so MDX does not read it as JSX.
///
/// Back-to-back matches such as `<5<6` become one span. A run touching a
/// backtick would merge with the neighbouring code span, so its `<` are
/// escaped as `\<` instead. Either way every match the format check
/// reports is gone afterwards.
pub struct MdxEscape;

/// Merge matches that end exactly where the next one starts.
fn runs(ranges: Vec<Range<usize>>) -> Vec<Range<usize>> {
    let mut runs: Vec<Range<usize>> = Vec::with_capacity(ranges.len());
    for range in ranges {
        match runs.last_mut() {
            Some(last) if last.end == range.start => last.end = range.end,
            _ => runs.push(range),
        }
    }
    runs
}

fn touches_backtick(line: &str, run: &Range<usize>) -> bool {
    line[..run.start].ends_with('`') || line[run.end..].starts_with('`')
}

impl Fix for MdxEscape {
    fn name(&self) -> &'static str {
        "mdx-escape"
    }

    fn description(&self) -> &'static str {
        "Wrap bare <number patterns in backticks for MDX"
    }

    fn apply_to(&self, _ctx: &FixContext<'_>, content: &str) -> Result<FixOutput> {
        let (head, body) = split_head(content);
        let lines = split_lines(body);
        let scan = scan_fences(lines.iter().map(|l| l.text));

        let mut out = String::with_capacity(content.len() + 16);
        out.push_str(head);
        let mut changes = 0;

        for (line, role) in lines.iter().zip(&scan.roles) {
            let ranges = if role.is_prose() {
                bare_number_tags(line.text)
            } else {
                Vec::new()
            };
            let mut cursor = 0;
            for run in runs(ranges) {
                out.push_str(&line.text[cursor..run.start]);
                let text = &line.text[run.clone()];
                if touches_backtick(line.text, &run) {
                    out.push_str(&text.replace('<', "\\<"));
                } else {
                    out.push('`');
                    out.push_str(text);
                    out.push('`');
                }
                cursor = run.end;
                changes += 1;
            }
            out.push_str(&line.text[cursor..]);
            out.push_str(line.ending);
        }

        Ok(FixOutput::new(out, changes))
    }
}
