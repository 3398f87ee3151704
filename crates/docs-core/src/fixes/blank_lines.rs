use docs_content::lines::{dominant_ending, split_lines};
use docs_content::markdown::scan_fences;
use docs_content::LineRole;

use super::{split_head, Fix, FixContext, FixOutput};
use crate::Result;

/// Separates fenced code blocks from adjacent prose with blank lines.
pub struct BlankLines;

impl Fix for BlankLines {
    fn name(&self) -> &'static str {
        "blank-lines"
    }

    fn description(&self) -> &'static str {
        "Add blank lines between fenced code blocks and adjacent prose"
    }

    fn apply_to(&self, _ctx: &FixContext<'_>, content: &str) -> Result<FixOutput> {
        let (head, body) = split_head(content);
        let lines = split_lines(body);
        let scan = scan_fences(lines.iter().map(|l| l.text));
        let fallback = dominant_ending(content);
        let is_text = |idx: usize| scan.roles[idx].is_prose() && !lines[idx].is_blank();

        let mut out = String::with_capacity(content.len() + 16);
        out.push_str(head);
        let mut changes = 0;

        for (idx, (line, role)) in lines.iter().zip(&scan.roles).enumerate() {
            let blank = if line.ending.is_empty() { fallback } else { line.ending };
            if matches!(role, LineRole::FenceOpen { .. }) && idx > 0 && is_text(idx - 1) {
                out.push_str(blank);
                changes += 1;
            }
            out.push_str(line.text);
            out.push_str(line.ending);
            if matches!(role, LineRole::FenceClose { .. }) && idx + 1 < lines.len() && is_text(idx + 1) {
                out.push_str(blank);
                changes += 1;
            }
        }

        Ok(FixOutput::new(out, changes))
    }
}
