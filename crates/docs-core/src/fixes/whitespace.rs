use docs_content::lines::{split_lines, trailing_whitespace_start};

use super::{Fix, FixContext, FixOutput};
use crate::Result;

/// Strips trailing spaces and tabs; one change per affected line.
pub struct TrailingWhitespace;

impl Fix for TrailingWhitespace {
    fn name(&self) -> &'static str {
        "trailing-whitespace"
    }

    fn description(&self) -> &'static str {
        "Remove trailing spaces and tabs from every line"
    }

    fn apply_to(&self, _ctx: &FixContext<'_>, content: &str) -> Result<FixOutput> {
        let mut out = String::with_capacity(content.len());
        let mut changes = 0;
        for line in split_lines(content) {
            match trailing_whitespace_start(line.text) {
                Some(end) => {
                    out.push_str(&line.text[..end]);
                    changes += 1;
                }
                None => out.push_str(line.text),
            }
            out.push_str(line.ending);
        }
        Ok(FixOutput::new(out, changes))
    }
}
