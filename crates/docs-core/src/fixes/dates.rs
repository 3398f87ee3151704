use chrono::NaiveDate;
use docs_content::{frontmatter, FrontmatterEditor};
use docs_schema::schema::is_iso_date;

use super::{Fix, FixContext, FixOutput};
use crate::Result;

const DATE_FIELDS: &[&str] = &["date", "created", "updated"];

/// Accepted non-ISO spellings, tried in order. Day-first wins over
/// month-first when both parse.
const FORMATS: &[&str] = &[
    "%Y/%m/%d",
    "%d/%m/%Y",
    "%m/%d/%Y",
    "%Y.%m.%d",
    "%d.%m.%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
];

/// Rewrites date fields in common formats to `YYYY-MM-DD`.
pub struct Dates;

pub fn parse_loose_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
}

impl Fix for Dates {
    fn name(&self) -> &'static str {
        "dates"
    }

    fn description(&self) -> &'static str {
        "Rewrite date, created and updated values to YYYY-MM-DD"
    }

    fn apply_to(&self, _ctx: &FixContext<'_>, content: &str) -> Result<FixOutput> {
        let Ok(parsed) = frontmatter::parse(content) else {
            return Ok(FixOutput::unchanged(content));
        };
        let rewrites: Vec<(&str, String)> = DATE_FIELDS
            .iter()
            .filter_map(|field| {
                let value = parsed.frontmatter.get_str(field)?;
                if is_iso_date(value) {
                    return None;
                }
                let date = parse_loose_date(value)?;
                Some((*field, date.format("%Y-%m-%d").to_string()))
            })
            .collect();
        if rewrites.is_empty() {
            return Ok(FixOutput::unchanged(content));
        }

        let Some(mut editor) = FrontmatterEditor::new(content)? else {
            return Ok(FixOutput::unchanged(content));
        };
        let mut changes = 0;
        for (field, value) in &rewrites {
            if editor.set(field, value) {
                changes += 1;
            }
        }
        Ok(FixOutput::new(editor.finish(), changes))
    }
}
