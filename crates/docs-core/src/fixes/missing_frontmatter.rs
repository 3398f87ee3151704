//! Starter frontmatter for documents that have none
//!
//! The block is typed by the document folder: the id comes from the
//! number in the file name, the title from the first `# ` heading, and
//! every field the type requires gets a value so the document parses.
//! Fields needing human input are set to `TBD`.

use docs_content::frontmatter::{self, DELIMITER};
use docs_content::lines::dominant_ending;
use docs_content::yaml::render_scalar;
use docs_schema::builtin::{number_of, strip_date_prefix, valid_statuses};
use docs_schema::DocType;
use uuid::Uuid;

use super::{Fix, FixContext, FixOutput};
use crate::Result;

const BOM: char = '\u{feff}';
const PLACEHOLDER: &str = "TBD";

pub struct MissingFrontmatter;

fn slug(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_alphanumeric() {
            out.push(ch);
        } else if !out.ends_with('-') && !out.is_empty() {
            out.push('-');
        }
    }
    out.trim_end_matches('-').to_string()
}

fn document_id(doc_type: DocType, stem: &str) -> String {
    let number = number_of(stem).and_then(|n| n.parse::<u32>().ok());
    match (doc_type.id_prefix(), number) {
        (Some(prefix), Some(n)) => format!("{prefix}-{n:03}"),
        _ => slug(strip_date_prefix(stem)),
    }
}

/// Title-case the words of a file stem, without its type prefix and number.
fn title_from_stem(stem: &str) -> String {
    let stem = strip_date_prefix(stem);
    let words: Vec<&str> = stem.split(['-', '_', ' ']).filter(|w| !w.is_empty()).collect();
    let skip = match words.as_slice() {
        [prefix, number, ..]
            if DocType::from_id(&format!("{prefix}-0")).is_some()
                && number.chars().all(|c| c.is_ascii_digit()) =>
        {
            2
        }
        _ => 0,
    };
    let words = if words.len() > skip { &words[skip..] } else { &words[..] };
    words
        .iter()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn first_heading(body: &str) -> Option<&str> {
    body.lines()
        .find_map(|line| line.strip_prefix("# "))
        .map(str::trim)
        .filter(|title| !title.is_empty())
}

fn fields(ctx: &FixContext<'_>, body: &str) -> Vec<(&'static str, String)> {
    let doc_type = ctx.doc_type;
    let stem = ctx.path.file_stem().unwrap_or_default();
    let today = ctx.today.format("%Y-%m-%d").to_string();
    let title = first_heading(body).map_or_else(|| title_from_stem(stem), str::to_string);

    let mut fields = vec![("id", document_id(doc_type, stem)), ("title", title)];
    let status = valid_statuses(doc_type).first().filter(|_| doc_type != DocType::Memo);
    if let Some(status) = status {
        fields.push(("status", status.to_string()));
    }
    match doc_type {
        DocType::Adr => {
            fields.push(("date", today));
            fields.push(("deciders", PLACEHOLDER.to_string()));
        }
        DocType::Rfc | DocType::Frd | DocType::PrdFaq => {
            fields.push(("author", PLACEHOLDER.to_string()));
            fields.push(("created", today));
        }
        DocType::Memo => {
            fields.push(("author", PLACEHOLDER.to_string()));
            fields.push(("created", today.clone()));
            fields.push(("updated", today));
        }
        DocType::Prd => {
            fields.push(("author", PLACEHOLDER.to_string()));
            fields.push(("created", today.clone()));
            fields.push(("updated", today));
            fields.push(("target_release", PLACEHOLDER.to_string()));
        }
        DocType::Generic => {}
    }
    fields.push(("project_id", ctx.project.project_id().to_string()));
    fields.push(("doc_uuid", Uuid::new_v4().to_string()));
    fields
}

impl Fix for MissingFrontmatter {
    fn name(&self) -> &'static str {
        "missing-frontmatter"
    }

    fn description(&self) -> &'static str {
        "Add a starter frontmatter block to documents without one"
    }

    fn apply_to(&self, ctx: &FixContext<'_>, content: &str) -> Result<FixOutput> {
        if !matches!(frontmatter::split(content), Ok(None)) {
            return Ok(FixOutput::unchanged(content));
        }
        let (bom, body) = match content.strip_prefix(BOM) {
            Some(rest) => (content.len() - rest.len(), rest),
            None => (0, content),
        };
        let ending = dominant_ending(content);

        let mut out = String::with_capacity(content.len() + 256);
        out.push_str(&content[..bom]);
        out.push_str(DELIMITER);
        out.push_str(ending);
        for (key, value) in fields(ctx, body) {
            out.push_str(&format!("{key}: {}{ending}", render_scalar(&value)));
        }
        out.push_str(&format!("tags: []{ending}"));
        out.push_str(DELIMITER);
        out.push_str(ending);
        out.push_str(body);
        Ok(FixOutput::new(out, 1))
    }
}
