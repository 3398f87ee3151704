use docs_content::yaml::render_scalar;
use docs_content::{frontmatter, FrontmatterEditor};
use uuid::Uuid;

use super::{Fix, FixContext, FixOutput};
use crate::Result;

/// Fills in `doc_uuid`, `project_id` and `tags` when they are missing or
/// blank. Documents whose frontmatter does not parse are left alone.
pub struct FrontmatterFields;

impl Fix for FrontmatterFields {
    fn name(&self) -> &'static str {
        "frontmatter-fields"
    }

    fn description(&self) -> &'static str {
        "Add missing doc_uuid, project_id and tags fields"
    }

    fn apply_to(&self, ctx: &FixContext<'_>, content: &str) -> Result<FixOutput> {
        let Ok(parsed) = frontmatter::parse(content) else {
            return Ok(FixOutput::unchanged(content));
        };
        let Some(mut editor) = FrontmatterEditor::new(content)? else {
            return Ok(FixOutput::unchanged(content));
        };
        let fm = &parsed.frontmatter;

        let mut changes = 0;
        if !fm.has_value("doc_uuid") && editor.set("doc_uuid", &Uuid::new_v4().to_string()) {
            changes += 1;
        }
        if !fm.has_value("project_id") && editor.set("project_id", &render_scalar(ctx.project.project_id())) {
            changes += 1;
        }
        let tags_missing = fm.get("tags").is_none_or(serde_yaml::Value::is_null);
        if tags_missing && editor.set("tags", "[]") {
            changes += 1;
        }
        Ok(FixOutput::new(editor.finish(), changes))
    }
}
