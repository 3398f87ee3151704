//! Frontmatter schema phase

use docs_schema::{ProjectConfig, SchemaRegistry};

use crate::document::DocumentRecord;
use crate::report::{Issue, Phase};

/// Check a document's frontmatter against its type's schema.
///
/// Documents whose frontmatter failed to parse are not checked again.
pub fn check(doc: &DocumentRecord, registry: &SchemaRegistry, project: &ProjectConfig) -> Vec<Issue> {
    let Some(frontmatter) = doc.frontmatter.as_ref() else {
        return Vec::new();
    };
    let schema = match registry.get_schema(doc.doc_type) {
        Ok(schema) => schema,
        Err(e) => return vec![Issue::error(Phase::Schema, e.to_string())],
    };

    let mut issues: Vec<Issue> = schema
        .check(frontmatter, doc.file_stem())
        .into_iter()
        .map(|v| Issue::error(Phase::Schema, v.message).at_line(v.line))
        .collect();

    if let Some(id) = frontmatter.get_str("project_id") {
        if id != project.project_id() && !id.trim().is_empty() {
            issues.push(
                Issue::warning(
                    Phase::Schema,
                    format!(
                        "`project_id` value `{id}` differs from the configured project `{}`",
                        project.project_id()
                    ),
                )
                .at_line(frontmatter.line_of("project_id")),
            );
        }
    }
    issues
}
