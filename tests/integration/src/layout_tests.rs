//! Custom layouts: CMS root detection, configured folders and classification

use std::fs;
use std::path::Path;

use docs_core::{Phase, RunConfig, Scanner, Severity, Validator};
use docs_schema::DocType;
use docs_test_utils::docs;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const CUSTOM_CONFIG: &str = "\
project:
  id: my-project
  name: Acme Docs
structure:
  adr_dir: decisions
  document_folders: [decisions, guides]
";

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn generic(title: &str, n: u32, extra: &str) -> String {
    format!(
        "---\ntitle: {title}\n{extra}project_id: my-project\ndoc_uuid: {}\n---\nBody\n",
        docs::uuid(n)
    )
}

#[test]
fn test_repo_root_is_cms_root_without_docs_cms() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "adr/adr-001-use-rust.md", &docs::adr(1, "Use Rust for the CLI", "Body\n"));

    let config = RunConfig::load(temp.path(), None).unwrap();
    assert_eq!(config.cms_root(), config.repo_root());
    let report = Validator::new(&config.with_skip_build(true)).run();
    assert_eq!(report.scanned, 1);
    assert_eq!(report.exit_code(), 0);
}

#[test]
fn test_explicit_cms_dir() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "site/adr/adr-001-use-rust.md", &docs::adr(1, "Use Rust for the CLI", "Body\n"));
    write(temp.path(), "docs-cms/adr/adr-002-ignored.md", "not a document\n");

    let config = RunConfig::load(temp.path(), Some("site")).unwrap();
    let files = Scanner::new(&config).discover();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].rel_path, "adr/adr-001-use-rust.md");

    assert!(RunConfig::load(temp.path(), Some("missing")).is_err());
}

#[test]
fn test_configured_folders_drive_classification() {
    let temp = TempDir::new().unwrap();
    let cms = temp.path().join("docs-cms");
    write(&cms, "docs-project.yaml", CUSTOM_CONFIG);
    write(&cms, "decisions/adr-001-use-rust.md", &docs::adr(1, "Use Rust for the CLI", "Body\n"));
    write(&cms, "guides/getting-started.md", &generic("Getting Started", 50, ""));
    write(&cms, "guides/streaming.md", &generic("Streaming", 51, "id: rfc-007\n"));
    write(&cms, "adr/adr-009-not-scanned.md", "no frontmatter\n");

    let config = RunConfig::load(temp.path(), None).unwrap().with_skip_build(true);
    let report = Validator::new(&config).run();

    let types: Vec<(&str, DocType)> = report
        .documents
        .iter()
        .map(|d| (d.rel_path.as_str(), d.doc_type))
        .collect();
    assert_eq!(
        types,
        vec![
            ("decisions/adr-001-use-rust.md", DocType::Adr),
            ("guides/getting-started.md", DocType::Generic),
            ("guides/streaming.md", DocType::Rfc),
        ]
    );

    // `guides` maps to no type
    assert_eq!(report.run_issues.len(), 1);
    assert_eq!(report.run_issues[0].phase, Phase::Config);
    assert_eq!(report.run_issues[0].severity, Severity::Warning);

    let streaming = &report.documents[2];
    let messages: Vec<&str> = streaming.errors.iter().map(|i| i.message.as_str()).collect();
    assert!(messages.iter().any(|m| m.contains("`status`")), "{messages:?}");
    assert!(messages.iter().any(|m| m.contains("`author`")), "{messages:?}");
    assert!(report.documents[0].errors.is_empty());
    assert!(report.documents[1].errors.is_empty());
}

#[test]
fn test_templates_and_placeholders_are_not_scanned() {
    let temp = TempDir::new().unwrap();
    let cms = temp.path().join("docs-cms");
    write(&cms, "adr/adr-001-use-rust.md", &docs::adr(1, "Use Rust for the CLI", "Body\n"));
    write(&cms, "adr/000-template.md", "---\ntitle: {{title}}\n---\n");
    write(&cms, "adr/README.md", "# ADRs\n");
    write(&cms, "adr/notes.txt", "not markdown\n");
    write(&cms, "adr/.drafts/adr-003-wip.md", "# draft\n");

    let config = RunConfig::load(temp.path(), None).unwrap();
    let files: Vec<String> = Scanner::new(&config).discover().into_iter().map(|f| f.rel_path).collect();
    assert_eq!(files, vec!["adr/adr-001-use-rust.md".to_string()]);
}
