//! Bulk frontmatter updates over a docs tree

use std::fs;

use docs_core::{BulkOperation, BulkUpdate, Error, RunConfig, Scanner};
use docs_test_utils::{docs, TestCms};
use pretty_assertions::assert_eq;

fn tree() -> TestCms {
    let cms = TestCms::new().with_default_config();
    cms.write_doc("adr/adr-001-use-rust.md", &docs::adr(1, "Use Rust for the CLI", "Body\n"));
    cms.write_doc("adr/adr-002-use-yaml.md", &docs::adr(2, "Use YAML frontmatter", "Body\n"));
    cms.write_doc("rfcs/rfc-001-api.md", &docs::rfc(1, "API design", "Body\n"));
    cms.write_doc("memos/notes.md", "# Notes without frontmatter\n");
    cms
}

fn files(cms: &TestCms) -> Vec<docs_core::DiscoveredFile> {
    let config = RunConfig::load(cms.root(), None).unwrap();
    Scanner::new(&config).discover()
}

#[test]
fn test_add_tag_across_tree() {
    let cms = tree();
    let update = BulkUpdate::new("tags", BulkOperation::Add).with_value("platform");
    let summary = update.run(&files(&cms), false).unwrap();

    assert_eq!(summary.changed.len(), 3);
    assert_eq!(summary.skipped, vec!["memos/notes.md".to_string()]);
    assert!(summary.failures.is_empty());
    assert_eq!(summary.exit_code(), 0);
    assert!(cms
        .read_doc("adr/adr-001-use-rust.md")
        .contains("tags: [architecture, platform]\n"));

    let again = update.run(&files(&cms), false).unwrap();
    assert!(again.changed.is_empty());
    assert_eq!(again.unchanged, 3);
}

#[test]
fn test_dry_run_reports_without_writing() {
    let cms = tree();
    let before = cms.read_doc("rfcs/rfc-001-api.md");
    let update = BulkUpdate::new("status", BulkOperation::Set).with_value("In Review");
    let summary = update.run(&files(&cms), true).unwrap();

    assert!(summary.dry_run);
    assert_eq!(summary.changed.len(), 3);
    assert_eq!(cms.read_doc("rfcs/rfc-001-api.md"), before);
}

#[test]
fn test_rename_keeps_value_and_position() {
    let cms = tree();
    let update = BulkUpdate::new("date", BulkOperation::Rename).with_new_name("created");
    let summary = update.run(&files(&cms), false).unwrap();

    assert_eq!(
        summary.changed,
        vec!["adr/adr-001-use-rust.md".to_string(), "adr/adr-002-use-yaml.md".to_string()]
    );
    assert_eq!(summary.unchanged, 1);
    let content = cms.read_doc("adr/adr-002-use-yaml.md");
    assert!(content.contains("status: Accepted\ncreated: 2025-10-13\ndeciders:"));
}

#[test]
fn test_broken_file_is_a_failure_not_an_abort() {
    let cms = tree();
    cms.write_doc("adr/adr-003-broken.md", "---\ntitle: Never closed\n");
    let update = BulkUpdate::new("tags", BulkOperation::Remove).with_value("architecture");
    let summary = update.run(&files(&cms), false).unwrap();

    assert_eq!(summary.failures.len(), 1);
    assert_eq!(summary.failures[0].path, "adr/adr-003-broken.md");
    assert_eq!(summary.changed.len(), 2);
    assert_eq!(summary.exit_code(), 1);
    assert_eq!(
        fs::read_to_string(cms.cms_root().join("adr/adr-003-broken.md")).unwrap(),
        "---\ntitle: Never closed\n"
    );
}

#[test]
fn test_invalid_update_rejected_up_front() {
    let cms = tree();
    let err = BulkUpdate::new("tags", BulkOperation::Add)
        .run(&files(&cms), false)
        .unwrap_err();
    assert!(matches!(err, Error::InvalidUpdate { .. }));
    assert!(cms.read_doc("adr/adr-001-use-rust.md").contains("tags: [architecture]\n"));
}
