//! Tests for frontmatter parsing

use docs_content::frontmatter::{Frontmatter, parse};
use docs_content::Error;
use pretty_assertions::assert_eq;
use serde_yaml::Value;

const VALID_ADR: &str = r#"---
id: "adr-001"
title: "Test Decision"
status: Accepted
date: 2025-10-13
deciders: Team
tags: ["test"]
project_id: "test-project"
doc_uuid: "8b063564-82a5-4a21-943f-e868388d36b9"
---

# ADR-001: Test Decision
"#;

#[test]
fn test_parse_valid_document() {
    let doc = parse(VALID_ADR).unwrap();

    assert_eq!(doc.frontmatter.get_str("id"), Some("adr-001"));
    assert_eq!(doc.frontmatter.get_str("status"), Some("Accepted"));
    // Dates stay strings; YAML 1.2 has no timestamp type.
    assert_eq!(doc.frontmatter.get_str("date"), Some("2025-10-13"));
    assert_eq!(doc.frontmatter.string_list("tags"), Some(vec!["test".to_string()]));
    assert_eq!(doc.body, "\n# ADR-001: Test Decision\n");
    assert_eq!(doc.body_line, 11);
}

#[test]
fn test_key_lines_are_file_lines() {
    let doc = parse(VALID_ADR).unwrap();

    assert_eq!(doc.frontmatter.line_of("id"), Some(2));
    assert_eq!(doc.frontmatter.line_of("doc_uuid"), Some(9));
    assert_eq!(doc.frontmatter.line_of("missing"), None);
}

#[test]
fn test_keys_in_document_order() {
    let doc = parse(VALID_ADR).unwrap();
    let keys: Vec<_> = doc.frontmatter.keys().collect();

    assert_eq!(
        keys,
        vec!["id", "title", "status", "date", "deciders", "tags", "project_id", "doc_uuid"]
    );
}

#[test]
fn test_missing_frontmatter_is_distinct_error() {
    assert_eq!(parse("# Title\n\nText\n").unwrap_err(), Error::MissingFrontmatter);
}

#[test]
fn test_malformed_yaml_reports_file_line() {
    let content = "---\ntitle: ok\ntags: [unclosed\n---\nbody\n";

    let err = parse(content).unwrap_err();

    match err {
        Error::Yaml { line, message } => {
            assert!(line.map_or(true, |l| l >= 2), "line was {line:?}");
            assert!(!message.contains("column"));
        }
        other => panic!("expected YAML error, got {other:?}"),
    }
}

#[test]
fn test_duplicate_keys_are_rejected() {
    let content = "---\nstatus: Draft\ntitle: Something\nstatus: Accepted\n---\n";

    let err = parse(content).unwrap_err();

    assert_eq!(
        err,
        Error::DuplicateKey {
            key: "status".into(),
            line: 4
        }
    );
    assert_eq!(err.line(), Some(4));
}

#[test]
fn test_nested_keys_do_not_count_as_duplicates() {
    let content = "---\nauthor:\n  name: A\nreviewer:\n  name: B\n---\n";

    let doc = parse(content).unwrap();

    assert_eq!(doc.frontmatter.len(), 2);
}

#[test]
fn test_scalar_frontmatter_is_not_a_mapping() {
    let err = Frontmatter::from_yaml("just text\n", 2).unwrap_err();

    assert_eq!(err, Error::NotAMapping { found: "string".into() });
}

#[test]
fn test_string_list_accepts_scalar_and_numbers() {
    let fm = Frontmatter::from_yaml("tags: Architecture\nnums: [1, two]\nempty:\n", 2).unwrap();

    assert_eq!(fm.string_list("tags"), Some(vec!["Architecture".to_string()]));
    assert_eq!(fm.string_list("nums"), Some(vec!["1".to_string(), "two".to_string()]));
    assert_eq!(fm.string_list("empty"), Some(vec![]));
    assert_eq!(fm.get("empty"), Some(&Value::Null));
    assert!(!fm.has_value("empty"));
}
