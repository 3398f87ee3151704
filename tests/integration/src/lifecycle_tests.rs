//! End-to-end lifecycle: scan -> validate -> fix -> validate
//!
//! Each test builds a small docs-cms tree with the kinds of drift real
//! repositories accumulate, then checks that `fix all` brings it back to
//! a clean report without touching anything it should not.

use chrono::NaiveDate;
use docs_core::fixes::ALL;
use docs_core::{FixOptions, FixRegistry, Phase, RunConfig, Scanner, ValidationReport, Validator};
use docs_test_utils::{docs, TestCms};
use pretty_assertions::assert_eq;

const MESSY_ADR: &str = "---
title: Adopt Rust for tooling
status: accepted
date: 2025/10/13
deciders: Core Team
tags: [Architecture, Decision Making]
id: adr-001
project_id: my-project
---
Intro paragraph
```
cargo build
```
Latency <10ms → 中文

See [the RFC](../rfcs/2025-01-02-rfc-001-api.md).
";

fn drifted_tree() -> TestCms {
    let cms = TestCms::new().with_default_config();
    cms.write_doc("adr/adr-001-adopt-rust.md", MESSY_ADR);
    cms.write_doc("rfcs/rfc-001-api.md", &docs::rfc(1, "API design", "Stable.\n"));
    cms.write_doc("memos/memo-001-planning.md", "# Quarterly planning\n\nGoals for Q4.\n");
    cms
}

fn config(cms: &TestCms) -> RunConfig {
    RunConfig::load(cms.root(), None).unwrap().with_skip_build(true)
}

fn options(dry_run: bool) -> FixOptions {
    FixOptions {
        dry_run,
        diff: false,
        today: NaiveDate::from_ymd_opt(2025, 10, 14).unwrap(),
    }
}

fn phases(report: &ValidationReport) -> Vec<Phase> {
    let mut phases: Vec<Phase> = report
        .documents
        .iter()
        .flat_map(|d| d.errors.iter().map(|i| i.phase))
        .collect();
    phases.sort();
    phases.dedup();
    phases
}

#[test]
fn test_fix_all_turns_drifted_tree_green() {
    let cms = drifted_tree();
    let config = config(&cms);

    // The memo has no frontmatter yet, so it is reported but not checked.
    let scan = Scanner::new(&config).scan();
    assert_eq!(scan.documents.len(), 2);
    assert_eq!(scan.issues.len(), 1);
    assert!(scan.issues[0].message.contains("memos/memo-001-planning.md"));

    let before = Validator::new(&config).run();
    assert_eq!(before.exit_code(), 1);
    assert_eq!(phases(&before), vec![Phase::Schema, Phase::Links, Phase::Format]);

    let files = Scanner::new(&config).discover();
    let summary = FixRegistry::with_builtins()
        .run(ALL, &files, &config, &options(false))
        .unwrap();
    assert!(summary.failures.is_empty(), "{:?}", summary.failures);
    assert_eq!(summary.changed.len(), 2);

    let after = Validator::new(&config).run();
    assert_eq!(after.scanned, 3);
    assert!(after.run_issues.is_empty(), "{:?}", after.run_issues);
    let remaining: Vec<_> = after.documents.iter().flat_map(|d| d.errors.iter()).collect();
    assert!(remaining.is_empty(), "{remaining:?}");
    assert_eq!(after.exit_code(), 0);

    let adr = cms.read_doc("adr/adr-001-adopt-rust.md");
    assert!(adr.contains("status: Accepted\ndate: 2025-10-13\n"));
    assert!(adr.contains("tags: [architecture, decision-making]\n"));
    assert!(adr.contains("Intro paragraph\n\n```text\ncargo build\n```\n\nLatency `<10ms` → 中文\n"));
    assert!(adr.contains("[the RFC](../rfcs/rfc-001-api)"));

    let memo = cms.read_doc("memos/memo-001-planning.md");
    assert!(memo.starts_with("---\nid: memo-001\ntitle: Quarterly planning\n"));
    assert!(memo.ends_with("---\n# Quarterly planning\n\nGoals for Q4.\n"));

    assert_eq!(cms.read_doc("rfcs/rfc-001-api.md"), docs::rfc(1, "API design", "Stable.\n"));
}

#[test]
fn test_second_fix_run_is_a_no_op() {
    let cms = drifted_tree();
    let config = config(&cms);
    let files = Scanner::new(&config).discover();
    let registry = FixRegistry::with_builtins();

    registry.run(ALL, &files, &config, &options(false)).unwrap();
    let snapshot: Vec<String> = files.iter().map(|f| std::fs::read_to_string(f.path.to_native()).unwrap()).collect();

    let again = registry.run(ALL, &files, &config, &options(false)).unwrap();
    assert_eq!(again.total_changes(), 0);
    let unchanged: Vec<String> = files.iter().map(|f| std::fs::read_to_string(f.path.to_native()).unwrap()).collect();
    assert_eq!(snapshot, unchanged);
}

#[test]
fn test_dry_run_predicts_real_run() {
    let cms = drifted_tree();
    let config = config(&cms);
    let files = Scanner::new(&config).discover();
    let registry = FixRegistry::with_builtins();

    let predicted = registry.run(ALL, &files, &config, &options(true)).unwrap();
    assert_eq!(cms.read_doc("adr/adr-001-adopt-rust.md"), MESSY_ADR);
    assert_eq!(Validator::new(&config).run().exit_code(), 1);

    let applied = registry.run(ALL, &files, &config, &options(false)).unwrap();
    assert_eq!(predicted.total_changes(), applied.total_changes());
    for (dry, real) in predicted.changed.iter().zip(&applied.changed) {
        assert_eq!(dry.rel_path, real.rel_path);
        assert_eq!(dry.applied, real.applied);
    }
}

#[test]
fn test_unparseable_document_survives_fix_all() {
    let cms = drifted_tree();
    let broken = "---\ntitle: Broken\ntitle: Twice\n---\nBody   \n";
    cms.write_doc("adr/adr-002-broken.md", broken);
    let config = config(&cms);
    let files = Scanner::new(&config).discover();

    let summary = FixRegistry::with_builtins()
        .run(ALL, &files, &config, &options(false))
        .unwrap();
    assert!(summary.failures.is_empty(), "{:?}", summary.failures);
    assert_eq!(
        cms.read_doc("adr/adr-002-broken.md"),
        "---\ntitle: Broken\ntitle: Twice\n---\nBody\n"
    );

    let report = Validator::new(&config).run();
    assert_eq!(report.exit_code(), 1);
    let errors: Vec<_> = report.documents.iter().flat_map(|d| d.errors.iter()).collect();
    assert_eq!(errors.len(), 1, "{errors:?}");
    assert_eq!(errors[0].phase, Phase::Parse);
    assert_eq!(errors[0].line, Some(3));
}

#[test]
fn test_json_report_round_trips_counts() {
    let cms = drifted_tree();
    let report = Validator::new(&config(&cms)).run();
    let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    assert_eq!(json["scanned"], 2);
    assert_eq!(json["error_count"], report.error_count);
    assert_eq!(json["warning_count"], report.warning_count);
}
