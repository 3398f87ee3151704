//! Tests for the Markdown line model

use docs_content::links::extract_links;
use docs_content::markdown::{bare_number_tags, inline_code, scan_fences};
use proptest::prelude::*;
use std::time::{Duration, Instant};

#[test]
fn test_links_inside_fences_are_skipped() {
    let body = "See [real](./real.md).\n\n```markdown\n[fake](./fake.md)\n```\n\n~~~\n[also](./no.md)\n~~~\n";

    let links = extract_links(body, 10);

    assert_eq!(links.len(), 1);
    assert_eq!(links[0].target, "./real.md");
    assert_eq!(links[0].line, 10);
}

#[test]
fn test_link_line_numbers_follow_body_offset() {
    let body = "\nfirst\n\n[x](../rfcs/x.md)\n";

    let links = extract_links(body, 12);

    assert_eq!(links[0].line, 15);
}

#[test]
fn test_adversarial_backticks_complete_quickly() {
    let mut line = String::new();
    for len in 1..400 {
        line.push_str(&"`".repeat(len));
        line.push('x');
    }
    let started = Instant::now();

    let code = inline_code(&line);

    assert!(!code.balanced);
    assert!(started.elapsed() < Duration::from_secs(2));
}

#[test]
fn test_bare_number_scan_is_linear_on_large_input() {
    let line = "<1".repeat(200_000);
    let started = Instant::now();

    let found = bare_number_tags(&line);

    assert_eq!(found.len(), 200_000);
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[test]
fn test_empty_inputs() {
    assert!(bare_number_tags("").is_empty());
    assert!(extract_links("", 1).is_empty());
    assert_eq!(scan_fences(std::iter::empty::<&str>()).roles.len(), 0);
}

proptest! {
    #[test]
    fn test_inline_spans_are_ordered_and_disjoint(line in "[a-z` ]{0,60}") {
        let code = inline_code(&line);
        for pair in code.spans.windows(2) {
            prop_assert!(pair[0].end <= pair[1].start);
        }
        for span in &code.spans {
            prop_assert!(line[span.clone()].starts_with('`'));
            prop_assert!(line[span.clone()].ends_with('`'));
        }
    }

    #[test]
    fn test_scan_fences_yields_one_role_per_line(lines in proptest::collection::vec("(```|~~~|[a-z ]{0,10})", 0..30)) {
        let scan = scan_fences(lines.iter().map(String::as_str));
        prop_assert_eq!(scan.roles.len(), lines.len());
    }
}
