//! Unified diffs for dry-run previews

use similar::TextDiff;

/// Render a unified diff between two versions of a file.
///
/// Returns an empty string when the texts are identical.
pub fn unified_diff(label: &str, old: &str, new: &str) -> String {
    if old == new {
        return String::new();
    }
    TextDiff::from_lines(old, new)
        .unified_diff()
        .context_radius(2)
        .header(&format!("a/{label}"), &format!("b/{label}"))
        .to_string()
}

/// Number of lines that differ between two versions.
pub fn changed_lines(old: &str, new: &str) -> usize {
    TextDiff::from_lines(old, new)
        .iter_all_changes()
        .filter(|change| change.tag() != similar::ChangeTag::Equal)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_texts_have_empty_diff() {
        assert_eq!(unified_diff("a.md", "x\n", "x\n"), "");
        assert_eq!(changed_lines("x\n", "x\n"), 0);
    }

    #[test]
    fn test_diff_marks_changed_lines() {
        let diff = unified_diff("adr/a.md", "Line 1   \nLine 2\n", "Line 1\nLine 2\n");
        assert!(diff.contains("--- a/adr/a.md"));
        assert!(diff.contains("-Line 1   "));
        assert!(diff.contains("+Line 1"));
        assert_eq!(changed_lines("Line 1   \nLine 2\n", "Line 1\nLine 2\n"), 2);
    }
}
