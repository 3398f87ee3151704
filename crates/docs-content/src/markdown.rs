//! Markdown line model: fenced code blocks, inline code spans and
//! MDX-unsafe text.

use std::collections::{HashMap, VecDeque};
use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

/// `<` directly followed by a number, which MDX parses as a JSX tag.
///
/// Every quantifier is bounded; the regex engine is linear-time anyway.
static BARE_NUMBER_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<\d{1,16}(?:\.\d{1,16})?[A-Za-z%]{0,8}").expect("bare number regex is valid")
});

/// What a body line is, with respect to fenced code blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineRole {
    Prose,
    /// Opening fence; `info` is the trimmed info string (language)
    FenceOpen { info: String },
    Code,
    /// Closing fence; `trailing` is any text after the fence marker
    FenceClose { trailing: String },
}

impl LineRole {
    pub fn is_prose(&self) -> bool {
        matches!(self, Self::Prose)
    }
}

/// Roles for every line plus the index of a fence left open at EOF.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FenceScan {
    pub roles: Vec<LineRole>,
    pub unclosed: Option<usize>,
}

#[derive(Debug, Clone, Copy)]
struct OpenFence {
    marker: char,
    width: usize,
}

/// Parse a fence marker at the start of a (leading-whitespace-trimmed)
/// line: three or more backticks or tildes.
///
/// Returns the marker character, its run length and the remaining text.
pub fn fence_marker(line: &str) -> Option<(char, usize, &str)> {
    let trimmed = line.trim_start();
    let marker = trimmed.chars().next().filter(|c| *c == '`' || *c == '~')?;
    let width = trimmed.chars().take_while(|c| *c == marker).count();
    if width < 3 {
        return None;
    }
    let rest = &trimmed[width..];
    // A backtick fence's info string may not contain backticks.
    if marker == '`' && rest.contains('`') {
        return None;
    }
    Some((marker, width, rest))
}

/// Classify each line as prose, fence or code.
///
/// Inside a block, any run of at least the opening width of the same
/// marker closes it; text after that run is reported as `trailing`.
pub fn scan_fences<'a, I>(lines: I) -> FenceScan
where
    I: IntoIterator<Item = &'a str>,
{
    let mut roles = Vec::new();
    let mut open: Option<(OpenFence, usize)> = None;

    for (idx, line) in lines.into_iter().enumerate() {
        let role = match open {
            None => match fence_marker(line) {
                Some((marker, width, rest)) => {
                    open = Some((OpenFence { marker, width }, idx));
                    LineRole::FenceOpen {
                        info: rest.trim().to_string(),
                    }
                }
                None => LineRole::Prose,
            },
            Some((fence, _)) => {
                let trimmed = line.trim_start();
                let run = trimmed.chars().take_while(|c| *c == fence.marker).count();
                if run >= fence.width {
                    open = None;
                    LineRole::FenceClose {
                        trailing: trimmed[run..].trim().to_string(),
                    }
                } else {
                    LineRole::Code
                }
            }
        };
        roles.push(role);
    }

    FenceScan {
        roles,
        unclosed: open.map(|(_, idx)| idx),
    }
}

/// Inline code spans on one line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineCode {
    /// Byte ranges covering each span, backticks included
    pub spans: Vec<Range<usize>>,
    /// False when some backtick run found no partner on the line
    pub balanced: bool,
}

impl InlineCode {
    pub fn contains(&self, offset: usize) -> bool {
        self.spans.iter().any(|span| span.contains(&offset))
    }
}

/// Find inline code spans: a run of N backticks closed by the next run
/// of exactly N backticks.
///
/// Runs are bucketed by length so each is visited a bounded number of
/// times, keeping the scan linear on adversarial input.
pub fn inline_code(line: &str) -> InlineCode {
    let bytes = line.as_bytes();
    let mut runs: Vec<(usize, usize)> = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'`' {
            let start = i;
            while i < bytes.len() && bytes[i] == b'`' {
                i += 1;
            }
            runs.push((start, i - start));
        } else {
            i += 1;
        }
    }

    let mut by_len: HashMap<usize, VecDeque<usize>> = HashMap::new();
    for (idx, (_, len)) in runs.iter().enumerate() {
        by_len.entry(*len).or_default().push_back(idx);
    }

    let mut spans = Vec::new();
    let mut balanced = true;
    let mut idx = 0;
    while idx < runs.len() {
        let (start, len) = runs[idx];
        let partner = by_len.get_mut(&len).and_then(|queue| {
            while queue.front().is_some_and(|&j| j <= idx) {
                queue.pop_front();
            }
            queue.front().copied()
        });
        match partner {
            Some(close) => {
                let (close_start, close_len) = runs[close];
                spans.push(start..close_start + close_len);
                idx = close + 1;
            }
            None => {
                balanced = false;
                idx += 1;
            }
        }
    }

    InlineCode { spans, balanced }
}

/// True when the byte at `offset` follows an odd run of backslashes.
fn is_escaped(line: &str, offset: usize) -> bool {
    let backslashes = line.as_bytes()[..offset]
        .iter()
        .rev()
        .take_while(|b| **b == b'\\')
        .count();
    backslashes % 2 == 1
}

/// Byte ranges of MDX-unsafe `<N` patterns outside inline code.
///
/// An escaped `\<` is text to MDX and is not reported. Lines with
/// unbalanced backticks are skipped: wrapping text in a code span there
/// could pair with the stray backtick and shift every span.
pub fn bare_number_tags(line: &str) -> Vec<Range<usize>> {
    if !line.contains('<') {
        return Vec::new();
    }
    let code = inline_code(line);
    if !code.balanced {
        return Vec::new();
    }
    BARE_NUMBER_TAG
        .find_iter(line)
        .map(|m| m.range())
        .filter(|range| !code.contains(range.start) && !is_escaped(line, range.start))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fence_marker_requires_three() {
        assert_eq!(fence_marker("```rust"), Some(('`', 3, "rust")));
        assert_eq!(fence_marker("  ~~~~"), Some(('~', 4, "")));
        assert_eq!(fence_marker("``inline``"), None);
        assert_eq!(fence_marker("```code``` inline"), None);
    }

    #[test]
    fn test_scan_fences_roles() {
        let lines = ["text", "```", "code", "```python", "after"];
        let scan = scan_fences(lines);
        assert_eq!(scan.roles[0], LineRole::Prose);
        assert_eq!(scan.roles[1], LineRole::FenceOpen { info: String::new() });
        assert_eq!(scan.roles[2], LineRole::Code);
        assert_eq!(
            scan.roles[3],
            LineRole::FenceClose {
                trailing: "python".into()
            }
        );
        assert_eq!(scan.roles[4], LineRole::Prose);
        assert_eq!(scan.unclosed, None);
    }

    #[test]
    fn test_longer_fence_nests_shorter() {
        let lines = ["````markdown", "```rust", "```", "````"];
        let scan = scan_fences(lines);
        assert_eq!(scan.roles[1], LineRole::Code);
        assert_eq!(scan.roles[2], LineRole::Code);
        assert!(matches!(scan.roles[3], LineRole::FenceClose { .. }));
    }

    #[test]
    fn test_unclosed_fence_reported() {
        let scan = scan_fences(["intro", "```bash", "ls"]);
        assert_eq!(scan.unclosed, Some(1));
    }

    #[test]
    fn test_inline_code_spans() {
        let code = inline_code("use `foo` and ``a`b``");
        assert_eq!(code.spans, vec![4..9, 14..21]);
        assert!(code.balanced);
        assert!(!inline_code("stray ` tick").balanced);
    }

    #[test]
    fn test_bare_number_tags() {
        assert_eq!(bare_number_tags("latency <10ms overall"), vec![8..13]);
        assert_eq!(bare_number_tags("p99 <2.5s and <5"), vec![4..9, 14..16]);
        assert!(bare_number_tags("already `<10ms` quoted").is_empty());
        assert!(bare_number_tags("<div> and a < b").is_empty());
        assert!(bare_number_tags("odd ` tick <10ms").is_empty());
    }

    #[test]
    fn test_escaped_bare_number_is_text() {
        assert!(bare_number_tags(r"`a`\<5 units").is_empty());
        assert_eq!(bare_number_tags(r"double \\<5"), vec![9..11]);
        assert_eq!(bare_number_tags("<5<6"), vec![0..2, 2..4]);
    }
}
