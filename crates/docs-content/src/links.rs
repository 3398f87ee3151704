//! Markdown link extraction
//!
//! Only prose is considered: fenced code blocks and inline code spans
//! never yield links.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use crate::lines::split_lines;
use crate::markdown::{inline_code, scan_fences};

static INLINE_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(!?)\[([^\[\]\n]*)\]\(\s*<?([^()\s<>]+)>?(?:\s+(?:"[^"\n]*"|'[^'\n]*'))?\s*\)"#)
        .expect("inline link regex is valid")
});

static REFERENCE_DEFINITION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^ {0,3}\[([^\]\n]+)\]:\s*<?([^\s<>]+)>?"#).expect("reference regex is valid")
});

/// A link as written in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLink {
    pub text: String,
    pub target: String,
    /// 1-based file line
    pub line: usize,
    /// Byte range of `target` within its line
    pub target_range: Range<usize>,
    pub is_image: bool,
}

/// Extract links from one prose line.
pub fn links_in_line(line: &str, line_no: usize) -> Vec<RawLink> {
    if !line.contains("](") && !line.contains("]:") {
        return Vec::new();
    }
    let code = inline_code(line);
    let mut links = Vec::new();

    for caps in INLINE_LINK.captures_iter(line) {
        let (Some(whole), Some(target)) = (caps.get(0), caps.get(3)) else {
            continue;
        };
        if code.contains(whole.start()) {
            continue;
        }
        links.push(RawLink {
            text: caps.get(2).map_or("", |m| m.as_str()).to_string(),
            target: target.as_str().to_string(),
            line: line_no,
            target_range: target.range(),
            is_image: caps.get(1).is_some_and(|m| !m.as_str().is_empty()),
        });
    }

    let definition = REFERENCE_DEFINITION
        .captures(line)
        .and_then(|caps| Some((caps.get(1)?, caps.get(2)?)));
    if let Some((label, target)) = definition {
        links.push(RawLink {
            text: label.as_str().to_string(),
            target: target.as_str().to_string(),
            line: line_no,
            target_range: target.range(),
            is_image: false,
        });
    }

    links
}

/// Extract every link from a Markdown body whose first line sits on file
/// line `first_line`.
pub fn extract_links(body: &str, first_line: usize) -> Vec<RawLink> {
    let lines = split_lines(body);
    let scan = scan_fences(lines.iter().map(|l| l.text));
    lines
        .iter()
        .zip(&scan.roles)
        .enumerate()
        .filter(|(_, (_, role))| role.is_prose())
        .flat_map(|(idx, (line, _))| links_in_line(line.text, first_line + idx))
        .collect()
}
