//! Internal link phase
//!
//! Only links into the repository are resolved. External URLs, bare
//! anchors and absolute site routes are classified and left alone;
//! anchors are never checked against headings.

use std::sync::LazyLock;

use docs_content::links::extract_links;
use docs_content::RawLink;
use docs_fs::NormalizedPath;
use docs_schema::builtin::strip_date_prefix;
use docs_schema::StructureConfig;
use regex::Regex;
use serde::Serialize;

use crate::document::DocumentRecord;
use crate::report::{Issue, Phase};

static SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.-]*:").expect("scheme regex is valid"));

/// What a link target points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LinkKind {
    External,
    Anchor,
    /// Absolute route served by the site generator
    SiteRoute,
    InternalAdr,
    InternalRfc,
    InternalMemo,
    InternalPrd,
    InternalDoc,
}

impl LinkKind {
    pub fn is_internal(&self) -> bool {
        !matches!(self, LinkKind::External | LinkKind::Anchor | LinkKind::SiteRoute)
    }
}

/// A link with its resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkReference {
    pub raw_target: String,
    pub kind: LinkKind,
    /// Target after relative resolution; `None` for links that are not resolved
    pub resolved_path: Option<NormalizedPath>,
    pub anchor: Option<String>,
    pub line: usize,
}

/// Split `target` into its path part and `#fragment`, dropping any query.
pub fn split_target(target: &str) -> (&str, Option<&str>) {
    let (rest, anchor) = match target.split_once('#') {
        Some((rest, anchor)) => (rest, Some(anchor)),
        None => (target, None),
    };
    let path = rest.split_once('?').map_or(rest, |(path, _)| path);
    (path, anchor)
}

pub fn classify(target: &str, structure: &StructureConfig) -> LinkKind {
    if SCHEME.is_match(target) || target.starts_with("//") {
        return LinkKind::External;
    }
    if target.starts_with('#') {
        return LinkKind::Anchor;
    }
    if target.starts_with('/') {
        return LinkKind::SiteRoute;
    }

    let (path, _) = split_target(target);
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let file = segments
        .last()
        .map(|name| strip_date_prefix(name).to_ascii_lowercase())
        .unwrap_or_default();
    let in_folder = |dir: &str| segments.iter().any(|s| *s == dir.trim_matches('/'));

    if in_folder(&structure.adr_dir) || file.starts_with("adr-") {
        LinkKind::InternalAdr
    } else if in_folder(&structure.rfc_dir) || file.starts_with("rfc-") {
        LinkKind::InternalRfc
    } else if in_folder(&structure.memo_dir) || file.starts_with("memo-") {
        LinkKind::InternalMemo
    } else if in_folder(&structure.prd_dir) || file.starts_with("prd-") {
        LinkKind::InternalPrd
    } else {
        LinkKind::InternalDoc
    }
}

fn percent_decode(text: &str) -> String {
    if !text.contains('%') {
        return text.to_string();
    }
    let bytes = text.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let decoded = (bytes[i] == b'%')
            .then(|| text.get(i + 1..i + 3))
            .flatten()
            .and_then(|hex| u8::from_str_radix(hex, 16).ok());
        match decoded {
            Some(byte) => {
                out.push(byte);
                i += 3;
            }
            None => {
                out.push(bytes[i]);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// Whether `path` names something on disk, trying Markdown extensions and
/// index pages for extensionless targets.
pub fn target_exists(path: &NormalizedPath) -> bool {
    if path.exists() {
        return true;
    }
    if path.extension().is_some() {
        return false;
    }
    let base = path.as_str().trim_end_matches('/');
    ["md", "mdx"]
        .iter()
        .any(|ext| NormalizedPath::new(format!("{base}.{ext}")).is_file())
        || ["index.md", "index.mdx"]
            .iter()
            .any(|index| path.join(index).is_file())
}

/// Classify and resolve one link found in `doc_dir`.
pub fn resolve(link: &RawLink, doc_dir: &NormalizedPath, structure: &StructureConfig) -> LinkReference {
    let kind = classify(&link.target, structure);
    let (path, anchor) = split_target(&link.target);
    let resolved_path = (kind.is_internal() && !path.is_empty())
        .then(|| doc_dir.join(&percent_decode(path)).clean());
    LinkReference {
        raw_target: link.target.clone(),
        kind,
        resolved_path,
        anchor: anchor.filter(|a| !a.is_empty()).map(str::to_string),
        line: link.line,
    }
}

/// Every link in the document body, classified and resolved.
pub fn references(doc: &DocumentRecord, structure: &StructureConfig) -> Vec<LinkReference> {
    let doc_dir = doc.path.parent().unwrap_or_else(|| NormalizedPath::new("."));
    extract_links(doc.body(), doc.body_line)
        .iter()
        .map(|link| resolve(link, &doc_dir, structure))
        .collect()
}

/// Report one error per internal link whose target does not exist.
pub fn check(doc: &DocumentRecord, structure: &StructureConfig) -> Vec<Issue> {
    references(doc, structure)
        .into_iter()
        .filter_map(|reference| {
            let resolved = reference.resolved_path.as_ref()?;
            if target_exists(resolved) {
                return None;
            }
            tracing::debug!(doc = %doc.rel_path, target = %reference.raw_target, "broken link");
            Some(
                Issue::error(
                    Phase::Links,
                    format!(
                        "broken link `{}`: {} does not exist",
                        reference.raw_target, resolved
                    ),
                )
                .at_line(Some(reference.line)),
            )
        })
        .collect()
}
