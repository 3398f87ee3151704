//! Document types known to the CMS

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::Error;

static ID_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?i)([a-z]+)-\d+").expect("id prefix regex is valid"));

/// Kind of document, which selects the frontmatter schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocType {
    /// Architecture decision record
    Adr,
    /// Request for comments
    Rfc,
    Memo,
    /// Product requirements document
    Prd,
    /// Feature requirements document
    Frd,
    /// Press release plus FAQ
    PrdFaq,
    /// Anything without a dedicated schema
    Generic,
}

impl DocType {
    pub const ALL: [DocType; 7] = [
        DocType::Adr,
        DocType::Rfc,
        DocType::Memo,
        DocType::Prd,
        DocType::Frd,
        DocType::PrdFaq,
        DocType::Generic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DocType::Adr => "adr",
            DocType::Rfc => "rfc",
            DocType::Memo => "memo",
            DocType::Prd => "prd",
            DocType::Frd => "frd",
            DocType::PrdFaq => "prdfaq",
            DocType::Generic => "generic",
        }
    }

    /// Short label used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            DocType::Adr => "ADR",
            DocType::Rfc => "RFC",
            DocType::Memo => "Memo",
            DocType::Prd => "PRD",
            DocType::Frd => "FRD",
            DocType::PrdFaq => "PRD-FAQ",
            DocType::Generic => "Document",
        }
    }

    /// Prefix of ids such as `adr-001`.
    pub fn id_prefix(&self) -> Option<&'static str> {
        match self {
            DocType::Generic => None,
            other => Some(other.as_str()),
        }
    }

    /// Infer a type from an id like `rfc-015`.
    pub fn from_id(id: &str) -> Option<Self> {
        let prefix = ID_PREFIX.captures(id.trim())?.get(1)?.as_str().to_lowercase();
        DocType::ALL
            .into_iter()
            .find(|t| t.id_prefix() == Some(prefix.as_str()))
    }
}

impl FromStr for DocType {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "adr" | "adrs" => Ok(DocType::Adr),
            "rfc" | "rfcs" => Ok(DocType::Rfc),
            "memo" | "memos" => Ok(DocType::Memo),
            "prd" | "prds" => Ok(DocType::Prd),
            "frd" | "frds" => Ok(DocType::Frd),
            "prdfaq" | "prd-faq" | "prdfaqs" => Ok(DocType::PrdFaq),
            "generic" | "doc" | "docs" => Ok(DocType::Generic),
            _ => Err(Error::unknown_doc_type(s)),
        }
    }
}

impl fmt::Display for DocType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
