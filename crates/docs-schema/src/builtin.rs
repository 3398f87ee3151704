//! Built-in schemas for every [`DocType`]

use std::sync::LazyLock;

use regex::Regex;

use crate::schema::{Constraint, CrossFieldRule, FieldContext, FieldRule, FieldType, Schema};
use crate::DocType;

pub const ADR_STATUSES: &[&str] = &["Proposed", "Accepted", "Implemented", "Deprecated", "Superseded"];
pub const RFC_STATUSES: &[&str] = &[
    "Draft",
    "Proposed",
    "In Review",
    "Accepted",
    "Rejected",
    "Implemented",
    "Deprecated",
    "Superseded",
];
pub const MEMO_STATUSES: &[&str] = &["Draft", "Published", "Archived"];
pub const PRD_STATUSES: &[&str] = &["Draft", "In Review", "Approved", "In Progress", "Completed", "Cancelled"];
pub const FRD_STATUSES: &[&str] = &["Draft", "In Review", "Approved", "Implemented", "Deprecated"];
pub const PRDFAQ_STATUSES: &[&str] = &["Draft", "In Review", "Approved", "Archived"];

/// Tags are lowercase words joined by hyphens.
pub const TAG_PATTERN: &str = r"^[a-z0-9-]+$";

static NUMBERED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?i)[a-z]+-(\d+)").expect("numbered regex is valid"));

static DATE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}-").expect("date prefix regex is valid"));

/// Status values for a type; empty for types without a status field.
pub fn valid_statuses(doc_type: DocType) -> &'static [&'static str] {
    match doc_type {
        DocType::Adr => ADR_STATUSES,
        DocType::Rfc => RFC_STATUSES,
        DocType::Memo => MEMO_STATUSES,
        DocType::Prd => PRD_STATUSES,
        DocType::Frd => FRD_STATUSES,
        DocType::PrdFaq => PRDFAQ_STATUSES,
        DocType::Generic => &[],
    }
}

/// Strip a leading `YYYY-MM-DD-` from a file stem.
pub fn strip_date_prefix(stem: &str) -> &str {
    match DATE_PREFIX.find(stem) {
        Some(m) => &stem[m.end()..],
        None => stem,
    }
}

/// Digits of a `prefix-NNN` name, e.g. `001` for `adr-001-use-rust`.
pub fn number_of(name: &str) -> Option<&str> {
    NUMBERED
        .captures(strip_date_prefix(name))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

fn same_number(a: &str, b: &str) -> bool {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

fn id_matches_filename(ctx: &FieldContext<'_>) -> Option<String> {
    let id = ctx.value.as_str()?;
    let id_number = number_of(id)?;
    let file_number = number_of(ctx.file_stem)?;
    (!same_number(id_number, file_number)).then(|| {
        format!(
            "`id` value `{id}` does not match the number in file name `{}` ({file_number})",
            ctx.file_stem
        )
    })
}

/// The id's number must equal the number in the file name.
pub const ID_MATCHES_FILENAME: CrossFieldRule = CrossFieldRule {
    name: "id-matches-filename",
    check: id_matches_filename,
};

fn title(min: usize) -> FieldRule {
    FieldRule::required("title")
        .with(Constraint::Type(FieldType::String))
        .with(Constraint::MinLength(min))
}

fn status(values: &'static [&'static str]) -> FieldRule {
    FieldRule::required("status")
        .with(Constraint::Type(FieldType::String))
        .with(Constraint::Enum(values))
}

fn date(name: &'static str) -> FieldRule {
    FieldRule::required(name)
        .with(Constraint::Type(FieldType::String))
        .with(Constraint::DateFormat)
}

fn optional_date(name: &'static str) -> FieldRule {
    FieldRule::optional(name)
        .with(Constraint::Type(FieldType::String))
        .with(Constraint::DateFormat)
}

fn author() -> FieldRule {
    FieldRule::required("author")
        .with(Constraint::Type(FieldType::StringOrList))
        .with(Constraint::NonEmpty)
}

fn tags(required: bool) -> FieldRule {
    let rule = if required {
        FieldRule::required("tags")
    } else {
        FieldRule::optional("tags")
    };
    rule.with(Constraint::Type(FieldType::List))
        .with(Constraint::item_pattern(TAG_PATTERN))
}

fn numbered_id(prefix: &str) -> FieldRule {
    FieldRule::required("id")
        .with(Constraint::Type(FieldType::String))
        .with(Constraint::pattern(&format!(r"^{prefix}-\d{{3}}$")))
        .with(Constraint::CrossField(ID_MATCHES_FILENAME))
}

fn project_id() -> FieldRule {
    FieldRule::required("project_id")
        .with(Constraint::Type(FieldType::String))
        .with(Constraint::pattern(r"^[a-z0-9-]+$"))
}

fn doc_uuid() -> FieldRule {
    FieldRule::required("doc_uuid")
        .with(Constraint::Type(FieldType::String))
        .with(Constraint::UuidFormat)
}

pub fn adr() -> Schema {
    Schema::new(DocType::Adr)
        .field(title(10))
        .field(status(ADR_STATUSES))
        .field(date("date").alias("created"))
        .field(
            FieldRule::required("deciders")
                .with(Constraint::Type(FieldType::StringOrList))
                .with(Constraint::NonEmpty),
        )
        .field(tags(true))
        .field(numbered_id("adr"))
        .field(project_id())
        .field(doc_uuid())
}

pub fn rfc() -> Schema {
    Schema::new(DocType::Rfc)
        .field(title(3))
        .field(status(RFC_STATUSES))
        .field(author())
        .field(date("created"))
        .field(optional_date("updated"))
        .field(tags(true))
        .field(numbered_id("rfc"))
        .field(project_id())
        .field(doc_uuid())
}

pub fn memo() -> Schema {
    Schema::new(DocType::Memo)
        .field(title(3))
        .field(
            FieldRule::optional("status")
                .with(Constraint::Type(FieldType::String))
                .with(Constraint::Enum(MEMO_STATUSES)),
        )
        .field(author())
        .field(date("created"))
        .field(date("updated"))
        .field(tags(true))
        .field(numbered_id("memo"))
        .field(project_id())
        .field(doc_uuid())
}

pub fn prd() -> Schema {
    Schema::new(DocType::Prd)
        .field(title(3))
        .field(status(PRD_STATUSES))
        .field(author())
        .field(date("created"))
        .field(date("updated"))
        .field(FieldRule::required("target_release").with(Constraint::Type(FieldType::Scalar)))
        .field(tags(true))
        .field(numbered_id("prd"))
        .field(project_id())
        .field(doc_uuid())
}

pub fn frd() -> Schema {
    Schema::new(DocType::Frd)
        .field(title(3))
        .field(status(FRD_STATUSES))
        .field(author())
        .field(date("created"))
        .field(optional_date("updated"))
        .field(tags(true))
        .field(numbered_id("frd"))
        .field(project_id())
        .field(doc_uuid())
}

pub fn prdfaq() -> Schema {
    Schema::new(DocType::PrdFaq)
        .field(title(3))
        .field(status(PRDFAQ_STATUSES))
        .field(author())
        .field(date("created"))
        .field(tags(true))
        .field(numbered_id("prdfaq"))
        .field(project_id())
        .field(doc_uuid())
}

pub fn generic() -> Schema {
    Schema::new(DocType::Generic)
        .field(title(3))
        .field(FieldRule::optional("description").with(Constraint::Type(FieldType::String)))
        .field(FieldRule::optional("sidebar_position").with(Constraint::Type(FieldType::Integer)))
        .field(tags(false))
        .field(
            FieldRule::optional("id")
                .with(Constraint::Type(FieldType::String))
                .with(Constraint::pattern(r"^[a-z0-9-]+$")),
        )
        .field(project_id())
        .field(doc_uuid())
}

/// Schema for `doc_type`.
pub fn schema_for(doc_type: DocType) -> Schema {
    match doc_type {
        DocType::Adr => adr(),
        DocType::Rfc => rfc(),
        DocType::Memo => memo(),
        DocType::Prd => prd(),
        DocType::Frd => frd(),
        DocType::PrdFaq => prdfaq(),
        DocType::Generic => generic(),
    }
}
