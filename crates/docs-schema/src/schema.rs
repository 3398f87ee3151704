//! Declarative frontmatter schemas
//!
//! A [`Schema`] is an ordered list of [`FieldRule`]s. Each rule carries a
//! list of [`Constraint`]s checked in order; the first failing constraint
//! produces the field's single violation.

use std::fmt;
use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate};
use docs_content::yaml::{is_blank, kind_name, scalar_text};
use docs_content::Frontmatter;
use regex::Regex;
use serde_yaml::Value;

use crate::DocType;

static UUID_V4: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9a-f]{8}-[0-9a-f]{4}-4[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$")
        .expect("uuid regex is valid")
});

/// `YYYY-MM-DD` or a full RFC 3339 timestamp.
pub fn is_iso_date(text: &str) -> bool {
    let text = text.trim();
    NaiveDate::parse_from_str(text, "%Y-%m-%d").is_ok() || DateTime::parse_from_rfc3339(text).is_ok()
}

/// Lowercase hyphenated version-4 UUID.
pub fn is_uuid_v4(text: &str) -> bool {
    UUID_V4.is_match(text.trim())
}

/// Expected YAML shape of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    /// Any scalar: string, number or boolean
    Scalar,
    /// A single string or a list of strings
    StringOrList,
    List,
    Integer,
}

impl FieldType {
    fn accepts(&self, value: &Value) -> bool {
        match self {
            FieldType::String => matches!(value, Value::String(_)),
            FieldType::Scalar => scalar_text(value).is_some(),
            FieldType::StringOrList => matches!(value, Value::String(_) | Value::Sequence(_)),
            FieldType::List => matches!(value, Value::Sequence(_)),
            FieldType::Integer => value.as_i64().is_some() || value.as_u64().is_some(),
        }
    }

    fn describe(&self) -> &'static str {
        match self {
            FieldType::String => "a string",
            FieldType::Scalar => "a single value",
            FieldType::StringOrList => "a string or a list of strings",
            FieldType::List => "a list",
            FieldType::Integer => "an integer",
        }
    }
}

/// Everything a constraint may look at.
#[derive(Debug, Clone, Copy)]
pub struct FieldContext<'a> {
    /// Key as written in the document (may be an alias)
    pub key: &'a str,
    pub value: &'a Value,
    pub frontmatter: &'a Frontmatter,
    /// File name without extension
    pub file_stem: &'a str,
}

/// A named check that compares a field with the rest of the document.
#[derive(Clone, Copy)]
pub struct CrossFieldRule {
    pub name: &'static str,
    pub check: fn(&FieldContext<'_>) -> Option<String>,
}

impl fmt::Debug for CrossFieldRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CrossFieldRule").field("name", &self.name).finish()
    }
}

#[derive(Debug, Clone)]
pub enum Constraint {
    Required,
    Type(FieldType),
    /// Whole scalar value must match
    Pattern(Regex),
    /// Every list item must match
    ItemPattern(Regex),
    Enum(&'static [&'static str]),
    /// Minimum length in characters
    MinLength(usize),
    NonEmpty,
    DateFormat,
    UuidFormat,
    CrossField(CrossFieldRule),
}

impl Constraint {
    /// Build a pattern constraint from a literal regex.
    ///
    /// Panics on an invalid pattern; schemas are built from constants.
    pub fn pattern(re: &str) -> Self {
        Constraint::Pattern(Regex::new(re).expect("schema pattern is valid"))
    }

    pub fn item_pattern(re: &str) -> Self {
        Constraint::ItemPattern(Regex::new(re).expect("schema item pattern is valid"))
    }

    fn check(&self, ctx: &FieldContext<'_>) -> Option<String> {
        let key = ctx.key;
        match self {
            Constraint::Required => None,
            Constraint::Type(expected) => (!expected.accepts(ctx.value)).then(|| {
                format!(
                    "`{key}` must be {}, found {}",
                    expected.describe(),
                    kind_name(ctx.value)
                )
            }),
            Constraint::Pattern(re) => {
                let text = scalar_text(ctx.value)?;
                (!re.is_match(&text))
                    .then(|| format!("`{key}` value `{text}` does not match pattern `{}`", re.as_str()))
            }
            Constraint::ItemPattern(re) => items(ctx.value)
                .into_iter()
                .find(|item| !re.is_match(item))
                .map(|item| {
                    format!("`{key}` item `{item}` does not match pattern `{}`", re.as_str())
                }),
            Constraint::Enum(allowed) => {
                let text = scalar_text(ctx.value)?;
                (!allowed.contains(&text.as_str())).then(|| {
                    format!(
                        "invalid `{key}` value `{text}`; valid values: {}",
                        allowed.join(", ")
                    )
                })
            }
            Constraint::MinLength(min) => {
                let text = scalar_text(ctx.value)?;
                let len = text.trim().chars().count();
                (len < *min).then(|| {
                    format!("`{key}` must be at least {min} characters long (found {len})")
                })
            }
            Constraint::NonEmpty => {
                let empty = match ctx.value {
                    Value::Sequence(seq) => seq.is_empty(),
                    other => is_blank(other),
                };
                empty.then(|| format!("`{key}` must not be empty"))
            }
            Constraint::DateFormat => {
                let text = scalar_text(ctx.value)?;
                (!is_iso_date(&text)).then(|| {
                    format!("`{key}` value `{text}` is not an ISO 8601 date (expected YYYY-MM-DD)")
                })
            }
            Constraint::UuidFormat => {
                let text = scalar_text(ctx.value)?;
                (!is_uuid_v4(&text))
                    .then(|| format!("`{key}` value `{text}` is not a lowercase version-4 UUID"))
            }
            Constraint::CrossField(rule) => (rule.check)(ctx),
        }
    }
}

fn items(value: &Value) -> Vec<String> {
    match value {
        Value::Sequence(seq) => seq.iter().filter_map(scalar_text).collect(),
        other => scalar_text(other).into_iter().collect(),
    }
}

/// Rules for one frontmatter field.
#[derive(Debug, Clone)]
pub struct FieldRule {
    pub name: &'static str,
    /// Alternative keys accepted in place of `name`
    pub aliases: Vec<&'static str>,
    pub constraints: Vec<Constraint>,
}

impl FieldRule {
    pub fn required(name: &'static str) -> Self {
        Self {
            name,
            aliases: Vec::new(),
            constraints: vec![Constraint::Required],
        }
    }

    pub fn optional(name: &'static str) -> Self {
        Self {
            name,
            aliases: Vec::new(),
            constraints: Vec::new(),
        }
    }

    pub fn alias(mut self, alias: &'static str) -> Self {
        self.aliases.push(alias);
        self
    }

    pub fn with(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    pub fn is_required(&self) -> bool {
        self.constraints
            .iter()
            .any(|c| matches!(c, Constraint::Required))
    }

    /// Values allowed by an enum constraint, if the field has one.
    pub fn allowed_values(&self) -> Option<&'static [&'static str]> {
        self.constraints.iter().find_map(|c| match c {
            Constraint::Enum(values) => Some(*values),
            _ => None,
        })
    }

    /// The first of `name` and its aliases present in `frontmatter`.
    fn lookup<'f>(&self, frontmatter: &'f Frontmatter) -> Option<(&'static str, &'f Value)> {
        std::iter::once(self.name)
            .chain(self.aliases.iter().copied())
            .find_map(|key| frontmatter.get(key).map(|value| (key, value)))
    }
}

/// A single schema failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: String,
    pub message: String,
    /// File line of the offending key, when present
    pub line: Option<usize>,
}

/// Frontmatter schema for one document type.
#[derive(Debug, Clone)]
pub struct Schema {
    pub doc_type: DocType,
    pub fields: Vec<FieldRule>,
}

impl Schema {
    pub fn new(doc_type: DocType) -> Self {
        Self {
            doc_type,
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, rule: FieldRule) -> Self {
        self.fields.push(rule);
        self
    }

    pub fn rule(&self, name: &str) -> Option<&FieldRule> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().filter(|f| f.is_required()).map(|f| f.name)
    }

    /// Check `frontmatter` against every rule, in schema order.
    ///
    /// At most one violation is reported per field.
    pub fn check(&self, frontmatter: &Frontmatter, file_stem: &str) -> Vec<Violation> {
        let mut violations = Vec::new();
        for rule in &self.fields {
            let Some((key, value)) = rule.lookup(frontmatter) else {
                if rule.is_required() {
                    violations.push(Violation {
                        field: rule.name.to_string(),
                        message: missing_message(rule),
                        line: None,
                    });
                }
                continue;
            };

            let line = frontmatter.line_of(key);
            if is_blank(value) {
                if rule.is_required() {
                    violations.push(Violation {
                        field: rule.name.to_string(),
                        message: format!("required field `{key}` is empty"),
                        line,
                    });
                }
                continue;
            }

            let ctx = FieldContext {
                key,
                value,
                frontmatter,
                file_stem,
            };
            if let Some(message) = rule.constraints.iter().find_map(|c| c.check(&ctx)) {
                violations.push(Violation {
                    field: rule.name.to_string(),
                    message,
                    line,
                });
            }
        }
        violations
    }
}

fn missing_message(rule: &FieldRule) -> String {
    if rule.aliases.is_empty() {
        format!("missing required field `{}`", rule.name)
    } else {
        let alternatives = rule
            .aliases
            .iter()
            .map(|a| format!("`{a}`"))
            .collect::<Vec<_>>()
            .join(" or ");
        format!("missing required field `{}` (or {alternatives})", rule.name)
    }
}
