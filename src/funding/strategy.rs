//! Ordered extraction strategies for campaign figures.
//!
//! Each strategy reads one document kind and either yields figures or
//! declines. A strategy only succeeds when it found at least the pledged
//! amount; partial figures are fine.

use std::sync::LazyLock;

use chrono::{DateTime, TimeZone, Utc};
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use super::source::DocumentKind;

/// Raw figures read from a campaign document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CampaignFigures {
    /// Amount pledged so far
    pub pledged: Option<f64>,
    /// Funding goal
    pub goal: Option<f64>,
    /// Number of backers
    pub backers: Option<u64>,
    /// Campaign end
    pub deadline: Option<DateTime<Utc>>,
    /// Days left as printed by the platform
    pub days_left: Option<i64>,
    /// ISO 4217 currency code
    pub currency: Option<String>,
}

/// One way of reading campaign figures.
pub trait ExtractionStrategy: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &'static str;

    /// Document this strategy reads.
    fn document_kind(&self) -> DocumentKind;

    /// Figures found in `document`, or `None` when this strategy cannot read it.
    fn extract(&self, document: &str, now: DateTime<Utc>) -> Option<CampaignFigures>;
}

/// JSON document, then data attributes, then prose.
#[must_use]
pub fn default_strategies() -> Vec<Box<dyn ExtractionStrategy>> {
    vec![
        Box::new(JsonApiStrategy),
        Box::new(DataAttributeStrategy),
        Box::new(TextPatternStrategy),
    ]
}

/// Reads the project JSON document.
///
/// Accepts the project either at the top level or under a `project` key.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonApiStrategy;

#[derive(Debug, Deserialize)]
struct ProjectDocument {
    #[serde(default)]
    pledged: Option<Value>,
    #[serde(default)]
    goal: Option<Value>,
    #[serde(default)]
    backers_count: Option<Value>,
    #[serde(default)]
    backers: Option<Value>,
    #[serde(default)]
    deadline: Option<Value>,
    #[serde(default)]
    currency: Option<String>,
}

impl ExtractionStrategy for JsonApiStrategy {
    fn name(&self) -> &'static str {
        "json-api"
    }

    fn document_kind(&self) -> DocumentKind {
        DocumentKind::Json
    }

    fn extract(&self, document: &str, _now: DateTime<Utc>) -> Option<CampaignFigures> {
        let value: Value = serde_json::from_str(document).ok()?;
        let project = value.get("project").cloned().unwrap_or(value);
        let project: ProjectDocument = serde_json::from_value(project).ok()?;

        let pledged = project.pledged.as_ref().and_then(number_of)?;
        Some(CampaignFigures {
            pledged: Some(pledged),
            goal: project.goal.as_ref().and_then(number_of),
            backers: project
                .backers_count
                .or(project.backers)
                .as_ref()
                .and_then(number_of)
                .and_then(non_negative_count),
            deadline: project
                .deadline
                .as_ref()
                .and_then(number_of)
                .and_then(timestamp),
            days_left: None,
            currency: project.currency.map(|c| c.to_uppercase()),
        })
    }
}

/// Reads `data-*` attributes from the campaign page.
#[derive(Debug, Clone, Copy, Default)]
pub struct DataAttributeStrategy;

static DATA_ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"data-(pledged|goal|backers|backers-count|deadline|days-left|currency)\s*=\s*["']([^"']*)["']"#)
        .expect("valid data attribute pattern")
});

impl ExtractionStrategy for DataAttributeStrategy {
    fn name(&self) -> &'static str {
        "data-attributes"
    }

    fn document_kind(&self) -> DocumentKind {
        DocumentKind::Page
    }

    fn extract(&self, document: &str, _now: DateTime<Utc>) -> Option<CampaignFigures> {
        let mut figures = CampaignFigures::default();

        for captures in DATA_ATTRIBUTE.captures_iter(document) {
            let value = captures[2].trim();
            match &captures[1] {
                "pledged" => figures.pledged = figures.pledged.or_else(|| parse_amount(value)),
                "goal" => figures.goal = figures.goal.or_else(|| parse_amount(value)),
                "backers" | "backers-count" => {
                    figures.backers = figures
                        .backers
                        .or_else(|| parse_amount(value).and_then(non_negative_count));
                }
                "deadline" => {
                    figures.deadline = figures.deadline.or_else(|| parse_deadline(value));
                }
                "days-left" => {
                    figures.days_left = figures.days_left.or_else(|| value.parse().ok());
                }
                "currency" if !value.is_empty() => {
                    figures.currency = Some(value.to_uppercase());
                }
                _ => {}
            }
        }

        figures.pledged.is_some().then_some(figures)
    }
}

/// Reads prose such as "£12,345 pledged of £20,000 goal".
#[derive(Debug, Clone, Copy, Default)]
pub struct TextPatternStrategy;

static PLEDGED_TEXT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([$£€])?\s*([0-9][0-9,]*(?:\.[0-9]+)?)\s*(?:pledged|raised)")
        .expect("valid pledged pattern")
});

/// Groups: leading "goal", currency symbol, amount, trailing "goal".
static GOAL_TEXT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:of|(goal)(?:\s+of)?:?)\s*([$£€])?\s*([0-9][0-9,]*(?:\.[0-9]+)?)(\s*goal\b)?",
    )
    .expect("valid goal pattern")
});

static BACKERS_TEXT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([0-9][0-9,]*)\s*(?:backers|supporters)").expect("valid backers pattern")
});

static DAYS_TEXT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([0-9]+)\s*days?\s*(?:to go|left|remaining)").expect("valid days pattern")
});

impl ExtractionStrategy for TextPatternStrategy {
    fn name(&self) -> &'static str {
        "text-patterns"
    }

    fn document_kind(&self) -> DocumentKind {
        DocumentKind::Page
    }

    fn extract(&self, document: &str, _now: DateTime<Utc>) -> Option<CampaignFigures> {
        let text = strip_tags(document);

        let pledged = PLEDGED_TEXT.captures(&text)?;
        let amount = parse_amount(&pledged[2])?;
        let symbol = pledged.get(1).map(|m| m.as_str());

        // The goal is looked for after the pledged figure so "of" in
        // unrelated prose before it does not match.
        let rest = &text[pledged.get(0).map_or(0, |m| m.end())..];
        // A bare "of <number>" is not a goal without a currency or "goal".
        let goal = GOAL_TEXT
            .captures_iter(rest)
            .find(|c| c.get(1).is_some() || c.get(2).is_some() || c.get(4).is_some())
            .and_then(|c| parse_amount(&c[3]));

        Some(CampaignFigures {
            pledged: Some(amount),
            goal,
            backers: BACKERS_TEXT
                .captures(&text)
                .and_then(|c| parse_amount(&c[1]))
                .and_then(non_negative_count),
            deadline: None,
            days_left: DAYS_TEXT.captures(&text).and_then(|c| c[1].parse().ok()),
            currency: symbol.and_then(currency_for_symbol).map(str::to_string),
        })
    }
}

static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid tag pattern"));

fn strip_tags(html: &str) -> String {
    let text = TAG.replace_all(html, " ");
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn number_of(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_amount(s),
        _ => None,
    }
}

/// Parses "12,345.50", "£1,000" or "1000".
fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn non_negative_count(n: f64) -> Option<u64> {
    (n >= 0.0).then(|| n.round() as u64)
}

#[allow(clippy::cast_possible_truncation)]
fn timestamp(seconds: f64) -> Option<DateTime<Utc>> {
    Utc.timestamp_opt(seconds as i64, 0).single()
}

fn parse_deadline(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    raw.parse::<f64>().ok().and_then(timestamp)
}

fn currency_for_symbol(symbol: &str) -> Option<&'static str> {
    match symbol {
        "£" => Some("GBP"),
        "$" => Some("USD"),
        "€" => Some("EUR"),
        _ => None,
    }
}
