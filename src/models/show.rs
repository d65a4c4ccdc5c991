//! Show listings displayed in the carousel.

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Values the content authors use for details that are not announced yet.
const PLACEHOLDER_VALUES: &[&str] = &["tba", "tbc", "tbd", "coming soon"];

/// A production listed on the site.
///
/// Show items are supplied by the content files and never mutated by the
/// carousel. Venue, date and ticket fields are free-form; a value such as
/// `TBA` means the detail has not been announced.
///
/// # Validation
///
/// - ID must be non-empty kebab-case (shared rules with gallery categories)
/// - Title must be non-empty
/// - Poster must be non-empty
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowItem {
    /// Unique identifier (e.g., "twelfth-night")
    pub id: String,
    /// Display title
    pub title: String,
    /// Poster image path, relative to the site root
    pub poster: String,
    /// Optional second image shown on the back of the card
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_image: Option<String>,
    /// Venue name
    #[serde(default = "placeholder")]
    pub venue: String,
    /// Performance dates, free-form
    #[serde(default = "placeholder")]
    pub dates: String,
    /// Ticket link or note
    #[serde(default = "placeholder")]
    pub tickets: String,
    /// Longer description for the detail panel
    #[serde(default)]
    pub description: String,
}

fn placeholder() -> String {
    "TBA".to_string()
}

/// Returns true if a free-form detail is a "not yet announced" sentinel.
#[must_use]
pub fn is_placeholder(value: &str) -> bool {
    let value = value.trim();
    value.is_empty()
        || PLACEHOLDER_VALUES
            .iter()
            .any(|p| value.eq_ignore_ascii_case(p))
}

impl ShowItem {
    /// Creates a new show with the given poster and every detail unannounced.
    pub fn new(id: impl Into<String>, title: impl Into<String>, poster: impl Into<String>) -> Result<Self> {
        let show = Self {
            id: id.into(),
            title: title.into(),
            poster: poster.into(),
            secondary_image: None,
            venue: placeholder(),
            dates: placeholder(),
            tickets: placeholder(),
            description: String::new(),
        };
        show.validate()?;
        Ok(show)
    }

    /// Validates the identifier, title and poster.
    pub fn validate(&self) -> Result<()> {
        super::validate_id("Show", &self.id)?;

        if self.title.trim().is_empty() {
            anyhow::bail!("Show '{}' has an empty title", self.id);
        }

        if self.poster.trim().is_empty() {
            anyhow::bail!("Show '{}' has no poster image", self.id);
        }

        Ok(())
    }

    /// Venue, or `None` while it is a placeholder.
    #[must_use]
    pub fn announced_venue(&self) -> Option<&str> {
        announced(&self.venue)
    }

    /// Dates, or `None` while they are a placeholder.
    #[must_use]
    pub fn announced_dates(&self) -> Option<&str> {
        announced(&self.dates)
    }

    /// Ticket information, or `None` while it is a placeholder.
    #[must_use]
    pub fn announced_tickets(&self) -> Option<&str> {
        announced(&self.tickets)
    }
}

fn announced(value: &str) -> Option<&str> {
    if is_placeholder(value) {
        None
    } else {
        Some(value.trim())
    }
}
