//! Funding progress widget.
//!
//! The panel polls the funding endpoint on load and then on a fixed interval.
//! Any failed poll (non-200, an `error` field, an unreadable body, or a
//! record with no figures) is soft: the panel shows a static message pointing
//! at the campaign page, or keeps the last good figures if it has them.

use std::time::Duration;

use tracing::debug;

use crate::funding::FundingStats;

/// Shown whenever no live figures are available.
pub const FALLBACK_MESSAGE: &str = "Visit our campaign page for the latest funding progress.";

/// Shown before the first poll completes.
pub const LOADING_MESSAGE: &str = "Loading campaign progress…";

/// What the panel currently displays.
#[derive(Debug, Clone, PartialEq)]
pub enum FundingDisplay {
    /// First poll still outstanding
    Loading,
    /// Last successful stats
    Live(FundingStats),
    /// Static message pointing at the campaign page
    Fallback,
}

/// Render descriptor for the panel.
#[derive(Debug, Clone, PartialEq)]
pub struct FundingView {
    /// Main line of text
    pub headline: String,
    /// Formatted pledged amount
    pub pledged: Option<String>,
    /// Formatted goal
    pub goal: Option<String>,
    /// e.g. "42 backers"
    pub backers: Option<String>,
    /// e.g. "12 days to go"
    pub days_remaining: Option<String>,
    /// Progress bar fill, clamped to `[0, 1]`
    pub progress: Option<f64>,
    /// e.g. "24.7% funded" (not clamped)
    pub percent_label: Option<String>,
    /// Link to the campaign page
    pub campaign_url: Option<String>,
}

/// Page-side model of the funding widget.
#[derive(Debug, Clone)]
pub struct FundingPanel {
    display: FundingDisplay,
    poll_interval: Duration,
    last_polled: Option<Duration>,
    campaign_url: Option<String>,
}

impl FundingPanel {
    /// Creates a panel that refreshes every `poll_interval`.
    pub fn new(poll_interval: Duration, campaign_url: Option<String>) -> Self {
        Self {
            display: FundingDisplay::Loading,
            poll_interval,
            last_polled: None,
            campaign_url,
        }
    }

    /// Current display state.
    pub fn display(&self) -> &FundingDisplay {
        &self.display
    }

    /// Whether a poll should be issued at `now`.
    ///
    /// True before the first poll and once the interval has elapsed since
    /// the last one.
    pub fn poll_due(&self, now: Duration) -> bool {
        self.last_polled
            .map_or(true, |last| now.saturating_sub(last) >= self.poll_interval)
    }

    /// Records that a poll was issued at `now`.
    pub fn mark_polled(&mut self, now: Duration) {
        self.last_polled = Some(now);
    }

    /// Applies a raw endpoint response.
    ///
    /// Returns true if live figures were accepted.
    pub fn apply_response(&mut self, status: u16, body: &str) -> bool {
        match parse_stats(status, body) {
            Some(stats) => {
                self.display = FundingDisplay::Live(stats);
                true
            }
            None => {
                if !matches!(self.display, FundingDisplay::Live(_)) {
                    self.display = FundingDisplay::Fallback;
                }
                false
            }
        }
    }

    /// Builds the render descriptor.
    pub fn view(&self) -> FundingView {
        let mut view = FundingView {
            headline: String::new(),
            pledged: None,
            goal: None,
            backers: None,
            days_remaining: None,
            progress: None,
            percent_label: None,
            campaign_url: self.campaign_url.clone(),
        };

        match &self.display {
            FundingDisplay::Loading => view.headline = LOADING_MESSAGE.to_string(),
            FundingDisplay::Fallback => view.headline = FALLBACK_MESSAGE.to_string(),
            FundingDisplay::Live(stats) => {
                let pledged = stats.pledged.map(|p| format_amount(p, &stats.currency));
                let goal = stats.goal.map(|g| format_amount(g, &stats.currency));

                view.headline = match (&pledged, &goal) {
                    (Some(p), Some(g)) => format!("{p} raised of {g}"),
                    (Some(p), None) => format!("{p} raised"),
                    _ => FALLBACK_MESSAGE.to_string(),
                };
                view.pledged = pledged;
                view.goal = goal;
                view.backers = stats.backers.map(|b| match b {
                    1 => "1 backer".to_string(),
                    n => format!("{} backers", group_thousands(&n.to_string())),
                });
                view.days_remaining = stats.days_remaining.map(|d| match d {
                    0 => "Final day".to_string(),
                    1 => "1 day to go".to_string(),
                    n => format!("{n} days to go"),
                });
                view.progress = stats
                    .percent_funded
                    .map(|percent| (percent / 100.0).clamp(0.0, 1.0));
                view.percent_label = stats.percent_funded.map(|percent| format!("{percent}% funded"));
            }
        }

        view
    }
}

fn parse_stats(status: u16, body: &str) -> Option<FundingStats> {
    if status != 200 {
        debug!("Funding endpoint returned {}", status);
        return None;
    }

    let value: serde_json::Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(e) => {
            debug!("Funding response is not JSON: {}", e);
            return None;
        }
    };

    if value.get("error").is_some() {
        debug!("Funding endpoint reported an error");
        return None;
    }

    let stats: FundingStats = serde_json::from_value(value).ok()?;
    stats.has_figures().then_some(stats)
}

/// "£12,345" style amount. Fractions are kept only when present.
#[must_use]
pub fn format_amount(amount: f64, currency: &str) -> String {
    let prefix = match currency.to_ascii_uppercase().as_str() {
        "GBP" => "£".to_string(),
        "USD" => "$".to_string(),
        "EUR" => "€".to_string(),
        other => format!("{other} "),
    };

    let rounded = (amount * 100.0).round() / 100.0;
    let text = if rounded.fract() == 0.0 {
        format!("{rounded:.0}")
    } else {
        format!("{rounded:.2}")
    };

    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (whole, fraction) = match digits.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (digits, None),
    };

    let mut formatted = format!("{sign}{prefix}{}", group_thousands(whole));
    if let Some(fraction) = fraction {
        formatted.push('.');
        formatted.push_str(fraction);
    }
    formatted
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}
