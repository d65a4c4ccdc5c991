//! Crowdfunding campaign statistics.
//!
//! The campaign platform has no stable public API, so figures are pulled
//! from whatever the campaign exposes: a project JSON document first, then
//! the campaign page's markup. Extraction never hard-fails; when nothing can
//! be read, the stats record is returned with every figure set to `null`.

pub mod source;
pub mod strategy;

use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub use source::{DocumentKind, FundingSource};
pub use strategy::{default_strategies, CampaignFigures, ExtractionStrategy};

#[cfg(feature = "web")]
pub use source::HttpFundingSource;

/// Stats record returned by the funding endpoint.
///
/// Every figure is optional; `percent_funded` is derived from `pledged` and
/// `goal` here and nowhere else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundingStats {
    /// Amount pledged so far
    pub pledged: Option<f64>,
    /// Funding goal
    pub goal: Option<f64>,
    /// Whole days until the campaign ends (never negative)
    pub days_remaining: Option<i64>,
    /// Number of backers
    pub backers: Option<u64>,
    /// `pledged / goal * 100`, rounded to one decimal
    pub percent_funded: Option<f64>,
    /// ISO 4217 currency code
    pub currency: String,
    /// When the figures were fetched
    pub last_updated: DateTime<Utc>,
}

impl FundingStats {
    /// Record with every figure unknown.
    #[must_use]
    pub fn unavailable(currency: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            pledged: None,
            goal: None,
            days_remaining: None,
            backers: None,
            percent_funded: None,
            currency: currency.into(),
            last_updated: now,
        }
    }

    /// Builds the record from extracted figures.
    #[must_use]
    pub fn from_figures(figures: CampaignFigures, default_currency: &str, now: DateTime<Utc>) -> Self {
        let days_remaining = figures
            .days_left
            .map(|days| days.max(0))
            .or_else(|| figures.deadline.map(|deadline| days_until(deadline, now)));

        Self {
            pledged: figures.pledged,
            goal: figures.goal,
            days_remaining,
            backers: figures.backers,
            percent_funded: percent_funded(figures.pledged, figures.goal),
            currency: figures
                .currency
                .unwrap_or_else(|| default_currency.to_string()),
            last_updated: now,
        }
    }

    /// Whether there is anything worth displaying.
    #[must_use]
    pub const fn has_figures(&self) -> bool {
        self.pledged.is_some()
    }
}

/// `pledged / goal * 100` rounded to one decimal. `None` without a positive goal.
#[must_use]
pub fn percent_funded(pledged: Option<f64>, goal: Option<f64>) -> Option<f64> {
    match (pledged, goal) {
        (Some(pledged), Some(goal)) if goal > 0.0 && pledged.is_finite() => {
            Some((pledged / goal * 1000.0).round() / 10.0)
        }
        _ => None,
    }
}

/// Whole days from `now` until `deadline`, rounded up, never negative.
#[must_use]
pub fn days_until(deadline: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let seconds = (deadline - now).num_seconds();
    if seconds <= 0 {
        0
    } else {
        (seconds + 86_399) / 86_400
    }
}

/// Fetches campaign documents and runs the extraction strategies in order.
pub struct FundingService {
    source: Arc<dyn FundingSource>,
    strategies: Vec<Box<dyn ExtractionStrategy>>,
    default_currency: String,
}

impl std::fmt::Debug for FundingService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FundingService")
            .field(
                "strategies",
                &self.strategies.iter().map(|s| s.name()).collect::<Vec<_>>(),
            )
            .field("default_currency", &self.default_currency)
            .finish_non_exhaustive()
    }
}

impl FundingService {
    /// Creates a service with the default strategy chain.
    pub fn new(source: Arc<dyn FundingSource>, default_currency: impl Into<String>) -> Self {
        Self::with_strategies(source, default_strategies(), default_currency)
    }

    /// Creates a service with an explicit strategy chain.
    pub fn with_strategies(
        source: Arc<dyn FundingSource>,
        strategies: Vec<Box<dyn ExtractionStrategy>>,
        default_currency: impl Into<String>,
    ) -> Self {
        Self {
            source,
            strategies,
            default_currency: default_currency.into(),
        }
    }

    /// Current stats.
    ///
    /// Each document is fetched at most once, on first use by a strategy.
    /// The first strategy that yields figures wins. If no strategy matches
    /// the record is null-filled.
    ///
    /// # Errors
    ///
    /// Returns an error only when every document fetch failed.
    pub async fn stats(&self, now: DateTime<Utc>) -> Result<FundingStats> {
        let mut documents: Vec<(DocumentKind, Option<String>)> = Vec::new();
        let mut last_error = None;

        for strategy in &self.strategies {
            let kind = strategy.document_kind();
            let document = match documents.iter().find(|(k, _)| *k == kind) {
                Some((_, document)) => document.clone(),
                None => {
                    let fetched = match self.source.fetch(kind).await {
                        Ok(body) => Some(body),
                        Err(e) => {
                            warn!("Failed to fetch campaign {:?}: {:#}", kind, e);
                            last_error = Some(e);
                            None
                        }
                    };
                    documents.push((kind, fetched.clone()));
                    fetched
                }
            };

            let Some(document) = document else {
                continue;
            };

            if let Some(figures) = strategy.extract(&document, now) {
                debug!("Campaign figures extracted by {}", strategy.name());
                return Ok(FundingStats::from_figures(
                    figures,
                    &self.default_currency,
                    now,
                ));
            }
        }

        let fetched_any = documents.iter().any(|(_, document)| document.is_some());
        match last_error {
            Some(e) if !fetched_any => Err(e.context("Campaign data is unreachable")),
            _ => {
                debug!("No strategy matched the campaign data");
                Ok(FundingStats::unavailable(&self.default_currency, now))
            }
        }
    }
}
