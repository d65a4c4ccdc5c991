//! Where campaign documents come from.

use anyhow::Result;
use async_trait::async_trait;

/// Campaign document a strategy reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// Project JSON document
    Json,
    /// Public campaign page markup
    Page,
}

/// Fetches raw campaign documents.
#[async_trait]
pub trait FundingSource: Send + Sync {
    /// Returns the raw body of the requested document.
    ///
    /// Errors are transport-level only (unreachable host, non-success status).
    async fn fetch(&self, kind: DocumentKind) -> Result<String>;
}

#[cfg(feature = "web")]
pub use http::HttpFundingSource;

#[cfg(feature = "web")]
mod http {
    use anyhow::{anyhow, Context, Result};
    use async_trait::async_trait;

    use super::{DocumentKind, FundingSource};
    use crate::config::CampaignConfig;

    /// Fetches campaign documents over HTTP.
    #[derive(Clone)]
    pub struct HttpFundingSource {
        client: reqwest::Client,
        json_url: Option<String>,
        page_url: Option<String>,
    }

    impl HttpFundingSource {
        /// Creates a source for the configured campaign URLs.
        pub fn new(campaign: &CampaignConfig) -> Self {
            Self {
                client: reqwest::Client::new(),
                json_url: campaign.json_url.clone(),
                page_url: campaign.page_url.clone(),
            }
        }
    }

    #[async_trait]
    impl FundingSource for HttpFundingSource {
        async fn fetch(&self, kind: DocumentKind) -> Result<String> {
            let url = match kind {
                DocumentKind::Json => self.json_url.as_deref(),
                DocumentKind::Page => self.page_url.as_deref(),
            }
            .ok_or_else(|| anyhow!("No campaign URL configured for {:?}", kind))?;

            let response = self
                .client
                .get(url)
                .header("accept", "application/json, text/html;q=0.9")
                .send()
                .await
                .with_context(|| format!("Failed to reach {}", url))?;

            if !response.status().is_success() {
                return Err(anyhow!("Campaign request to {} returned {}", url, response.status()));
            }

            response
                .text()
                .await
                .with_context(|| format!("Failed to read body from {}", url))
        }
    }
}
