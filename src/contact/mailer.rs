//! Transactional email delivery.

use async_trait::async_trait;
use serde::Serialize;

use super::AutoreplyError;

/// Email handed to the delivery API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutgoingEmail {
    /// Sender
    pub from: String,
    /// Recipients
    pub to: Vec<String>,
    /// Subject line
    pub subject: String,
    /// Plain text body
    pub text: String,
    /// Reply-to address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
}

/// Sends one email with the given API key.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Delivers `email`. A single attempt; no retry.
    async fn send(&self, api_key: &str, email: &OutgoingEmail) -> Result<(), AutoreplyError>;
}

#[cfg(feature = "web")]
pub use http::HttpMailer;

#[cfg(feature = "web")]
mod http {
    use async_trait::async_trait;

    use super::{Mailer, OutgoingEmail};
    use crate::contact::AutoreplyError;

    /// Posts emails as JSON to a transactional email API with bearer auth.
    #[derive(Clone)]
    pub struct HttpMailer {
        client: reqwest::Client,
        api_url: String,
    }

    impl HttpMailer {
        /// Creates a mailer for the given send endpoint.
        pub fn new(api_url: impl Into<String>) -> Self {
            Self {
                client: reqwest::Client::new(),
                api_url: api_url.into(),
            }
        }
    }

    #[async_trait]
    impl Mailer for HttpMailer {
        async fn send(&self, api_key: &str, email: &OutgoingEmail) -> Result<(), AutoreplyError> {
            let response = self
                .client
                .post(&self.api_url)
                .bearer_auth(api_key)
                .json(email)
                .send()
                .await
                .map_err(|e| AutoreplyError::Transport(e.into()))?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(AutoreplyError::Upstream {
                    status: status.as_u16(),
                    body,
                });
            }

            Ok(())
        }
    }
}
