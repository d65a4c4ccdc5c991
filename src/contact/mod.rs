//! Contact form autoreply.
//!
//! The hosting platform posts every form submission here. Only the contact
//! form gets a reply, and only when the visitor left an email address.
//! Sending is a single attempt; failures are logged and reported, never
//! retried.

pub mod mailer;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, info};

use crate::config::MailConfig;

pub use mailer::{Mailer, OutgoingEmail};

#[cfg(feature = "web")]
pub use mailer::HttpMailer;

/// Name of the form that receives an autoreply.
pub const CONTACT_FORM_NAME: &str = "contact";

/// Form-submission event from the hosting platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSubmission {
    /// Name of the submitted form
    #[serde(default)]
    pub form_name: String,
    /// Submitted fields
    #[serde(default)]
    pub data: ContactData,
}

/// Fields of the contact form. Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactData {
    /// Visitor's name
    #[serde(default)]
    pub name: Option<String>,
    /// Visitor's email address
    #[serde(default)]
    pub email: Option<String>,
    /// Message body
    #[serde(default)]
    pub message: Option<String>,
    /// Mailing list opt-in
    #[serde(default, deserialize_with = "deserialize_opt_in")]
    pub mailing_list: bool,
}

/// Form builders send checkboxes as booleans, "on", "yes" or "true".
fn deserialize_opt_in<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Bool(b) => b,
        serde_json::Value::String(s) => {
            matches!(s.trim().to_ascii_lowercase().as_str(), "on" | "yes" | "true" | "1")
        }
        serde_json::Value::Number(n) => n.as_u64() == Some(1),
        serde_json::Value::Array(items) => !items.is_empty(),
        _ => false,
    })
}

impl FormSubmission {
    /// Trimmed email address, if one was given.
    pub fn reply_address(&self) -> Option<&str> {
        self.data
            .email
            .as_deref()
            .map(str::trim)
            .filter(|email| !email.is_empty())
    }
}

/// Why a submission got no reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Submission came from another form
    OtherForm,
    /// No email address to reply to
    NoEmail,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OtherForm => write!(f, "not the contact form"),
            Self::NoEmail => write!(f, "no email address"),
        }
    }
}

/// Result of handling a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutoreplyOutcome {
    /// Reply sent to the given address
    Sent(String),
    /// Nothing to do
    Skipped(SkipReason),
}

/// Failure to send a reply.
#[derive(Debug, Error)]
pub enum AutoreplyError {
    /// The API key environment variable is not set
    #[error("Email API key is not configured ({0} is unset)")]
    MissingApiKey(String),
    /// The email API answered with a non-success status
    #[error("Email API returned {status}: {body}")]
    Upstream {
        /// HTTP status from the email API
        status: u16,
        /// Response body
        body: String,
    },
    /// The email API could not be reached
    #[error("Email API unreachable: {0:#}")]
    Transport(#[from] anyhow::Error),
}

/// Composes and sends contact autoreplies.
pub struct AutoreplyService {
    mailer: Arc<dyn Mailer>,
    mail: MailConfig,
    api_key: Option<String>,
}

impl std::fmt::Debug for AutoreplyService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AutoreplyService")
            .field("from", &self.mail.from)
            .field("api_key_set", &self.api_key.is_some())
            .finish_non_exhaustive()
    }
}

impl AutoreplyService {
    /// Creates a service that reads the API key from the environment
    /// variable named in `mail.api_key_env`.
    pub fn from_env(mailer: Arc<dyn Mailer>, mail: MailConfig) -> Self {
        let api_key = std::env::var(&mail.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty());
        Self::with_api_key(mailer, mail, api_key)
    }

    /// Creates a service with an explicit API key.
    pub fn with_api_key(mailer: Arc<dyn Mailer>, mail: MailConfig, api_key: Option<String>) -> Self {
        Self {
            mailer,
            mail,
            api_key,
        }
    }

    /// Whether an API key is available.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Handles one form submission.
    pub async fn handle(
        &self,
        submission: &FormSubmission,
    ) -> Result<AutoreplyOutcome, AutoreplyError> {
        if submission.form_name != CONTACT_FORM_NAME {
            debug!("Ignoring submission from form '{}'", submission.form_name);
            return Ok(AutoreplyOutcome::Skipped(SkipReason::OtherForm));
        }

        let Some(to) = submission.reply_address() else {
            debug!("Contact submission without email; no autoreply");
            return Ok(AutoreplyOutcome::Skipped(SkipReason::NoEmail));
        };

        let Some(api_key) = self.api_key.as_deref() else {
            let err = AutoreplyError::MissingApiKey(self.mail.api_key_env.clone());
            error!("{}", err);
            return Err(err);
        };

        let email = self.compose(to, &submission.data);
        if let Err(err) = self.mailer.send(api_key, &email).await {
            error!("Autoreply to {} failed: {}", to, err);
            return Err(err);
        }

        info!("Autoreply sent to {}", to);
        Ok(AutoreplyOutcome::Sent(to.to_string()))
    }

    /// Builds the reply for a contact submission.
    pub fn compose(&self, to: &str, data: &ContactData) -> OutgoingEmail {
        let name = data
            .name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or("there");

        let mut text = format!(
            "Hi {name},\n\n\
             Thanks for getting in touch! We've received your message and \
             someone from the company will get back to you soon.\n"
        );

        if data.mailing_list {
            text.push_str(
                "\nYou've also joined our mailing list, so you'll be the first \
                 to hear about new shows and ticket releases.\n",
            );
        }

        if let Some(message) = data.message.as_deref().map(str::trim).filter(|m| !m.is_empty()) {
            text.push_str("\nFor your records, you wrote:\n\n");
            for line in message.lines() {
                text.push_str("> ");
                text.push_str(line);
                text.push('\n');
            }
        }

        text.push_str("\nSee you at the theatre!\n");

        OutgoingEmail {
            from: self.mail.from.clone(),
            to: vec![to.to_string()],
            subject: self.mail.subject.clone(),
            text,
            reply_to: self.mail.reply_to.clone(),
        }
    }
}
