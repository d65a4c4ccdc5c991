//! Configuration management for the site server.
//!
//! This module handles loading and validating the server
//! configuration in TOML format with platform-specific directory resolution.
//! Every section is optional in the file; missing values fall back to defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

use crate::constants::{APP_NAME, FUNDING_POLL_INTERVAL};

/// HTTP listener configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,
    /// Port to bind
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

/// Where show and gallery data live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Directory holding `shows.toml` and `gallery.toml`
    pub dir: PathBuf,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("content"),
        }
    }
}

/// Crowdfunding campaign the funding panel reports on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CampaignConfig {
    /// Project JSON document URL
    pub json_url: Option<String>,
    /// Public campaign page URL (also linked from the fallback message)
    pub page_url: Option<String>,
    /// Currency assumed when the campaign data does not name one
    pub currency: String,
}

impl Default for CampaignConfig {
    fn default() -> Self {
        Self {
            json_url: None,
            page_url: None,
            currency: "GBP".to_string(),
        }
    }
}

/// Transactional email settings for the contact autoreply.
///
/// The API key itself never lives in the file; only the name of the
/// environment variable that holds it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MailConfig {
    /// Send endpoint of the email API
    pub api_url: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// Sender address
    pub from: String,
    /// Subject line of the autoreply
    pub subject: String,
    /// Address replies to the autoreply should go to
    pub reply_to: Option<String>,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.resend.com/emails".to_string(),
            api_key_env: "AUTOREPLY_API_KEY".to_string(),
            from: "Playbill Theatre <hello@example.org>".to_string(),
            subject: "Thanks for getting in touch".to_string(),
            reply_to: None,
        }
    }
}

/// Settings handed to the page engines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Horizontal distance between carousel slots, in pixels
    pub slot_spacing: f64,
    /// Graphic shown in place of posters that fail to load
    pub placeholder_image: String,
    /// Seconds between funding panel refreshes
    pub funding_poll_secs: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            slot_spacing: 320.0,
            placeholder_image: "/images/placeholder.svg".to_string(),
            funding_poll_secs: FUNDING_POLL_INTERVAL.as_secs(),
        }
    }
}

/// Server configuration.
///
/// # File Location
///
/// - Linux: `~/.config/Playbill/config.toml`
/// - macOS: `~/Library/Application Support/Playbill/config.toml`
/// - Windows: `%APPDATA%\Playbill\config.toml`
///
/// # Validation
///
/// - `server.port` must be non-zero
/// - `ui.slot_spacing` must be positive and finite
/// - `ui.funding_poll_secs` must be non-zero
/// - campaign and mail URLs must be http(s)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// HTTP listener
    pub server: ServerConfig,
    /// Show and gallery data
    pub content: ContentConfig,
    /// Crowdfunding campaign
    pub campaign: CampaignConfig,
    /// Autoreply email
    pub mail: MailConfig,
    /// Page engine settings
    pub ui: UiConfig,
}

impl Config {
    /// Gets the platform-specific config directory path.
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(APP_NAME);

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the platform config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;

        if !config_path.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Loads and validates configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validates configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("server.port must be non-zero");
        }

        if !self.ui.slot_spacing.is_finite() || self.ui.slot_spacing <= 0.0 {
            anyhow::bail!(
                "ui.slot_spacing must be a positive number, got {}",
                self.ui.slot_spacing
            );
        }

        if self.ui.funding_poll_secs == 0 {
            anyhow::bail!("ui.funding_poll_secs must be non-zero");
        }

        if self.campaign.currency.len() != 3
            || !self.campaign.currency.chars().all(|c| c.is_ascii_alphabetic())
        {
            anyhow::bail!(
                "campaign.currency must be a three-letter code, got '{}'",
                self.campaign.currency
            );
        }

        validate_url("campaign.json_url", self.campaign.json_url.as_deref())?;
        validate_url("campaign.page_url", self.campaign.page_url.as_deref())?;
        validate_url("mail.api_url", Some(&self.mail.api_url))?;

        if self.mail.api_key_env.trim().is_empty() {
            anyhow::bail!("mail.api_key_env must name an environment variable");
        }

        Ok(())
    }

    /// Whether any campaign document is configured.
    #[must_use]
    pub fn has_campaign(&self) -> bool {
        self.campaign.json_url.is_some() || self.campaign.page_url.is_some()
    }
}

fn validate_url(field: &str, url: Option<&str>) -> Result<()> {
    let Some(url) = url else {
        return Ok(());
    };

    let parsed =
        Url::parse(url).with_context(|| format!("{} is not a valid URL: '{}'", field, url))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        anyhow::bail!("{} must use http or https, got '{}'", field, parsed.scheme());
    }

    if parsed.host_str().is_none() {
        anyhow::bail!("{} has no host: '{}'", field, url);
    }

    Ok(())
}
