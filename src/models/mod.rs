//! Data models for shows and the photo gallery.
//!
//! This module contains the static content records the page is built from.
//! Models are independent of the UI engines and the web server.

use anyhow::Result;

pub mod gallery;
pub mod show;

// Re-export all model types
pub use gallery::{active_categories, GalleryCategory, GalleryImage};
pub use show::{is_placeholder, ShowItem};

/// Validates an identifier format (kebab-case).
///
/// `kind` names the record in error messages (e.g., "Show").
pub(crate) fn validate_id(kind: &str, id: &str) -> Result<()> {
    if id.is_empty() {
        anyhow::bail!("{kind} ID cannot be empty");
    }

    if !id
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        anyhow::bail!("{kind} ID '{id}' must be kebab-case (lowercase, hyphens, and digits only)");
    }

    if id.starts_with('-') || id.ends_with('-') {
        anyhow::bail!("{kind} ID '{id}' cannot start or end with a hyphen");
    }

    Ok(())
}
