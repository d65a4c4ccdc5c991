//! Service layer for the site content.
//!
//! This module contains services that load and check the content files the
//! page engines are built from.

pub mod content;

// Re-export commonly used types
pub use content::{ContentService, GalleryFile, ShowsFile};
