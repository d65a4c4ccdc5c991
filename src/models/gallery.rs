//! Gallery categories and their images.

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// A single photo in a gallery category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryImage {
    /// Filename inside the category folder
    pub file: String,
    /// Optional caption shown under the image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

impl GalleryImage {
    /// Creates an image without a caption.
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            caption: None,
        }
    }
}

/// A named group of photos (e.g., a production or rehearsal set).
///
/// # Validation
///
/// - ID must be unique within the gallery
/// - ID format: kebab-case (lowercase, hyphens only, no spaces)
/// - Title must be non-empty, max 80 characters
/// - Folder must be non-empty
///
/// Categories with no images are valid but are never surfaced to the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryCategory {
    /// Unique identifier in kebab-case (e.g., "rehearsals")
    pub id: String,
    /// Display title (e.g., "Rehearsals")
    pub title: String,
    /// Folder the image files live in, relative to the site root
    pub folder: String,
    /// Ordered images
    #[serde(default)]
    pub images: Vec<GalleryImage>,
}

impl GalleryCategory {
    /// Creates a new empty category with validation.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - ID is empty or not in kebab-case format
    /// - Title is empty or exceeds 80 characters
    /// - Folder is empty
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        folder: impl Into<String>,
    ) -> Result<Self> {
        let category = Self {
            id: id.into(),
            title: title.into(),
            folder: folder.into(),
            images: Vec::new(),
        };
        category.validate()?;
        Ok(category)
    }

    /// Builder-style helper to append an image.
    pub fn with_image(mut self, image: GalleryImage) -> Self {
        self.images.push(image);
        self
    }

    /// Validates the category fields.
    pub fn validate(&self) -> Result<()> {
        super::validate_id("Gallery category", &self.id)?;

        if self.title.trim().is_empty() {
            anyhow::bail!("Gallery category '{}' has an empty title", self.id);
        }

        if self.title.len() > 80 {
            anyhow::bail!(
                "Gallery category title '{}' exceeds maximum length of 80 characters (got {})",
                self.title,
                self.title.len()
            );
        }

        if self.folder.trim().is_empty() {
            anyhow::bail!("Gallery category '{}' has no folder", self.id);
        }

        Ok(())
    }

    /// Whether the category has anything to show.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Number of images in the category.
    #[must_use]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Site-relative source path of the image at `index`.
    #[must_use]
    pub fn image_src(&self, index: usize) -> Option<String> {
        self.images.get(index).map(|image| {
            format!(
                "{}/{}",
                self.folder.trim_end_matches('/'),
                image.file.trim_start_matches('/')
            )
        })
    }
}

/// Returns the categories the page should display, in their original order.
///
/// Categories with no images are dropped entirely.
#[must_use]
pub fn active_categories(categories: &[GalleryCategory]) -> Vec<GalleryCategory> {
    categories
        .iter()
        .filter(|category| !category.is_empty())
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_valid() {
        let category = GalleryCategory::new("rehearsals", "Rehearsals", "gallery/rehearsals").unwrap();

        assert_eq!(category.id, "rehearsals");
        assert!(category.is_empty());
        assert_eq!(category.len(), 0);
    }

    #[test]
    fn test_new_invalid_id() {
        assert!(GalleryCategory::new("", "Rehearsals", "gallery").is_err());
        assert!(GalleryCategory::new("Rehearsals", "Rehearsals", "gallery").is_err());
        assert!(GalleryCategory::new("-rehearsals", "Rehearsals", "gallery").is_err());
        assert!(GalleryCategory::new("back stage", "Backstage", "gallery").is_err());
    }

    #[test]
    fn test_new_invalid_title() {
        assert!(GalleryCategory::new("rehearsals", "", "gallery").is_err());
        let long = "x".repeat(81);
        assert!(GalleryCategory::new("rehearsals", long, "gallery").is_err());
    }

    #[test]
    fn test_new_empty_folder() {
        assert!(GalleryCategory::new("rehearsals", "Rehearsals", " ").is_err());
    }

    #[test]
    fn test_image_src_joins_folder() {
        let category = GalleryCategory::new("rehearsals", "Rehearsals", "gallery/rehearsals/")
            .unwrap()
            .with_image(GalleryImage::new("/one.jpg"));

        assert_eq!(
            category.image_src(0).as_deref(),
            Some("gallery/rehearsals/one.jpg")
        );
        assert!(category.image_src(1).is_none());
    }

    #[test]
    fn test_active_categories_drops_empty() {
        let full = GalleryCategory::new("opening-night", "Opening Night", "gallery/opening")
            .unwrap()
            .with_image(GalleryImage::new("a.jpg"));
        let empty = GalleryCategory::new("workshops", "Workshops", "gallery/workshops").unwrap();
        let also_full = GalleryCategory::new("cast", "Cast", "gallery/cast")
            .unwrap()
            .with_image(GalleryImage::new("b.jpg"));

        let active = active_categories(&[full, empty, also_full]);
        let ids: Vec<_> = active.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["opening-night", "cast"]);
    }
}
