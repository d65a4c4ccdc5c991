//! Show and gallery content I/O service.
//!
//! Content lives in two TOML files inside the content directory:
//! `shows.toml` (a `[[shows]]` array, in carousel order) and `gallery.toml`
//! (a `[[categories]]` array, each with `[[categories.images]]`).

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::{active_categories, GalleryCategory, ShowItem};

/// File name of the show list.
pub const SHOWS_FILE: &str = "shows.toml";

/// File name of the gallery.
pub const GALLERY_FILE: &str = "gallery.toml";

/// On-disk layout of `shows.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShowsFile {
    /// Shows in carousel order
    #[serde(default)]
    pub shows: Vec<ShowItem>,
}

/// On-disk layout of `gallery.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GalleryFile {
    /// Categories in display order
    #[serde(default)]
    pub categories: Vec<GalleryCategory>,
}

/// Service for loading and checking the site content.
#[derive(Debug, Clone)]
pub struct ContentService {
    dir: PathBuf,
}

impl ContentService {
    /// Creates a service rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Content directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Loads the show list.
    ///
    /// # Errors
    ///
    /// - `shows.toml` is missing or not valid TOML
    /// - a show fails validation or two shows share an id
    /// - the list is empty
    pub fn load_shows(&self) -> Result<Vec<ShowItem>> {
        let path = self.dir.join(SHOWS_FILE);
        let file: ShowsFile = read_toml(&path)?;

        if file.shows.is_empty() {
            anyhow::bail!("{} lists no shows", path.display());
        }

        for show in &file.shows {
            show.validate()
                .with_context(|| format!("Invalid show in {}", path.display()))?;
        }
        ensure_unique_ids("Show", file.shows.iter().map(|s| s.id.as_str()))
            .with_context(|| format!("Invalid {}", path.display()))?;

        Ok(file.shows)
    }

    /// Loads every gallery category, including empty ones.
    ///
    /// A missing `gallery.toml` means no gallery.
    pub fn load_gallery(&self) -> Result<Vec<GalleryCategory>> {
        let path = self.dir.join(GALLERY_FILE);
        if !path.exists() {
            return Ok(Vec::new());
        }

        let file: GalleryFile = read_toml(&path)?;
        for category in &file.categories {
            category
                .validate()
                .with_context(|| format!("Invalid category in {}", path.display()))?;
        }
        ensure_unique_ids("Category", file.categories.iter().map(|c| c.id.as_str()))
            .with_context(|| format!("Invalid {}", path.display()))?;

        Ok(file.categories)
    }

    /// Loads the gallery without empty categories.
    pub fn load_active_gallery(&self) -> Result<Vec<GalleryCategory>> {
        Ok(active_categories(&self.load_gallery()?))
    }

    /// Checks both content files and collects every problem found.
    ///
    /// Returns an empty list when the content is valid.
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();

        if let Err(e) = self.load_shows() {
            problems.push(format!("{e:#}"));
        }

        match self.load_gallery() {
            Ok(categories) => {
                for category in categories.iter().filter(|c| c.is_empty()) {
                    tracing::warn!("Gallery category '{}' has no images and is hidden", category.id);
                }
            }
            Err(e) => problems.push(format!("{e:#}")),
        }

        problems
    }
}

fn read_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read content file: {}", path.display()))?;

    toml::from_str(&content)
        .with_context(|| format!("Failed to parse content file: {}", path.display()))
}

fn ensure_unique_ids<'a>(kind: &str, ids: impl Iterator<Item = &'a str>) -> Result<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            anyhow::bail!("{kind} ID '{id}' is used more than once");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SHOWS: &str = r#"
[[shows]]
id = "twelfth-night"
title = "Twelfth Night"
poster = "/images/posters/twelfth-night.jpg"
venue = "Village Hall"
dates = "12-14 June"

[[shows]]
id = "the-crucible"
title = "The Crucible"
poster = "/images/posters/crucible.jpg"
"#;

    const GALLERY: &str = r#"
[[categories]]
id = "rehearsals"
title = "Rehearsals"
folder = "/images/gallery/rehearsals"

[[categories.images]]
file = "01.jpg"
caption = "Blocking act one"

[[categories]]
id = "backstage"
title = "Backstage"
folder = "/images/gallery/backstage"
"#;

    fn content_dir(shows: &str, gallery: Option<&str>) -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(SHOWS_FILE), shows).unwrap();
        if let Some(gallery) = gallery {
            fs::write(dir.path().join(GALLERY_FILE), gallery).unwrap();
        }
        dir
    }

    #[test]
    fn test_load_shows_in_order() {
        let dir = content_dir(SHOWS, None);
        let shows = ContentService::new(dir.path()).load_shows().unwrap();
        assert_eq!(shows.len(), 2);
        assert_eq!(shows[0].id, "twelfth-night");
        assert_eq!(shows[1].tickets, "TBA");
    }

    #[test]
    fn test_duplicate_show_ids_rejected() {
        let doubled = format!("{SHOWS}\n[[shows]]\nid = \"the-crucible\"\ntitle = \"Again\"\nposter = \"x.jpg\"\n");
        let dir = content_dir(&doubled, None);
        let err = ContentService::new(dir.path()).load_shows().unwrap_err();
        assert!(format!("{err:#}").contains("used more than once"));
    }

    #[test]
    fn test_empty_show_list_rejected() {
        let dir = content_dir("", None);
        assert!(ContentService::new(dir.path()).load_shows().is_err());
    }

    #[test]
    fn test_missing_gallery_is_empty() {
        let dir = content_dir(SHOWS, None);
        let service = ContentService::new(dir.path());
        assert!(service.load_gallery().unwrap().is_empty());
        assert!(service.validate().is_empty());
    }

    #[test]
    fn test_active_gallery_hides_empty_categories() {
        let dir = content_dir(SHOWS, Some(GALLERY));
        let service = ContentService::new(dir.path());

        assert_eq!(service.load_gallery().unwrap().len(), 2);
        let active = service.load_active_gallery().unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, "rehearsals");
        assert_eq!(
            active[0].image_src(0).as_deref(),
            Some("/images/gallery/rehearsals/01.jpg")
        );
    }

    #[test]
    fn test_validate_collects_problems() {
        let dir = content_dir("not toml [", Some("[[categories]]\nid = \"Bad Id\"\ntitle = \"x\"\nfolder = \"f\"\n"));
        let problems = ContentService::new(dir.path()).validate();
        assert_eq!(problems.len(), 2);
    }
}
