//! Shared test fixtures for the integration tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use playbill::config::Config;
use playbill::models::{GalleryCategory, GalleryImage, ShowItem};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Creates `count` shows with deterministic ids and posters.
pub fn test_shows(count: usize) -> Vec<ShowItem> {
    (0..count)
        .map(|i| {
            ShowItem::new(
                format!("show-{i}"),
                format!("Show {i}"),
                format!("/images/posters/{i}.jpg"),
            )
            .expect("valid show")
        })
        .collect()
}

/// Gallery with an empty category first, then `rehearsals` (3 images) and
/// `performances` (1 image).
pub fn test_gallery() -> Vec<GalleryCategory> {
    let empty = GalleryCategory::new("backstage", "Backstage", "/images/gallery/backstage")
        .expect("valid category");

    let mut rehearsals =
        GalleryCategory::new("rehearsals", "Rehearsals", "/images/gallery/rehearsals")
            .expect("valid category");
    for i in 0..3 {
        let mut image = GalleryImage::new(format!("{i}.jpg"));
        image.caption = Some(format!("Rehearsal {i}"));
        rehearsals = rehearsals.with_image(image);
    }

    let performances =
        GalleryCategory::new("performances", "Performances", "/images/gallery/performances")
            .expect("valid category")
            .with_image(GalleryImage::new("curtain-call.jpg"));

    vec![empty, rehearsals, performances]
}

/// Writes `shows.toml` and `gallery.toml` for the fixtures above into `dir`.
pub fn write_content(dir: &Path) {
    let shows = toml::to_string(&playbill::services::ShowsFile {
        shows: test_shows(3),
    })
    .expect("serialize shows");
    fs::write(dir.join("shows.toml"), shows).expect("write shows.toml");

    let gallery = toml::to_string(&playbill::services::GalleryFile {
        categories: test_gallery(),
    })
    .expect("serialize gallery");
    fs::write(dir.join("gallery.toml"), gallery).expect("write gallery.toml");
}

/// Creates a temp content directory with the fixture content and a config
/// pointing at it.
pub fn test_config_with_content() -> (Config, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    write_content(temp_dir.path());

    let mut config = Config::default();
    config.content.dir = temp_dir.path().to_path_buf();
    config.campaign.page_url = Some("https://example.org/campaign".to_string());

    (config, temp_dir)
}

/// Campaign page markup with figures in `data-*` attributes.
pub const CAMPAIGN_PAGE_DATA_ATTRIBUTES: &str = r#"<!doctype html>
<html><body>
  <div class="project-stats" data-pledged="3,250" data-goal="5000"
       data-backers="58" data-days-left="9"></div>
</body></html>"#;

/// Campaign page markup with figures only in prose.
pub const CAMPAIGN_PAGE_PROSE: &str = r"<!doctype html>
<html><body>
  <h2><span>£1,875</span> pledged of £5,000 goal</h2>
  <p>41 backers</p>
  <p>3 days to go</p>
</body></html>";

/// Project JSON document.
pub const CAMPAIGN_JSON: &str = r#"{
  "project": {
    "pledged": 4100.5,
    "goal": 5000,
    "backers_count": 77,
    "deadline": 1741435200,
    "currency": "GBP"
  }
}"#;
