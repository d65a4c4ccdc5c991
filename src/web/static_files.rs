//! Static file serving for the site.
//!
//! The page, its stylesheet and the bundled images are embedded in the binary
//! from the `site` directory. Unknown routes without a file extension fall
//! back to `index.html` so client-side section links keep working.

use axum::{
    body::Body,
    extract::Request,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use rust_embed::Embed;
use std::path::Path;

/// Embedded site files.
#[derive(Embed)]
#[folder = "site"]
#[include = "*.html"]
#[include = "*.js"]
#[include = "*.css"]
#[include = "*.svg"]
#[include = "*.png"]
#[include = "*.jpg"]
#[include = "*.jpeg"]
#[include = "*.webp"]
#[include = "*.ico"]
#[include = "*.woff2"]
#[include = "images/**/*"]
pub struct SiteAssets;

/// Serves site files with SPA fallback.
///
/// This handler:
/// 1. First tries to serve the exact requested path
/// 2. If not found, tries adding `.html` extension
/// 3. If still not found and the path doesn't look like a file, serves `index.html`
pub async fn serve_static(request: Request) -> Response {
    let path = request.uri().path().trim_start_matches('/');

    if path.is_empty() {
        return serve_file("index.html");
    }

    if let Some(content) = SiteAssets::get(path) {
        return file_response(path, content.data.as_ref());
    }

    let html_path = format!("{path}.html");
    if let Some(content) = SiteAssets::get(&html_path) {
        return file_response(&html_path, content.data.as_ref());
    }

    // Missing images must 404 so the page swaps in its placeholder.
    if looks_like_file(path) {
        return (StatusCode::NOT_FOUND, "File not found").into_response();
    }

    serve_file("index.html")
}

fn looks_like_file(path: &str) -> bool {
    Path::new(path)
        .extension()
        .is_some_and(|ext| !ext.is_empty())
}

/// Serves a specific file from embedded assets.
fn serve_file(path: &str) -> Response {
    match SiteAssets::get(path) {
        Some(content) => file_response(path, content.data.as_ref()),
        None => (StatusCode::NOT_FOUND, "File not found").into_response(),
    }
}

/// Creates an HTTP response for a file with appropriate content type.
fn file_response(path: &str, content: &[u8]) -> Response {
    let mime = mime_guess::from_path(path).first_or_octet_stream();

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, mime.as_ref())
        .header(header::CACHE_CONTROL, cache_control_for_path(path))
        .body(Body::from(content.to_vec()))
        .unwrap_or_else(|_| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to create response",
            )
                .into_response()
        })
}

/// Cache policy per file.
///
/// - Images under `images/`: one day (content authors replace them in place)
/// - HTML files: no cache (always revalidate)
/// - Other files: short cache (1 hour)
fn cache_control_for_path(path: &str) -> &'static str {
    if path.starts_with("images/") {
        "public, max-age=86400"
    } else if Path::new(path)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("html"))
    {
        "no-cache, must-revalidate"
    } else {
        "public, max-age=3600"
    }
}

/// Returns true if the site page was embedded at build time.
#[must_use]
pub fn has_embedded_assets() -> bool {
    SiteAssets::get("index.html").is_some()
}
