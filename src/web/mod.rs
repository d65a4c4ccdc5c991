//! Web API module for Playbill.
//!
//! This module provides the HTTP surface of the site: the JSON endpoints the
//! page engines read, the form-submission hook, and the embedded static site.
//!
//! # Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /api/funding` - Crowdfunding campaign stats
//! - `POST /api/contact/autoreply` - Form-submission hook for the contact autoreply
//! - `GET /api/shows` - Show list in carousel order
//! - `GET /api/gallery` - Gallery categories that have images
//! - `GET /api/site` - Settings for the page engines
//! - anything else - Embedded static site with SPA fallback

pub mod static_files;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::contact::{AutoreplyOutcome, AutoreplyService, FormSubmission, HttpMailer};
use crate::funding::{FundingService, FundingStats, HttpFundingSource};
use crate::models::{GalleryCategory, ShowItem};
use crate::services::ContentService;

// ============================================================================
// Application State
// ============================================================================

/// Shared application state for the web API.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    config: Arc<Config>,
    /// Show and gallery files
    content: ContentService,
    /// Campaign stats
    funding: Arc<FundingService>,
    /// Contact autoreply
    autoreply: Arc<AutoreplyService>,
}

impl AppState {
    /// Creates the application state with HTTP-backed services.
    ///
    /// The autoreply API key is read from the environment once, here.
    pub fn new(config: Config) -> Self {
        let funding = FundingService::new(
            Arc::new(HttpFundingSource::new(&config.campaign)),
            config.campaign.currency.clone(),
        );
        let autoreply = AutoreplyService::from_env(
            Arc::new(HttpMailer::new(config.mail.api_url.clone())),
            config.mail.clone(),
        );
        Self::with_services(config, funding, autoreply)
    }

    /// Creates the application state from prebuilt services.
    pub fn with_services(
        config: Config,
        funding: FundingService,
        autoreply: AutoreplyService,
    ) -> Self {
        Self {
            content: ContentService::new(config.content.dir.clone()),
            config: Arc::new(config),
            funding: Arc::new(funding),
            autoreply: Arc::new(autoreply),
        }
    }

    /// Returns the configuration the server runs with.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Current health status (e.g., "healthy").
    pub status: String,
    /// Application version.
    pub version: String,
}

/// Show list response.
#[derive(Debug, Serialize)]
pub struct ShowListResponse {
    /// Shows in carousel order.
    pub shows: Vec<ShowItem>,
}

/// Gallery response.
#[derive(Debug, Serialize)]
pub struct GalleryResponse {
    /// Categories with at least one image.
    pub categories: Vec<GalleryCategory>,
}

/// Settings the page engines start from.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettingsResponse {
    /// Carousel slot spacing in pixels.
    pub slot_spacing: f64,
    /// Poster placeholder graphic.
    pub placeholder_image: String,
    /// Seconds between funding refreshes.
    pub funding_poll_secs: u64,
    /// Public campaign page, linked from the funding fallback.
    pub campaign_url: Option<String>,
}

/// Autoreply hook response.
#[derive(Debug, Serialize)]
pub struct AutoreplyResponse {
    /// "sent" or "skipped".
    pub status: String,
    /// Why nothing was sent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Form-submission hook body.
///
/// The hosting platform wraps the submission in a `payload` object; a bare
/// submission is accepted too.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum SubmissionEvent {
    /// `{ "payload": { form_name, data } }`
    Wrapped {
        /// The submission
        payload: FormSubmission,
    },
    /// `{ form_name, data }`
    Bare(FormSubmission),
}

impl SubmissionEvent {
    /// The submission carried by the event.
    #[must_use]
    pub fn into_submission(self) -> FormSubmission {
        match self {
            Self::Wrapped { payload } => payload,
            Self::Bare(submission) => submission,
        }
    }
}

/// API error response.
#[derive(Debug, Serialize)]
pub struct ApiError {
    /// Short error summary.
    pub error: String,
    /// Human-readable detail.
    pub message: String,
}

impl ApiError {
    fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

fn internal_error(error: &str, message: impl Into<String>) -> (StatusCode, Json<ApiError>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiError::new(error, message)),
    )
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /health - Health check endpoint.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /api/funding - Current campaign stats.
///
/// Returns a null-filled record when the campaign data could not be read,
/// and 500 only when the campaign could not be reached at all.
async fn get_funding(State(state): State<AppState>) -> ApiResult<FundingStats> {
    match state.funding.stats(Utc::now()).await {
        Ok(stats) => Ok(Json(stats)),
        Err(e) => {
            error!("Funding stats unavailable: {:#}", e);
            Err(internal_error(
                "Failed to fetch funding stats",
                "The campaign platform could not be reached",
            ))
        }
    }
}

/// POST /api/contact/autoreply - Sends the contact form autoreply.
async fn contact_autoreply(
    State(state): State<AppState>,
    Json(event): Json<SubmissionEvent>,
) -> ApiResult<AutoreplyResponse> {
    let submission = event.into_submission();

    match state.autoreply.handle(&submission).await {
        Ok(AutoreplyOutcome::Sent(_)) => Ok(Json(AutoreplyResponse {
            status: "sent".to_string(),
            reason: None,
        })),
        Ok(AutoreplyOutcome::Skipped(reason)) => Ok(Json(AutoreplyResponse {
            status: "skipped".to_string(),
            reason: Some(reason.to_string()),
        })),
        Err(e) => Err(internal_error("Failed to send autoreply", e.to_string())),
    }
}

/// GET /api/shows - Show list in carousel order.
async fn list_shows(State(state): State<AppState>) -> ApiResult<ShowListResponse> {
    let shows = state.content.load_shows().map_err(|e| {
        warn!("Failed to load shows: {:#}", e);
        internal_error("Failed to load shows", format!("{e:#}"))
    })?;

    Ok(Json(ShowListResponse { shows }))
}

/// GET /api/gallery - Gallery categories that have images.
async fn list_gallery(State(state): State<AppState>) -> ApiResult<GalleryResponse> {
    let categories = state.content.load_active_gallery().map_err(|e| {
        warn!("Failed to load gallery: {:#}", e);
        internal_error("Failed to load gallery", format!("{e:#}"))
    })?;

    Ok(Json(GalleryResponse { categories }))
}

/// GET /api/site - Settings for the page engines.
async fn get_site_settings(State(state): State<AppState>) -> Json<SiteSettingsResponse> {
    let config = state.config();
    Json(SiteSettingsResponse {
        slot_spacing: config.ui.slot_spacing,
        placeholder_image: config.ui.placeholder_image.clone(),
        funding_poll_secs: config.ui.funding_poll_secs,
        campaign_url: config.campaign.page_url.clone(),
    })
}

// ============================================================================
// Router Setup
// ============================================================================

/// Creates the router with all endpoints and the static site fallback.
pub fn create_router(state: AppState) -> Router {
    // The form hook is called by the hosting platform, the JSON endpoints by
    // the page, which may be served from a CDN origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Glue endpoints
        .route("/api/funding", get(get_funding))
        .route("/api/contact/autoreply", post(contact_autoreply))
        // Content endpoints
        .route("/api/shows", get(list_shows))
        .route("/api/gallery", get(list_gallery))
        .route("/api/site", get(get_site_settings))
        .fallback(static_files::serve_static)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Runs the web server until Ctrl+C.
///
/// # Errors
///
/// Returns an error if the server fails to bind or serve.
pub async fn run_server(config: Config, addr: SocketAddr) -> anyhow::Result<()> {
    if !config.has_campaign() {
        warn!("No campaign URLs configured; /api/funding will report errors");
    }
    if !static_files::has_embedded_assets() {
        warn!("No embedded site assets; only the API is served");
    }

    let state = AppState::new(config);
    if !state.autoreply.is_configured() {
        warn!(
            "{} is not set; contact autoreplies will fail",
            state.config.mail.api_key_env
        );
    }
    let app = create_router(state);

    info!("Starting Playbill server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
}
