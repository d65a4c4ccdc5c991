//! Application-wide constants.
//!
//! This module defines the application name plus the timing and geometry
//! constants shared by the carousel and lightbox engines.

use std::time::Duration;

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "Playbill";

/// The binary name of the application (used in command examples, lowercase with hyphens).
pub const APP_BINARY_NAME: &str = "playbill";

/// Duration of a carousel slide between two centered items.
pub const CAROUSEL_SLIDE_DURATION: Duration = Duration::from_millis(400);

/// Delay before the detail panel of a flipped card is marked visible.
pub const FLIP_REVEAL_DELAY: Duration = Duration::from_millis(100);

/// Delay before a card that is flipping back loses its flipped state.
pub const FLIP_RETURN_DELAY: Duration = Duration::from_millis(100);

/// Window after a drag release during which a click does not toggle the flip.
pub const CLICK_SUPPRESS_WINDOW: Duration = Duration::from_millis(100);

/// Drag distance (px) past which a release moves to the neighbouring item.
pub const DRAG_COMMIT_THRESHOLD: f64 = 100.0;

/// Drag distance (px) past which a short release animates back to rest.
pub const DRAG_SETTLE_THRESHOLD: f64 = 5.0;

/// Drag distance (px) past which the gesture counts as a drag, not a click.
pub const DRAG_CLICK_THRESHOLD: f64 = 10.0;

/// Lightbox open/close fade.
pub const LIGHTBOX_FADE_DURATION: Duration = Duration::from_millis(350);

/// Lightbox crossfade between two images of a category.
pub const LIGHTBOX_CROSSFADE_DURATION: Duration = Duration::from_millis(280);

/// Minimum horizontal swipe (px) recognised by the lightbox.
pub const SWIPE_THRESHOLD: f64 = 50.0;

/// Share of the viewport width a lightbox image may occupy.
pub const LIGHTBOX_MAX_WIDTH_RATIO: f64 = 0.9;

/// Share of the viewport height a lightbox image may occupy.
pub const LIGHTBOX_MAX_HEIGHT_RATIO: f64 = 0.85;

/// How often the page refreshes the funding stats.
pub const FUNDING_POLL_INTERVAL: Duration = Duration::from_secs(5 * 60);
