//! Image load status and viewport fitting.

use crate::constants::{LIGHTBOX_MAX_HEIGHT_RATIO, LIGHTBOX_MAX_WIDTH_RATIO};

/// Natural or fitted image dimensions in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageSize {
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
}

impl ImageSize {
    /// Creates a size.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Whether both sides are positive and finite.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Viewport dimensions in CSS pixels.
pub type Viewport = ImageSize;

/// Load state of a single image.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ImageStatus {
    /// Requested, not finished yet
    #[default]
    Pending,
    /// Loaded with known natural size
    Loaded(ImageSize),
    /// Failed to load; no natural size is known
    Failed,
}

impl ImageStatus {
    /// Builds a status from a load callback. Unusable sizes count as failures.
    #[must_use]
    pub fn from_load(natural: Option<ImageSize>) -> Self {
        match natural {
            Some(size) if size.is_usable() => Self::Loaded(size),
            _ => Self::Failed,
        }
    }

    /// Whether loading has finished, successfully or not.
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Natural size, when known.
    #[must_use]
    pub const fn natural_size(&self) -> Option<ImageSize> {
        match self {
            Self::Loaded(size) => Some(*size),
            _ => None,
        }
    }
}

/// Display size chosen for an image.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum FittedSize {
    /// Let the renderer size the image intrinsically
    #[default]
    Auto,
    /// Explicit size
    Exact(ImageSize),
}

/// Largest aspect-preserving size that fits 90% of the viewport width and 85%
/// of its height, never larger than the natural size.
///
/// Unknown natural sizes (failed loads) fall back to [`FittedSize::Auto`].
#[must_use]
pub fn fit_to_viewport(natural: Option<ImageSize>, viewport: Viewport) -> FittedSize {
    let Some(natural) = natural.filter(ImageSize::is_usable) else {
        return FittedSize::Auto;
    };
    if !viewport.is_usable() {
        return FittedSize::Auto;
    }

    let max_width = viewport.width * LIGHTBOX_MAX_WIDTH_RATIO;
    let max_height = viewport.height * LIGHTBOX_MAX_HEIGHT_RATIO;
    let scale = (max_width / natural.width)
        .min(max_height / natural.height)
        .min(1.0);

    FittedSize::Exact(ImageSize::new(natural.width * scale, natural.height * scale))
}
