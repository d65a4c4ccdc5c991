//! Page engines for the show carousel, gallery lightbox and funding panel.
//!
//! The engines are host-driven state machines: they never own a clock or an
//! event loop. A [`Host`] schedules frames and timers on their behalf, and the
//! render layer reads a pure view descriptor after every change.

// Pixel geometry is f64 throughout; casts to slot counts are bounded
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]

pub mod carousel;
pub mod component;
pub mod easing;
pub mod flip;
pub mod funding_panel;
pub mod host;
pub mod input;
pub mod lightbox;
pub mod media;
pub mod scroll_lock;

pub use carousel::{
    position_for, Carousel, CarouselEvent, CarouselSettings, CarouselView, Direction, Slot,
    SlotTransform, SlotView,
};
pub use component::Component;
pub use flip::{FlipOverlay, FlipPhase};
pub use funding_panel::{FundingDisplay, FundingPanel, FundingView, FALLBACK_MESSAGE};
pub use host::{FrameId, Host, HostCallback, SimulatedHost, TimerId};
pub use input::{InputEvent, Key};
pub use lightbox::{ImageRef, Lightbox, LightboxEvent, LightboxPhase, LightboxView};
pub use media::{fit_to_viewport, FittedSize, ImageSize, ImageStatus, Viewport};
pub use scroll_lock::{ScrollGuard, ScrollLock};
