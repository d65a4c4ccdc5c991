//! Gallery lightbox engine.
//!
//! A full-screen viewer over the images of one gallery category at a time.
//!
//! ## Transitions
//!
//! - Opening and closing fade over [`LIGHTBOX_FADE_DURATION`]. State is only
//!   torn down once the closing fade has elapsed.
//! - Navigation crossfades: the target is preloaded, and once it has loaded
//!   (or failed) the crossfade runs for [`LIGHTBOX_CROSSFADE_DURATION`] before
//!   the target becomes current.
//!
//! Timers are fire-and-forget. Each one re-checks the phase it was scheduled
//! for, so a superseded timer firing late changes nothing.
//!
//! ## Preloading
//!
//! Every source requested through the host is remembered for the session; a
//! source is never requested twice.

use std::collections::HashMap;
use std::time::Duration;

use tracing::debug;

use crate::constants::{LIGHTBOX_CROSSFADE_DURATION, LIGHTBOX_FADE_DURATION, SWIPE_THRESHOLD};
use crate::models::{active_categories, GalleryCategory};

use super::carousel::Direction;
use super::component::Component;
use super::host::{Host, TimerId};
use super::input::{InputEvent, Key};
use super::media::{fit_to_viewport, FittedSize, ImageSize, ImageStatus, Viewport};
use super::scroll_lock::{ScrollGuard, ScrollLock};

/// Position of an image: category index (into the active categories) and
/// image index within that category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageRef {
    /// Index into the active categories
    pub category: usize,
    /// Index into the category's images
    pub image: usize,
}

impl ImageRef {
    /// Creates a reference.
    #[must_use]
    pub const fn new(category: usize, image: usize) -> Self {
        Self { category, image }
    }
}

/// Visibility phase of the lightbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LightboxPhase {
    /// Not shown
    #[default]
    Closed,
    /// Fading in
    Opening,
    /// Fully shown
    Open,
    /// Fading out; state is cleared when the fade ends
    Closing,
}

/// Events emitted by the lightbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightboxEvent {
    /// The lightbox started opening on an image
    Opened(ImageRef),
    /// A crossfade finished and the image is now current
    Navigated(ImageRef),
    /// The closing fade finished and the lightbox is hidden
    Closed,
}

/// Render descriptor for the lightbox.
#[derive(Debug, Clone, PartialEq)]
pub struct LightboxView {
    /// Visibility phase
    pub phase: LightboxPhase,
    /// Current image
    pub current: Option<ImageRef>,
    /// Source of the current image
    pub src: Option<String>,
    /// Caption of the current image
    pub caption: Option<String>,
    /// Title of the current category
    pub category_title: Option<String>,
    /// Size to draw the current image at
    pub fitted: FittedSize,
    /// Source fading in during a crossfade
    pub incoming_src: Option<String>,
    /// Size to draw the incoming image at
    pub incoming_fitted: FittedSize,
    /// Whether the crossfade itself is running (the target has loaded)
    pub crossfading: bool,
    /// One-based position and total, e.g. `(3, 12)`
    pub counter: Option<(usize, usize)>,
    /// Whether a previous image exists in the category
    pub has_previous: bool,
    /// Whether a next image exists in the category
    pub has_next: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CrossfadeStage {
    Loading,
    Fading,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Crossfade {
    target: ImageRef,
    direction: Direction,
    stage: CrossfadeStage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LightboxTimer {
    FinishOpen,
    FinishClose,
    CommitCrossfade,
}

/// Lightbox state machine.
#[derive(Debug)]
pub struct Lightbox {
    categories: Vec<GalleryCategory>,
    phase: LightboxPhase,
    current: Option<ImageRef>,
    crossfade: Option<Crossfade>,
    fitted: FittedSize,
    incoming_fitted: FittedSize,
    viewport: Viewport,
    cache: HashMap<String, ImageStatus>,
    scroll_lock: ScrollLock,
    scroll_guard: Option<ScrollGuard>,
    timers: Vec<(TimerId, LightboxTimer)>,
    touch_origin: Option<(f64, f64)>,
}

impl Lightbox {
    /// Creates a closed lightbox over the non-empty categories.
    #[must_use]
    pub fn new(categories: &[GalleryCategory], scroll_lock: ScrollLock, viewport: Viewport) -> Self {
        Self {
            categories: active_categories(categories),
            phase: LightboxPhase::Closed,
            current: None,
            crossfade: None,
            fitted: FittedSize::Auto,
            incoming_fitted: FittedSize::Auto,
            viewport,
            cache: HashMap::new(),
            scroll_lock,
            scroll_guard: None,
            timers: Vec::new(),
            touch_origin: None,
        }
    }

    /// Categories the lightbox can show (empty ones excluded).
    #[must_use]
    pub fn categories(&self) -> &[GalleryCategory] {
        &self.categories
    }

    /// Visibility phase.
    #[must_use]
    pub const fn phase(&self) -> LightboxPhase {
        self.phase
    }

    /// Current image, if open.
    #[must_use]
    pub const fn current(&self) -> Option<ImageRef> {
        self.current
    }

    /// Target of the crossfade in progress.
    #[must_use]
    pub fn pending(&self) -> Option<ImageRef> {
        self.crossfade.map(|crossfade| crossfade.target)
    }

    /// Whether a fade or crossfade is running.
    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        matches!(self.phase, LightboxPhase::Opening | LightboxPhase::Closing)
            || self.crossfade.is_some()
    }

    /// Display size of the current image.
    #[must_use]
    pub const fn fitted_size(&self) -> FittedSize {
        self.fitted
    }

    /// Cached load status of `src`.
    #[must_use]
    pub fn image_status(&self, src: &str) -> Option<ImageStatus> {
        self.cache.get(src).copied()
    }

    /// Site-relative source of an image.
    #[must_use]
    pub fn src_of(&self, image: ImageRef) -> Option<String> {
        self.categories
            .get(image.category)
            .and_then(|category| category.image_src(image.image))
    }

    /// Opens the lightbox on `image`.
    ///
    /// Locks background scrolling and preloads the image and its neighbours.
    /// Returns `None` if the reference is out of range.
    pub fn open(&mut self, image: ImageRef, host: &mut dyn Host) -> Option<LightboxEvent> {
        if self.src_of(image).is_none() {
            debug!("Ignoring open of missing image {:?}", image);
            return None;
        }

        self.current = Some(image);
        self.crossfade = None;
        self.phase = LightboxPhase::Opening;
        self.forget_timers(&[LightboxTimer::FinishClose, LightboxTimer::CommitCrossfade]);
        if self.scroll_guard.is_none() {
            self.scroll_guard = Some(self.scroll_lock.acquire());
        }
        self.schedule(LightboxTimer::FinishOpen, LIGHTBOX_FADE_DURATION, host);

        self.preload(image, host);
        for direction in [Direction::Previous, Direction::Next] {
            if let Some(neighbour) = self.neighbour(image, direction) {
                self.preload(neighbour, host);
            }
        }
        self.refit();

        Some(LightboxEvent::Opened(image))
    }

    /// Starts the closing fade. Ignored when already closed or closing.
    pub fn close(&mut self, host: &mut dyn Host) -> bool {
        if matches!(self.phase, LightboxPhase::Closed | LightboxPhase::Closing) {
            return false;
        }
        self.phase = LightboxPhase::Closing;
        self.crossfade = None;
        self.incoming_fitted = FittedSize::Auto;
        self.touch_origin = None;
        self.forget_timers(&[LightboxTimer::FinishOpen, LightboxTimer::CommitCrossfade]);
        self.schedule(LightboxTimer::FinishClose, LIGHTBOX_FADE_DURATION, host);
        true
    }

    /// Starts a crossfade to the neighbouring image in `direction`.
    ///
    /// Ignored when nothing is open, a crossfade is already running, or the
    /// category has no image in that direction.
    pub fn navigate(&mut self, direction: Direction, host: &mut dyn Host) -> bool {
        let Some(current) = self.current else {
            return false;
        };
        if matches!(self.phase, LightboxPhase::Closed | LightboxPhase::Closing) {
            return false;
        }
        if self.crossfade.is_some() {
            debug!("Ignoring {:?}: crossfade in progress", direction);
            return false;
        }
        let Some(target) = self.neighbour(current, direction) else {
            return false;
        };

        self.preload(target, host);
        let ready = self
            .src_of(target)
            .and_then(|src| self.image_status(&src))
            .is_some_and(|status| status.is_settled());

        self.crossfade = Some(Crossfade {
            target,
            direction,
            stage: if ready {
                CrossfadeStage::Fading
            } else {
                CrossfadeStage::Loading
            },
        });
        if ready {
            self.schedule(LightboxTimer::CommitCrossfade, LIGHTBOX_CROSSFADE_DURATION, host);
        }
        self.refit();
        true
    }

    /// Records the result of a preload. `natural` is `None` when the image
    /// failed to load.
    ///
    /// Refits both the current image and the crossfade target.
    pub fn on_image_loaded(&mut self, src: &str, natural: Option<ImageSize>, host: &mut dyn Host) {
        let status = ImageStatus::from_load(natural);
        self.cache.insert(src.to_string(), status);

        if let Some(crossfade) = self.crossfade {
            let is_target = self.src_of(crossfade.target).as_deref() == Some(src);
            if is_target && crossfade.stage == CrossfadeStage::Loading {
                self.crossfade = Some(Crossfade {
                    stage: CrossfadeStage::Fading,
                    ..crossfade
                });
                self.schedule(LightboxTimer::CommitCrossfade, LIGHTBOX_CROSSFADE_DURATION, host);
            }
        }

        self.refit();
    }

    /// Updates the viewport and refits the shown images.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.refit();
    }

    fn neighbour(&self, image: ImageRef, direction: Direction) -> Option<ImageRef> {
        let len = self.categories.get(image.category)?.len();
        let index = match direction {
            Direction::Previous => image.image.checked_sub(1)?,
            Direction::Next => image.image + 1,
        };
        (index < len).then_some(ImageRef::new(image.category, index))
    }

    fn preload(&mut self, image: ImageRef, host: &mut dyn Host) {
        let Some(src) = self.src_of(image) else {
            return;
        };
        if self.cache.contains_key(&src) {
            return;
        }
        host.preload_image(&src);
        self.cache.insert(src, ImageStatus::Pending);
    }

    fn refit(&mut self) {
        self.fitted = self.fit(self.current);
        self.incoming_fitted = self.fit(self.pending());
    }

    fn fit(&self, image: Option<ImageRef>) -> FittedSize {
        let natural = image
            .and_then(|image| self.src_of(image))
            .and_then(|src| self.image_status(&src))
            .and_then(|status| status.natural_size());
        fit_to_viewport(natural, self.viewport)
    }

    /// Pending timers of these kinds will be ignored when they fire.
    fn forget_timers(&mut self, kinds: &[LightboxTimer]) {
        self.timers.retain(|(_, kind)| !kinds.contains(kind));
    }

    fn schedule(&mut self, kind: LightboxTimer, delay: Duration, host: &mut dyn Host) {
        let timer = host.set_timer(delay);
        self.timers.push((timer, kind));
    }

    fn finish_close(&mut self) -> Option<LightboxEvent> {
        if self.phase != LightboxPhase::Closing {
            return None;
        }
        self.phase = LightboxPhase::Closed;
        self.current = None;
        self.crossfade = None;
        self.fitted = FittedSize::Auto;
        self.incoming_fitted = FittedSize::Auto;
        self.touch_origin = None;
        self.scroll_guard = None;
        debug!("Lightbox closed");
        Some(LightboxEvent::Closed)
    }

    fn commit_crossfade(&mut self, host: &mut dyn Host) -> Option<LightboxEvent> {
        let crossfade = self.crossfade?;
        if crossfade.stage != CrossfadeStage::Fading {
            return None;
        }
        self.crossfade = None;
        self.current = Some(crossfade.target);
        self.refit();

        if let Some(ahead) = self.neighbour(crossfade.target, crossfade.direction) {
            self.preload(ahead, host);
        }
        Some(LightboxEvent::Navigated(crossfade.target))
    }

    fn handle_swipe(&mut self, x: f64, y: f64, host: &mut dyn Host) {
        let Some((start_x, start_y)) = self.touch_origin.take() else {
            return;
        };
        let dx = x - start_x;
        let dy = y - start_y;
        if dx.abs() > dy.abs() && dx.abs() > SWIPE_THRESHOLD {
            let direction = if dx < 0.0 {
                Direction::Next
            } else {
                Direction::Previous
            };
            self.navigate(direction, host);
        }
    }
}

impl Component for Lightbox {
    type Event = LightboxEvent;
    type View = LightboxView;

    fn handle_input(
        &mut self,
        input: &InputEvent,
        _now: Duration,
        host: &mut dyn Host,
    ) -> Option<LightboxEvent> {
        if let InputEvent::Resize { width, height } = *input {
            self.set_viewport(ImageSize::new(width, height));
            return None;
        }

        // Everything else is only bound while an image is shown.
        self.current?;

        match *input {
            InputEvent::Key(Key::Left) => {
                self.navigate(Direction::Previous, host);
            }
            InputEvent::Key(Key::Right) => {
                self.navigate(Direction::Next, host);
            }
            InputEvent::Key(Key::Escape) => {
                self.close(host);
            }
            InputEvent::TouchStart { x, y } => self.touch_origin = Some((x, y)),
            InputEvent::TouchEnd { x, y } => self.handle_swipe(x, y, host),
            _ => {}
        }
        None
    }

    fn on_timer(&mut self, id: TimerId, _now: Duration, host: &mut dyn Host) -> Option<LightboxEvent> {
        let position = self.timers.iter().position(|(timer, _)| *timer == id)?;
        let (_, kind) = self.timers.remove(position);

        match kind {
            LightboxTimer::FinishOpen => {
                if self.phase == LightboxPhase::Opening {
                    self.phase = LightboxPhase::Open;
                }
                None
            }
            LightboxTimer::FinishClose => self.finish_close(),
            LightboxTimer::CommitCrossfade => self.commit_crossfade(host),
        }
    }

    fn view(&self) -> LightboxView {
        let current = self.current;
        let category = current.and_then(|c| self.categories.get(c.category));
        let image = current.and_then(|c| category.and_then(|cat| cat.images.get(c.image)));

        LightboxView {
            phase: self.phase,
            current,
            src: current.and_then(|c| self.src_of(c)),
            caption: image.and_then(|i| i.caption.clone()),
            category_title: category.map(|cat| cat.title.clone()),
            fitted: self.fitted,
            incoming_src: self.pending().and_then(|p| self.src_of(p)),
            incoming_fitted: self.incoming_fitted,
            crossfading: self
                .crossfade
                .is_some_and(|c| c.stage == CrossfadeStage::Fading),
            counter: current.zip(category).map(|(c, cat)| (c.image + 1, cat.len())),
            has_previous: current
                .and_then(|c| self.neighbour(c, Direction::Previous))
                .is_some(),
            has_next: current
                .and_then(|c| self.neighbour(c, Direction::Next))
                .is_some(),
        }
    }

    fn should_close(&self) -> bool {
        self.phase == LightboxPhase::Closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GalleryImage;
    use crate::ui::host::SimulatedHost;

    fn gallery() -> Vec<GalleryCategory> {
        let mut shows = GalleryCategory::new("shows", "Shows", "gallery/shows").unwrap();
        for i in 0..3 {
            shows = shows.with_image(GalleryImage::new(format!("{i}.jpg")));
        }
        let empty = GalleryCategory::new("empty", "Empty", "gallery/empty").unwrap();
        vec![empty, shows]
    }

    fn lightbox() -> (Lightbox, ScrollLock) {
        let lock = ScrollLock::new();
        let lightbox = Lightbox::new(&gallery(), lock.clone(), ImageSize::new(1000.0, 1000.0));
        (lightbox, lock)
    }

    #[test]
    fn test_empty_categories_excluded() {
        let (lightbox, _) = lightbox();
        assert_eq!(lightbox.categories().len(), 1);
        assert_eq!(lightbox.categories()[0].id, "shows");
    }

    #[test]
    fn test_open_preloads_neighbours_and_locks_scroll() {
        let (mut lightbox, lock) = lightbox();
        let mut host = SimulatedHost::new();

        let event = lightbox.open(ImageRef::new(0, 1), &mut host);
        assert_eq!(event, Some(LightboxEvent::Opened(ImageRef::new(0, 1))));
        assert_eq!(lightbox.phase(), LightboxPhase::Opening);
        assert!(lightbox.is_transitioning());
        assert!(lock.is_locked());
        assert_eq!(
            host.preloaded(),
            &[
                "gallery/shows/1.jpg".to_string(),
                "gallery/shows/0.jpg".to_string(),
                "gallery/shows/2.jpg".to_string(),
            ]
        );

        host.settle(&mut lightbox, Duration::from_secs(1));
        assert_eq!(lightbox.phase(), LightboxPhase::Open);
        assert!(!lightbox.is_transitioning());
    }

    #[test]
    fn test_open_out_of_range_ignored() {
        let (mut lightbox, lock) = lightbox();
        let mut host = SimulatedHost::new();

        assert_eq!(lightbox.open(ImageRef::new(0, 9), &mut host), None);
        assert_eq!(lightbox.open(ImageRef::new(4, 0), &mut host), None);
        assert_eq!(lightbox.phase(), LightboxPhase::Closed);
        assert!(!lock.is_locked());
    }

    #[test]
    fn test_fit_after_load() {
        let (mut lightbox, _) = lightbox();
        let mut host = SimulatedHost::new();
        lightbox.open(ImageRef::new(0, 0), &mut host);
        assert_eq!(lightbox.fitted_size(), FittedSize::Auto);

        lightbox.on_image_loaded("gallery/shows/0.jpg", Some(ImageSize::new(2000.0, 1000.0)), &mut host);
        assert_fitted(lightbox.fitted_size(), 900.0, 450.0);

        lightbox.set_viewport(ImageSize::new(500.0, 500.0));
        assert_fitted(lightbox.fitted_size(), 450.0, 225.0);
    }

    fn assert_fitted(fitted: FittedSize, width: f64, height: f64) {
        let FittedSize::Exact(size) = fitted else {
            panic!("expected an exact size, got {fitted:?}");
        };
        assert!((size.width - width).abs() < 1e-6, "width {}", size.width);
        assert!((size.height - height).abs() < 1e-6, "height {}", size.height);
    }

    #[test]
    fn test_navigate_waits_for_load() {
        let (mut lightbox, _) = lightbox();
        let mut host = SimulatedHost::new();
        lightbox.open(ImageRef::new(0, 0), &mut host);
        host.settle(&mut lightbox, Duration::from_secs(1));

        assert!(lightbox.navigate(Direction::Next, &mut host));
        assert_eq!(lightbox.pending(), Some(ImageRef::new(0, 1)));
        assert!(!lightbox.view().crossfading);

        // Nothing commits until the image reports back.
        host.settle(&mut lightbox, Duration::from_secs(1));
        assert_eq!(lightbox.current(), Some(ImageRef::new(0, 0)));

        lightbox.on_image_loaded("gallery/shows/1.jpg", None, &mut host);
        assert!(lightbox.view().crossfading);
        let events = host.settle(&mut lightbox, Duration::from_secs(1));

        assert_eq!(events, vec![LightboxEvent::Navigated(ImageRef::new(0, 1))]);
        assert_eq!(lightbox.current(), Some(ImageRef::new(0, 1)));
        assert_eq!(lightbox.pending(), None);
        assert_eq!(lightbox.fitted_size(), FittedSize::Auto);
    }

    #[test]
    fn test_navigate_during_crossfade_dropped() {
        let (mut lightbox, _) = lightbox();
        let mut host = SimulatedHost::new();
        lightbox.open(ImageRef::new(0, 0), &mut host);

        assert!(lightbox.navigate(Direction::Next, &mut host));
        assert!(!lightbox.navigate(Direction::Next, &mut host));
        assert_eq!(lightbox.pending(), Some(ImageRef::new(0, 1)));
    }

    #[test]
    fn test_navigate_at_bounds_is_noop() {
        let (mut lightbox, _) = lightbox();
        let mut host = SimulatedHost::new();
        lightbox.open(ImageRef::new(0, 0), &mut host);
        let timers = host.pending_timers();

        assert!(!lightbox.navigate(Direction::Previous, &mut host));
        assert_eq!(lightbox.pending(), None);
        assert_eq!(host.pending_timers(), timers);
    }

    #[test]
    fn test_navigate_when_closed_is_noop() {
        let (mut lightbox, _) = lightbox();
        let mut host = SimulatedHost::new();
        assert!(!lightbox.navigate(Direction::Next, &mut host));
    }

    #[test]
    fn test_close_twice_converges() {
        let (mut lightbox, lock) = lightbox();
        let mut host = SimulatedHost::new();
        lightbox.open(ImageRef::new(0, 0), &mut host);
        host.settle(&mut lightbox, Duration::from_secs(1));

        assert!(lightbox.close(&mut host));
        let timers = host.pending_timers();
        assert!(!lightbox.close(&mut host));
        assert_eq!(host.pending_timers(), timers);
        assert_eq!(lightbox.current(), Some(ImageRef::new(0, 0)));
        assert!(lock.is_locked());

        let events = host.settle(&mut lightbox, Duration::from_secs(1));
        assert_eq!(events, vec![LightboxEvent::Closed]);
        assert_eq!(lightbox.phase(), LightboxPhase::Closed);
        assert_eq!(lightbox.current(), None);
        assert!(!lock.is_locked());
        assert!(lightbox.should_close());
        assert!(!lightbox.close(&mut host));
    }

    #[test]
    fn test_reopen_during_close_survives_stale_timer() {
        let (mut lightbox, lock) = lightbox();
        let mut host = SimulatedHost::new();
        lightbox.open(ImageRef::new(0, 0), &mut host);
        lightbox.close(&mut host);
        lightbox.open(ImageRef::new(0, 2), &mut host);

        host.settle(&mut lightbox, Duration::from_secs(1));
        assert_eq!(lightbox.phase(), LightboxPhase::Open);
        assert_eq!(lightbox.current(), Some(ImageRef::new(0, 2)));
        assert!(lock.is_locked());
    }

    #[test]
    fn test_dropping_lightbox_releases_scroll() {
        let (mut lightbox, lock) = lightbox();
        let mut host = SimulatedHost::new();
        lightbox.open(ImageRef::new(0, 0), &mut host);
        assert!(lock.is_locked());

        drop(lightbox);
        assert!(!lock.is_locked());
    }

    #[test]
    fn test_keys_unbound_while_closed() {
        let (mut lightbox, _) = lightbox();
        let mut host = SimulatedHost::new();
        lightbox.handle_input(&InputEvent::key(Key::Escape), host.now(), &mut host);
        assert_eq!(host.pending_timers(), 0);
    }

    #[test]
    fn test_swipe_left_goes_next() {
        let (mut lightbox, _) = lightbox();
        let mut host = SimulatedHost::new();
        lightbox.open(ImageRef::new(0, 1), &mut host);

        lightbox.handle_input(&InputEvent::TouchStart { x: 300.0, y: 100.0 }, host.now(), &mut host);
        lightbox.handle_input(&InputEvent::TouchEnd { x: 200.0, y: 120.0 }, host.now(), &mut host);
        assert_eq!(lightbox.pending(), Some(ImageRef::new(0, 2)));
    }

    #[test]
    fn test_short_or_vertical_swipe_ignored() {
        let (mut lightbox, _) = lightbox();
        let mut host = SimulatedHost::new();
        lightbox.open(ImageRef::new(0, 1), &mut host);

        lightbox.handle_input(&InputEvent::TouchStart { x: 300.0, y: 100.0 }, host.now(), &mut host);
        lightbox.handle_input(&InputEvent::TouchEnd { x: 260.0, y: 100.0 }, host.now(), &mut host);
        lightbox.handle_input(&InputEvent::TouchStart { x: 300.0, y: 100.0 }, host.now(), &mut host);
        lightbox.handle_input(&InputEvent::TouchEnd { x: 200.0, y: 300.0 }, host.now(), &mut host);
        assert_eq!(lightbox.pending(), None);
    }

    #[test]
    fn test_preload_cache_not_refetched() {
        let (mut lightbox, _) = lightbox();
        let mut host = SimulatedHost::new();
        lightbox.open(ImageRef::new(0, 1), &mut host);
        lightbox.close(&mut host);
        host.settle(&mut lightbox, Duration::from_secs(1));
        lightbox.open(ImageRef::new(0, 1), &mut host);

        assert_eq!(host.preloaded().len(), 3);
    }
}
