//! Show carousel engine.
//!
//! Three fixed slots (left, center, right) display the item before, at and
//! after the centered index. Navigation slides every slot by one spacing with
//! an eased animation and then commits the new center in the same update, so
//! no frame ever shows the new index together with a leftover offset.
//!
//! ## Offset
//!
//! The offset is kept in pixels: raw pointer displacement while dragging,
//! interpolated pixels while animating. [`position_for`] normalises it to slot
//! units. A positive offset moves toward the next item.
//!
//! ## Flip
//!
//! Only the centered item can be flipped. Navigating while flipped swaps the
//! centered item instantly and moves the flip along with it instead of
//! animating the rotation.

use std::time::Duration;

use anyhow::Result;
use tracing::debug;

use crate::config::UiConfig;
use crate::constants::{
    CAROUSEL_SLIDE_DURATION, CLICK_SUPPRESS_WINDOW, DRAG_CLICK_THRESHOLD, DRAG_COMMIT_THRESHOLD,
    DRAG_SETTLE_THRESHOLD, FLIP_RETURN_DELAY, FLIP_REVEAL_DELAY,
};
use crate::models::ShowItem;

use super::component::Component;
use super::easing::Tween;
use super::flip::{FlipOverlay, FlipPhase, FlipTransition};
use super::host::{FrameId, Host, TimerId};
use super::input::{InputEvent, Key};
use super::media::ImageStatus;

/// Opacity of every non-flipped slot while a card is flipped.
pub const DIMMED_OPACITY: f64 = 0.05;

/// Navigation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Toward the item before the center (wraps to the last item)
    Previous,
    /// Toward the item after the center (wraps to the first item)
    Next,
}

impl Direction {
    /// `-1.0` for previous, `1.0` for next.
    #[must_use]
    pub const fn sign(self) -> f64 {
        match self {
            Self::Previous => -1.0,
            Self::Next => 1.0,
        }
    }

    /// Index one step from `index` in a list of `len` items, wrapping.
    #[must_use]
    pub const fn step(self, index: usize, len: usize) -> usize {
        match self {
            Self::Previous => (index + len - 1) % len,
            Self::Next => (index + 1) % len,
        }
    }

    fn from_offset(offset: f64) -> Self {
        if offset < 0.0 {
            Self::Previous
        } else {
            Self::Next
        }
    }
}

/// One of the three visual positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// Item before the center
    Left,
    /// Centered item
    Center,
    /// Item after the center
    Right,
}

impl Slot {
    /// All slots, left to right.
    pub const ALL: [Self; 3] = [Self::Left, Self::Center, Self::Right];

    /// Position relative to the center: -1, 0 or 1.
    #[must_use]
    pub const fn position(self) -> i8 {
        match self {
            Self::Left => -1,
            Self::Center => 0,
            Self::Right => 1,
        }
    }

    /// Stable render key. Slots, not items, identify rendered cards, so two
    /// slots showing the same item never collide.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Left => "slot-left",
            Self::Center => "slot-center",
            Self::Right => "slot-right",
        }
    }
}

/// Visual parameters of one slot for the current frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotTransform {
    /// Horizontal translation in pixels
    pub translate_x: f64,
    /// Uniform scale
    pub scale: f64,
    /// Rotation around the vertical axis, in degrees
    pub rotation_y: f64,
    /// Opacity in `[0, 1]`
    pub opacity: f64,
    /// Stacking order; higher draws on top
    pub stack_order: i32,
}

/// Computes the transform of a slot.
///
/// `offset_fraction` is the current offset in slot units, `slot_spacing` the
/// distance between slots in pixels. `dimmed` is set for every slot except
/// the flipped one while a card is flipped.
#[must_use]
pub fn position_for(slot: Slot, offset_fraction: f64, slot_spacing: f64, dimmed: bool) -> SlotTransform {
    let effective = f64::from(slot.position()) - offset_fraction;
    let distance = effective.abs();

    let opacity = if dimmed {
        DIMMED_OPACITY
    } else {
        0.7f64.mul_add(-distance, 1.0).max(0.2)
    };

    #[allow(clippy::cast_possible_truncation)]
    let stack_order = 100 - (distance * 10.0).round() as i32;

    SlotTransform {
        translate_x: effective * slot_spacing,
        scale: 0.3f64.mul_add(-distance, 1.0).max(0.6),
        rotation_y: -25.0 * effective,
        opacity,
        stack_order,
    }
}

/// Carousel tuning.
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselSettings {
    /// Distance between slots in pixels
    pub slot_spacing: f64,
    /// Image shown in place of a poster that failed to load
    pub placeholder_image: String,
}

impl Default for CarouselSettings {
    fn default() -> Self {
        Self::from(&UiConfig::default())
    }
}

impl From<&UiConfig> for CarouselSettings {
    fn from(ui: &UiConfig) -> Self {
        Self {
            slot_spacing: ui.slot_spacing,
            placeholder_image: ui.placeholder_image.clone(),
        }
    }
}

/// Events emitted by the carousel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselEvent {
    /// A new item is centered
    CenterChanged {
        /// Index of the centered item
        index: usize,
    },
    /// The centered card started flipping to its detail side
    Flipped {
        /// Index of the flipped item
        index: usize,
    },
    /// The flipped card started flipping back
    Unflipped {
        /// Index of the item
        index: usize,
    },
}

/// What a slot shows this frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotView {
    /// Which slot
    pub slot: Slot,
    /// Stable render key
    pub key: &'static str,
    /// Index of the displayed item
    pub item_index: usize,
    /// Poster to draw (the placeholder if the poster failed to load)
    pub poster: String,
    /// Transform for this frame
    pub transform: SlotTransform,
    /// Whether this card shows its back face
    pub flipped: bool,
    /// Whether the detail content on the back face is visible
    pub detail_visible: bool,
}

/// Render descriptor for the whole carousel.
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselView {
    /// Left, center and right slots
    pub slots: [SlotView; 3],
    /// Logically current item
    pub center_index: usize,
    /// An animation is in flight
    pub is_animating: bool,
    /// A drag is in progress
    pub is_dragging: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Motion {
    Idle,
    Dragging {
        origin: f64,
        moved: bool,
    },
    Animating {
        tween: Tween,
        landing: Option<Direction>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CarouselTimer {
    RevealDetail,
    ClearFlip,
    EndClickSuppression,
}

/// Carousel state machine.
#[derive(Debug)]
pub struct Carousel {
    items: Vec<ShowItem>,
    posters: Vec<ImageStatus>,
    settings: CarouselSettings,
    center: usize,
    offset: f64,
    motion: Motion,
    flip: FlipOverlay,
    suppress_click: bool,
    frame: Option<FrameId>,
    timers: Vec<(TimerId, CarouselTimer)>,
}

impl Carousel {
    /// Creates a carousel centered on the first item.
    ///
    /// # Errors
    ///
    /// Returns an error if `items` is empty or the slot spacing is not positive.
    pub fn new(items: Vec<ShowItem>, settings: CarouselSettings) -> Result<Self> {
        if items.is_empty() {
            anyhow::bail!("Carousel needs at least one show");
        }
        if !(settings.slot_spacing.is_finite() && settings.slot_spacing > 0.0) {
            anyhow::bail!(
                "Carousel slot spacing must be positive (got {})",
                settings.slot_spacing
            );
        }

        let posters = vec![ImageStatus::Pending; items.len()];
        Ok(Self {
            items,
            posters,
            settings,
            center: 0,
            offset: 0.0,
            motion: Motion::Idle,
            flip: FlipOverlay::new(),
            suppress_click: false,
            frame: None,
            timers: Vec::new(),
        })
    }

    /// Items in display order.
    #[must_use]
    pub fn items(&self) -> &[ShowItem] {
        &self.items
    }

    /// Index of the centered item.
    #[must_use]
    pub const fn center_index(&self) -> usize {
        self.center
    }

    /// Index of the flipped item. Always the center when set.
    #[must_use]
    pub fn flipped_index(&self) -> Option<usize> {
        self.flip.flipped_index()
    }

    /// Phase of the flipped card.
    #[must_use]
    pub fn flip_phase(&self) -> Option<FlipPhase> {
        self.flip.phase()
    }

    /// Whether the detail content of the flipped card is visible.
    #[must_use]
    pub fn detail_visible(&self) -> bool {
        self.flip.detail_visible()
    }

    /// Current offset in pixels.
    #[must_use]
    pub const fn offset(&self) -> f64 {
        self.offset
    }

    /// Current offset in slot units.
    #[must_use]
    pub fn offset_fraction(&self) -> f64 {
        self.offset / self.settings.slot_spacing
    }

    /// Whether an animation is in flight.
    #[must_use]
    pub const fn is_animating(&self) -> bool {
        matches!(self.motion, Motion::Animating { .. })
    }

    /// Whether a drag is in progress.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        matches!(self.motion, Motion::Dragging { .. })
    }

    /// Index of the item displayed in `slot`.
    #[must_use]
    pub fn item_in(&self, slot: Slot) -> usize {
        let len = self.items.len();
        match slot {
            Slot::Left => Direction::Previous.step(self.center, len),
            Slot::Center => self.center,
            Slot::Right => Direction::Next.step(self.center, len),
        }
    }

    /// Transform of `slot` for the current frame.
    #[must_use]
    pub fn slot_transform(&self, slot: Slot) -> SlotTransform {
        let dimmed = self.flip.is_flipped() && slot != Slot::Center;
        position_for(slot, self.offset_fraction(), self.settings.slot_spacing, dimmed)
    }

    /// Moves one item in `direction`.
    ///
    /// Ignored while dragging or animating. When a card is flipped the
    /// center is swapped instantly and the flip follows it.
    pub fn advance(
        &mut self,
        direction: Direction,
        now: Duration,
        host: &mut dyn Host,
    ) -> Option<CarouselEvent> {
        if self.is_dragging() || self.is_animating() {
            debug!("Ignoring {:?}: carousel is busy", direction);
            return None;
        }
        if self.items.len() < 2 {
            return None;
        }

        if self.flip.is_flipped() {
            return Some(self.swap(direction));
        }

        let to = direction.sign() * self.settings.slot_spacing;
        self.animate(now, self.offset, to, Some(direction), host);
        None
    }

    /// Starts a drag at pointer position `x`. Ignored while animating.
    pub fn begin_drag(&mut self, x: f64) -> bool {
        if self.is_animating() || self.is_dragging() {
            return false;
        }
        self.motion = Motion::Dragging {
            origin: x,
            moved: false,
        };
        self.suppress_click = false;
        true
    }

    /// Tracks the pointer while dragging.
    pub fn update_drag(&mut self, x: f64) {
        if let Motion::Dragging { origin, moved } = &mut self.motion {
            self.offset = *origin - x;
            if self.offset.abs() > DRAG_CLICK_THRESHOLD {
                *moved = true;
            }
        }
    }

    /// Ends the drag and settles on the nearest resting position.
    ///
    /// Past the commit threshold the carousel lands exactly one item away in
    /// the drag direction; shorter drags spring back.
    pub fn end_drag(&mut self, now: Duration, host: &mut dyn Host) -> Option<CarouselEvent> {
        let Motion::Dragging { moved, .. } = self.motion else {
            return None;
        };
        self.motion = Motion::Idle;

        if moved {
            self.suppress_click = true;
            let timer = host.set_timer(CLICK_SUPPRESS_WINDOW);
            self.timers.push((timer, CarouselTimer::EndClickSuppression));
        }

        let distance = self.offset;
        if distance.abs() > DRAG_COMMIT_THRESHOLD && self.items.len() > 1 {
            let direction = Direction::from_offset(distance);
            if self.flip.is_flipped() {
                return Some(self.swap(direction));
            }
            let to = direction.sign() * self.settings.slot_spacing;
            self.animate(now, distance, to, Some(direction), host);
        } else if distance.abs() > DRAG_SETTLE_THRESHOLD {
            self.animate(now, distance, 0.0, None, host);
        } else {
            self.offset = 0.0;
        }
        None
    }

    /// Pointer click on item `index`. The click that ends a drag is
    /// swallowed; otherwise it toggles the flip.
    pub fn click(&mut self, index: usize, host: &mut dyn Host) -> Option<CarouselEvent> {
        if self.suppress_click {
            self.suppress_click = false;
            debug!("Ignoring click on item {} after drag", index);
            return None;
        }
        self.toggle_flip(index, host)
    }

    /// Toggles the flip of `index`. Only the centered item can flip, and
    /// only while the carousel is at rest.
    pub fn toggle_flip(
        &mut self,
        index: usize,
        host: &mut dyn Host,
    ) -> Option<CarouselEvent> {
        if index != self.center || !matches!(self.motion, Motion::Idle) {
            return None;
        }

        match self.flip.toggle(self.center) {
            FlipTransition::FlipIn => {
                let timer = host.set_timer(FLIP_REVEAL_DELAY);
                self.timers.push((timer, CarouselTimer::RevealDetail));
                Some(CarouselEvent::Flipped { index })
            }
            FlipTransition::FlipOut => {
                let timer = host.set_timer(FLIP_RETURN_DELAY);
                self.timers.push((timer, CarouselTimer::ClearFlip));
                Some(CarouselEvent::Unflipped { index })
            }
        }
    }

    /// Records the outcome of a poster load.
    pub fn on_poster_loaded(&mut self, index: usize, status: ImageStatus) {
        if let Some(poster) = self.posters.get_mut(index) {
            *poster = status;
        }
    }

    /// Poster to draw for `index`, falling back to the placeholder.
    #[must_use]
    pub fn poster_src(&self, index: usize) -> &str {
        match (self.items.get(index), self.posters.get(index)) {
            (Some(item), Some(status)) if *status != ImageStatus::Failed => &item.poster,
            _ => &self.settings.placeholder_image,
        }
    }

    fn swap(&mut self, direction: Direction) -> CarouselEvent {
        self.center = direction.step(self.center, self.items.len());
        self.flip.follow(self.center);
        self.offset = 0.0;
        debug!("Swapped to item {} while flipped", self.center);
        CarouselEvent::CenterChanged { index: self.center }
    }

    fn animate(
        &mut self,
        now: Duration,
        from: f64,
        to: f64,
        landing: Option<Direction>,
        host: &mut dyn Host,
    ) {
        if let Some(previous) = self.frame.take() {
            host.cancel_frame(previous);
        }
        self.motion = Motion::Animating {
            tween: Tween::new(now, CAROUSEL_SLIDE_DURATION, from, to),
            landing,
        };
        self.offset = from;
        self.frame = Some(host.request_frame());
    }
}

impl Component for Carousel {
    type Event = CarouselEvent;
    type View = CarouselView;

    fn handle_input(
        &mut self,
        input: &InputEvent,
        now: Duration,
        host: &mut dyn Host,
    ) -> Option<CarouselEvent> {
        match *input {
            InputEvent::PointerDown { x, .. } => {
                self.begin_drag(x);
                None
            }
            InputEvent::PointerMove { x, .. } => {
                self.update_drag(x);
                None
            }
            InputEvent::PointerUp { x, .. } => {
                self.update_drag(x);
                self.end_drag(now, host)
            }
            InputEvent::PointerCancel => self.end_drag(now, host),
            InputEvent::Click { item } => self.click(item, host),
            InputEvent::Key(Key::Left) => self.advance(Direction::Previous, now, host),
            InputEvent::Key(Key::Right) => self.advance(Direction::Next, now, host),
            InputEvent::Key(Key::Enter) => self.toggle_flip(self.center, host),
            _ => None,
        }
    }

    fn on_frame(&mut self, id: FrameId, now: Duration, host: &mut dyn Host) -> Option<CarouselEvent> {
        if self.frame != Some(id) {
            return None;
        }
        self.frame = None;

        let Motion::Animating { tween, landing } = self.motion else {
            return None;
        };

        if tween.is_finished(now) {
            // Commit the index and clear the offset in the same update.
            self.motion = Motion::Idle;
            self.offset = 0.0;
            return landing.map(|direction| {
                self.center = direction.step(self.center, self.items.len());
                debug!("Carousel centered on item {}", self.center);
                CarouselEvent::CenterChanged { index: self.center }
            });
        }

        self.offset = tween.value_at(now);
        self.frame = Some(host.request_frame());
        None
    }

    fn on_timer(&mut self, id: TimerId, _now: Duration, _host: &mut dyn Host) -> Option<CarouselEvent> {
        let position = self.timers.iter().position(|(timer, _)| *timer == id)?;
        let (_, kind) = self.timers.remove(position);

        match kind {
            CarouselTimer::RevealDetail => {
                self.flip.reveal();
            }
            CarouselTimer::ClearFlip => {
                self.flip.finish_return();
            }
            CarouselTimer::EndClickSuppression => {
                self.suppress_click = false;
            }
        }
        None
    }

    fn view(&self) -> CarouselView {
        let slots = Slot::ALL.map(|slot| {
            let item_index = self.item_in(slot);
            let flipped = slot == Slot::Center && self.flip.is_flipped();
            SlotView {
                slot,
                key: slot.key(),
                item_index,
                poster: self.poster_src(item_index).to_string(),
                transform: self.slot_transform(slot),
                flipped,
                detail_visible: flipped && self.flip.detail_visible(),
            }
        });

        CarouselView {
            slots,
            center_index: self.center,
            is_animating: self.is_animating(),
            is_dragging: self.is_dragging(),
        }
    }
}
