//! Host scheduling primitives for the UI engines.
//!
//! The engines never own a clock or an event loop. Every operation that may
//! schedule work receives the current time and a [`Host`]; the host later
//! reports frames and timers back through [`Component::on_frame`] and
//! [`Component::on_timer`].
//!
//! [`SimulatedHost`] is a deterministic, in-memory host used by tests and
//! headless drivers.
//!
//! [`Component::on_frame`]: super::Component::on_frame
//! [`Component::on_timer`]: super::Component::on_timer

use std::time::Duration;

use super::Component;

/// Handle for a requested animation frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameId(pub u64);

/// Handle for a fire-and-forget timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

/// Environment services the engines schedule work through.
pub trait Host {
    /// Requests a callback on the next rendered frame.
    fn request_frame(&mut self) -> FrameId;

    /// Cancels a previously requested frame. Unknown ids are ignored.
    fn cancel_frame(&mut self, id: FrameId);

    /// Schedules a one-shot timer. Timers cannot be cancelled.
    fn set_timer(&mut self, delay: Duration) -> TimerId;

    /// Starts loading an image in the background.
    ///
    /// Completion is reported back to the engine by the render layer.
    fn preload_image(&mut self, src: &str);
}

/// A callback the host delivers to an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostCallback {
    /// A requested frame is being rendered
    Frame(FrameId),
    /// A timer elapsed
    Timer(TimerId),
}

/// Interval between simulated frames (~60 fps).
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Deterministic host that queues frames and timers in memory.
///
/// Frames are due one [`FRAME_INTERVAL`] after they were requested; timers
/// are due after their delay. Time only moves when callbacks are drained or
/// [`SimulatedHost::advance_to`] is called.
#[derive(Debug, Default)]
pub struct SimulatedHost {
    now: Duration,
    next_id: u64,
    frames: Vec<(Duration, FrameId)>,
    timers: Vec<(Duration, TimerId)>,
    cancelled_frames: Vec<FrameId>,
    preloads: Vec<String>,
}

impl SimulatedHost {
    /// Creates a host at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current simulated time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Moves the clock forward without delivering anything.
    pub fn advance_to(&mut self, at: Duration) {
        if at > self.now {
            self.now = at;
        }
    }

    /// Number of frame requests still pending.
    #[must_use]
    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }

    /// Number of timers still pending.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Frames that were cancelled before being delivered.
    #[must_use]
    pub fn cancelled_frames(&self) -> &[FrameId] {
        &self.cancelled_frames
    }

    /// Every image source passed to [`Host::preload_image`], in order.
    #[must_use]
    pub fn preloaded(&self) -> &[String] {
        &self.preloads
    }

    /// Removes and returns the earliest callback due at or before `until`.
    ///
    /// Advances the clock to the callback's due time. Frames win ties
    /// against timers.
    pub fn next_due(&mut self, until: Duration) -> Option<(Duration, HostCallback)> {
        let frame = self
            .frames
            .iter()
            .enumerate()
            .min_by_key(|(_, (due, id))| (*due, id.0))
            .map(|(i, (due, _))| (i, *due));
        let timer = self
            .timers
            .iter()
            .enumerate()
            .min_by_key(|(_, (due, id))| (*due, id.0))
            .map(|(i, (due, _))| (i, *due));

        let callback = match (frame, timer) {
            (Some((fi, fdue)), Some((_, tdue))) if fdue <= tdue => {
                let (due, id) = self.frames.remove(fi);
                (due, HostCallback::Frame(id))
            }
            (_, Some((ti, _))) => {
                let (due, id) = self.timers.remove(ti);
                (due, HostCallback::Timer(id))
            }
            (Some((fi, _)), None) => {
                let (due, id) = self.frames.remove(fi);
                (due, HostCallback::Frame(id))
            }
            (None, None) => return None,
        };

        if callback.0 > until {
            // Not due yet; put it back.
            match callback.1 {
                HostCallback::Frame(id) => self.frames.push((callback.0, id)),
                HostCallback::Timer(id) => self.timers.push((callback.0, id)),
            }
            return None;
        }

        self.advance_to(callback.0);
        Some(callback)
    }

    /// Delivers every callback due up to `until` to `component`, then moves
    /// the clock to `until`.
    ///
    /// Returns the events the component emitted, in delivery order.
    pub fn run_until<C: Component>(&mut self, component: &mut C, until: Duration) -> Vec<C::Event> {
        let mut events = Vec::new();
        while let Some((at, callback)) = self.next_due(until) {
            let event = match callback {
                HostCallback::Frame(id) => component.on_frame(id, at, self),
                HostCallback::Timer(id) => component.on_timer(id, at, self),
            };
            events.extend(event);
        }
        self.advance_to(until);
        events
    }

    /// Delivers callbacks until nothing is pending or `limit` is reached.
    pub fn settle<C: Component>(&mut self, component: &mut C, limit: Duration) -> Vec<C::Event> {
        let until = self.now + limit;
        self.run_until(component, until)
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

impl Host for SimulatedHost {
    fn request_frame(&mut self) -> FrameId {
        let id = FrameId(self.next_id());
        self.frames.push((self.now + FRAME_INTERVAL, id));
        id
    }

    fn cancel_frame(&mut self, id: FrameId) {
        let before = self.frames.len();
        self.frames.retain(|(_, frame)| *frame != id);
        if self.frames.len() != before {
            self.cancelled_frames.push(id);
        }
    }

    fn set_timer(&mut self, delay: Duration) -> TimerId {
        let id = TimerId(self.next_id());
        self.timers.push((self.now + delay, id));
        id
    }

    fn preload_image(&mut self, src: &str) {
        self.preloads.push(src.to_string());
    }
}
