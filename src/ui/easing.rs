//! Time-based interpolation for engine animations.

use std::time::Duration;

/// Cubic ease-out: fast start, gentle landing. `t` is clamped to `[0, 1]`.
#[must_use]
pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// An eased interpolation between two values over a fixed duration.
///
/// A tween stores only its start time and endpoints, so sampling it at the
/// same instant always yields the same value regardless of how many frames
/// were delivered before.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    start: Duration,
    duration: Duration,
    from: f64,
    to: f64,
}

impl Tween {
    /// Creates a tween starting at `start`.
    #[must_use]
    pub const fn new(start: Duration, duration: Duration, from: f64, to: f64) -> Self {
        Self {
            start,
            duration,
            from,
            to,
        }
    }

    /// Linear progress in `[0, 1]`.
    #[must_use]
    pub fn progress(&self, now: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_sub(self.start);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    /// Eased value at `now`.
    #[must_use]
    pub fn value_at(&self, now: Duration) -> f64 {
        let eased = ease_out_cubic(self.progress(now));
        (self.to - self.from).mul_add(eased, self.from)
    }

    /// Whether the tween has reached its end value.
    #[must_use]
    pub fn is_finished(&self, now: Duration) -> bool {
        self.progress(now) >= 1.0
    }
}
