//! Component trait pattern for the page engines.
//!
//! This module defines the trait implemented by the self-contained, testable
//! UI engines (carousel, lightbox). A component owns its state, reacts to
//! input and host callbacks, and exposes a pure view for the render layer.

use std::time::Duration;

use super::host::{FrameId, Host, TimerId};
use super::input::InputEvent;

/// A component that can handle input and be rendered.
///
/// Components are self-contained UI engines that manage their own state,
/// schedule work through a [`Host`], and can emit events to communicate
/// with the page.
pub trait Component {
    /// Event type this component can emit
    type Event;

    /// Render descriptor produced for each frame
    type View;

    /// Handle user input.
    ///
    /// Returns `Some(Event)` if the component wants to signal something to the page.
    /// Returns `None` if input was handled internally or ignored.
    fn handle_input(
        &mut self,
        input: &InputEvent,
        now: Duration,
        host: &mut dyn Host,
    ) -> Option<Self::Event>;

    /// Handle a frame callback the component requested earlier.
    ///
    /// Default implementation ignores frames.
    fn on_frame(&mut self, _id: FrameId, _now: Duration, _host: &mut dyn Host) -> Option<Self::Event> {
        None
    }

    /// Handle a timer the component scheduled earlier.
    ///
    /// Default implementation ignores timers.
    fn on_timer(&mut self, _id: TimerId, _now: Duration, _host: &mut dyn Host) -> Option<Self::Event> {
        None
    }

    /// Pure mapping from current state to what the render layer draws.
    fn view(&self) -> Self::View;

    /// Check if component should close.
    ///
    /// Returns `true` if the component has finished its work and should be hidden.
    /// Default implementation returns `false`.
    fn should_close(&self) -> bool {
        false
    }
}
