//! Input events delivered to the UI engines.
//!
//! The render layer translates pointer, keyboard and touch events from the
//! browser (or any other host) into [`InputEvent`] so the engines never
//! depend on a particular windowing system.

/// Keys the engines react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Left arrow
    Left,
    /// Right arrow
    Right,
    /// Escape
    Escape,
    /// Enter / Return
    Enter,
}

/// Top-level input event.
///
/// Coordinates are CSS pixels relative to the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Primary pointer pressed
    PointerDown {
        /// Horizontal position
        x: f64,
        /// Vertical position
        y: f64,
    },
    /// Pointer moved while pressed
    PointerMove {
        /// Horizontal position
        x: f64,
        /// Vertical position
        y: f64,
    },
    /// Primary pointer released
    PointerUp {
        /// Horizontal position
        x: f64,
        /// Vertical position
        y: f64,
    },
    /// Pointer left the element or the gesture was aborted
    PointerCancel,
    /// An item was clicked (index into the engine's item list)
    Click {
        /// Index of the clicked item
        item: usize,
    },
    /// A key was pressed
    Key(Key),
    /// A touch began
    TouchStart {
        /// Horizontal position
        x: f64,
        /// Vertical position
        y: f64,
    },
    /// A touch ended
    TouchEnd {
        /// Horizontal position
        x: f64,
        /// Vertical position
        y: f64,
    },
    /// The viewport changed size
    Resize {
        /// New viewport width
        width: f64,
        /// New viewport height
        height: f64,
    },
}

impl InputEvent {
    /// Convenience constructor for a key press.
    #[must_use]
    pub const fn key(key: Key) -> Self {
        Self::Key(key)
    }
}
