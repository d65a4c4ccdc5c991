//! Flip/detail overlay for the centered carousel card.
//!
//! At most one card is flipped, and it is always the centered one. The
//! overlay only tracks phases; the carousel schedules the delays that move
//! between them.

/// Phase of the flipped card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipPhase {
    /// Rotating to the back face; detail content not shown yet
    Entering,
    /// Back face fully shown with its detail content
    Revealed,
    /// Rotating back to the front face
    Leaving,
}

/// What a toggle started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipTransition {
    /// The card started flipping to its back face
    FlipIn,
    /// The card started flipping back to its front face
    FlipOut,
}

/// Flip state of the carousel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FlipOverlay {
    state: Option<(usize, FlipPhase)>,
}

impl FlipOverlay {
    /// Creates an overlay with nothing flipped.
    #[must_use]
    pub const fn new() -> Self {
        Self { state: None }
    }

    /// Index of the flipped item, if any.
    #[must_use]
    pub fn flipped_index(&self) -> Option<usize> {
        self.state.map(|(index, _)| index)
    }

    /// Current phase, if any item is flipped.
    #[must_use]
    pub fn phase(&self) -> Option<FlipPhase> {
        self.state.map(|(_, phase)| phase)
    }

    /// Whether any item is flipped (including while flipping back).
    #[must_use]
    pub const fn is_flipped(&self) -> bool {
        self.state.is_some()
    }

    /// Whether the detail content of the flipped card should be visible.
    #[must_use]
    pub fn detail_visible(&self) -> bool {
        matches!(self.phase(), Some(FlipPhase::Revealed))
    }

    /// Toggles the flip of `index`.
    ///
    /// A card that is flipping back is flipped in again.
    pub fn toggle(&mut self, index: usize) -> FlipTransition {
        match self.state {
            Some((_, FlipPhase::Entering | FlipPhase::Revealed)) => {
                self.state = Some((index, FlipPhase::Leaving));
                FlipTransition::FlipOut
            }
            Some((_, FlipPhase::Leaving)) | None => {
                self.state = Some((index, FlipPhase::Entering));
                FlipTransition::FlipIn
            }
        }
    }

    /// Moves the flip to a new center without changing its phase.
    pub fn follow(&mut self, index: usize) {
        if let Some((_, phase)) = self.state {
            self.state = Some((index, phase));
        }
    }

    /// Marks the detail content visible if the card is still flipping in.
    ///
    /// Returns true if the phase changed.
    pub fn reveal(&mut self) -> bool {
        match self.state {
            Some((index, FlipPhase::Entering)) => {
                self.state = Some((index, FlipPhase::Revealed));
                true
            }
            _ => false,
        }
    }

    /// Clears the flip if the card is still flipping back.
    ///
    /// Returns the index that was cleared.
    pub fn finish_return(&mut self) -> Option<usize> {
        match self.state {
            Some((index, FlipPhase::Leaving)) => {
                self.state = None;
                Some(index)
            }
            _ => None,
        }
    }
}
