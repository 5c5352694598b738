// SPDX-License-Identifier: MPL-2.0
//! Pointer gesture recognition for the photo preview.
//!
//! Tracks a horizontal drag from pointer-down to pointer-up and classifies
//! it as a swipe once the displacement exceeds a fixed threshold. Anything
//! shorter is treated as a tap and ignored here (taps are handled by the
//! explicit click targets).

/// Minimum horizontal displacement, in logical pixels, for a drag to count
/// as a swipe.
pub const SWIPE_THRESHOLD: f32 = 50.0;

/// Direction a completed swipe navigates in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    /// Rightward drag: the user pulls the previous photo in.
    Previous,
    /// Leftward drag: the user pushes the current photo away.
    Next,
}

/// Tracks one press-drag-release sequence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SwipeTracker {
    start_x: Option<f32>,
}

impl SwipeTracker {
    /// Starts tracking at the pointer-down position.
    pub fn begin(&mut self, x: f32) {
        self.start_x = Some(x);
    }

    /// Abandons the gesture (pointer left the window, session closed).
    pub fn cancel(&mut self) {
        self.start_x = None;
    }

    pub fn is_tracking(&self) -> bool {
        self.start_x.is_some()
    }

    /// Ends the gesture at the pointer-up position.
    ///
    /// Returns the swipe direction when the absolute displacement exceeds
    /// [`SWIPE_THRESHOLD`]; `None` for taps and when no gesture was being
    /// tracked.
    pub fn finish(&mut self, x: f32) -> Option<SwipeDirection> {
        let start = self.start_x.take()?;
        let delta = x - start;
        if delta.abs() > SWIPE_THRESHOLD {
            Some(if delta < 0.0 {
                SwipeDirection::Next
            } else {
                SwipeDirection::Previous
            })
        } else {
            None
        }
    }
}

/// Which navigation control the pointer position reveals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HoverSide {
    #[default]
    None,
    Left,
    Right,
}

impl HoverSide {
    /// Derives the hover side from the cursor x within a region of the
    /// given width.
    pub fn from_cursor(x: f32, width: f32) -> Self {
        if width <= 0.0 {
            HoverSide::None
        } else if x < width / 2.0 {
            HoverSide::Left
        } else {
            HoverSide::Right
        }
    }
}
