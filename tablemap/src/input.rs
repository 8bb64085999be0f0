//! Input model: mouse buttons, wheel deltas, and the pan gesture state.
//!
//! The table map has one gesture: dragging the floor plan around. A press
//! starts `InputState::Panning`, moves feed deltas into the camera, and a
//! release or the pointer leaving the canvas ends it. The distance travelled
//! decides whether the click that follows the release should still select.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::camera::Point;

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

impl Button {
    /// Map a DOM `MouseEvent.button` code.
    #[must_use]
    pub fn from_dom(code: i16) -> Self {
        match code {
            1 => Self::Middle,
            2 => Self::Secondary,
            _ => Self::Primary,
        }
    }
}

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

/// Which way a zoom step goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

impl ZoomDirection {
    /// Scrolling up zooms in; anything else zooms out.
    #[must_use]
    pub fn from_wheel(delta: WheelDelta) -> Self {
        if delta.dy < 0.0 { Self::In } else { Self::Out }
    }
}

/// Internal state for the pan gesture.
#[derive(Debug, Clone, Copy, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The user is dragging the floor plan.
    Panning {
        /// Canvas position of the previous pointer event, used to compute the pan delta.
        last_screen: Point,
        /// Total pointer travel since the press, in canvas pixels.
        travelled: f64,
    },
}

impl InputState {
    /// Whether a pan gesture is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Panning { .. })
    }
}
