//! Input model: modifier keys, mouse buttons, and the gesture state machine.
//!
//! `Button` and `Modifiers` capture the user's intent at the time of a pointer
//! or key event. `InputState` is the active gesture tracked between pointer-down and
//! pointer-up; it records which subsystem (camera, transform editor, draw
//! tool) owns the pointer until release.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::geom::Point;

/// Modifier keys held during a key press. Shortcuts are skipped while either
/// is down so browser combinations such as Ctrl+`+` keep working.
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    /// Meta / Command key.
    pub meta: bool,
}

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
    pub fn from_dom(code: i16) -> Option<Self> {
        match code {
            0 => Some(Self::Primary),
            1 => Some(Self::Middle),
            2 => Some(Self::Secondary),
            _ => None,
        }
    }
}

/// A keyboard key as reported by the browser (e.g. `"Escape"`, `"+"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

/// Gesture currently owning the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The user is dragging the image.
    Panning {
        /// Screen-space position of the previous pointer event.
        last_screen: Point,
    },
    /// The transform editor accepted the press and is resizing or moving its target.
    Transforming,
    /// The draw tool accepted the press and is stretching a new rectangle.
    Drawing,
}
