//! DOM event mapping for the viewer canvas.

#[cfg(test)]
#[path = "viewer_input_test.rs"]
mod viewer_input_test;

use viewer::geom::Point;
use viewer::input::{Button, Modifiers, WheelDelta};

/// Pixels per line for `WheelEvent.deltaMode == 1`.
const WHEEL_LINE_PX: f64 = 16.0;
/// Pixels per page for `WheelEvent.deltaMode == 2`.
const WHEEL_PAGE_PX: f64 = 800.0;

/// Map a DOM `MouseEvent.button` code; unknown buttons act as primary.
pub fn map_button(button: i16) -> Button {
    Button::from_dom(button).unwrap_or(Button::Primary)
}

/// Shortcut modifiers of a key event.
pub fn map_modifiers(ctrl: bool, meta: bool) -> Modifiers {
    Modifiers { ctrl, meta }
}

/// Convert a vertical wheel delta in the event's `deltaMode` unit to pixels.
pub fn wheel_delta(dy: f64, delta_mode: u32) -> WheelDelta {
    let unit = match delta_mode {
        1 => WHEEL_LINE_PX,
        2 => WHEEL_PAGE_PX,
        _ => 1.0,
    };
    WheelDelta { dy: dy * unit }
}

/// Keys the viewer handles itself; the browser default must be suppressed.
pub fn should_prevent_default_key(key: &str) -> bool {
    matches!(key, "+" | "=" | "-" | "0" | "Home" | "Escape")
}

#[cfg(feature = "csr")]
pub fn pointer_point(ev: &leptos::ev::PointerEvent) -> Point {
    Point::new(f64::from(ev.offset_x()), f64::from(ev.offset_y()))
}

#[cfg(feature = "csr")]
pub fn mouse_point(ev: &leptos::ev::MouseEvent) -> Point {
    Point::new(f64::from(ev.offset_x()), f64::from(ev.offset_y()))
}
