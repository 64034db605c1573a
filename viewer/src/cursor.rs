//! Pointer cursor feedback.

#[cfg(test)]
#[path = "cursor_test.rs"]
mod cursor_test;

use crate::camera::quarter_turns;
use crate::hit::HitZone;

/// CSS cursor requested by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    #[default]
    Default,
    Crosshair,
    Grabbing,
    Move,
    NsResize,
    EwResize,
    NwseResize,
    NeswResize,
}

impl Cursor {
    /// CSS `cursor` property value.
    #[must_use]
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Crosshair => "crosshair",
            Self::Grabbing => "grabbing",
            Self::Move => "move",
            Self::NsResize => "ns-resize",
            Self::EwResize => "ew-resize",
            Self::NwseResize => "nwse-resize",
            Self::NeswResize => "nesw-resize",
        }
    }

    /// The same resize direction seen after a quarter turn.
    #[must_use]
    fn quarter_turned(self) -> Self {
        match self {
            Self::NsResize => Self::EwResize,
            Self::EwResize => Self::NsResize,
            Self::NwseResize => Self::NeswResize,
            Self::NeswResize => Self::NwseResize,
            other => other,
        }
    }
}

/// Cursor for a hit-zone on an image shown at `rotation_deg`.
///
/// Zones are defined in unrotated viewport space, so at 90° and 270° the
/// vertical and horizontal resize cursors trade places, as do the diagonals.
#[must_use]
pub fn for_zone(zone: HitZone, rotation_deg: f64) -> Cursor {
    let cursor = match zone {
        HitZone::TopLeft | HitZone::BottomRight => Cursor::NwseResize,
        HitZone::TopRight | HitZone::BottomLeft => Cursor::NeswResize,
        HitZone::Top | HitZone::Bottom => Cursor::NsResize,
        HitZone::Left | HitZone::Right => Cursor::EwResize,
        HitZone::Center => Cursor::Move,
    };
    if quarter_turns(rotation_deg) % 2 == 1 { cursor.quarter_turned() } else { cursor }
}
