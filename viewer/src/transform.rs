//! Rectangle transform sessions: grab an existing rectangle by a corner, an
//! edge or its body and resize or move it live.
//!
//! A [`TransformEditor`] is owned by the engine and holds at most one session.
//! The interaction has three phases driven by pointer events:
//!
//! 1. **press** classifies the hit-zone under the pointer;
//! 2. **drag** moves the grabbed corner or edge to the pointer, keeping the
//!    opposite side anchored (the interior moves by the pointer delta);
//! 3. **release** hands the edited overlay to the finish hook.
//!
//! With no target set every handler returns `None` so the caller can fall back
//! to its native behaviour (panning).

#[cfg(test)]
#[path = "transform_test.rs"]
mod transform_test;

use std::fmt;

use crate::geom::{Point, Rect};
use crate::hit::{self, HitZone};
use crate::overlay::{Overlay, OverlayKey, OverlayStore};

/// Callback invoked with the edited overlay when a drag is released.
pub type FinishHook = Box<dyn FnMut(&Overlay)>;

/// Gesture context captured at press time.
#[derive(Debug, Clone, Copy)]
struct Drag {
    zone: HitZone,
    start: Point,
    orig: Rect,
}

/// Single-session rectangle transform editor.
#[derive(Default)]
pub struct TransformEditor {
    target: Option<OverlayKey>,
    hook: Option<FinishHook>,
    drag: Option<Drag>,
}

impl fmt::Debug for TransformEditor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformEditor")
            .field("target", &self.target)
            .field("has_hook", &self.hook.is_some())
            .field("drag", &self.drag)
            .finish()
    }
}

impl TransformEditor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the rectangle `key` the editing target and record `hook`.
    ///
    /// Replaces any session already in progress. Returns false, leaving the
    /// editor inactive, when `key` is missing or is not a rectangle.
    pub fn start_drawing(&mut self, store: &OverlayStore, key: OverlayKey, hook: Option<FinishHook>) -> bool {
        self.end_drawing();
        if store.get(&key).and_then(Overlay::rect).is_none() {
            return false;
        }
        log::debug!("transform session started for {}/{}", key.group, key.id);
        self.target = Some(key);
        self.hook = hook;
        true
    }

    /// Clear the session, including any drag in progress.
    pub fn end_drawing(&mut self) {
        if let Some(key) = self.target.take() {
            log::debug!("transform session ended for {}/{}", key.group, key.id);
        }
        self.hook = None;
        self.drag = None;
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.target.is_some()
    }

    /// Whether a press has been accepted and not yet released.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    #[must_use]
    pub fn target(&self) -> Option<&OverlayKey> {
        self.target.as_ref()
    }

    /// Whether `overlay` is the current editing target.
    #[must_use]
    pub fn is_target(&self, overlay: &Overlay) -> bool {
        self.target.as_ref().is_some_and(|k| overlay.is(k))
    }

    /// Zone of the target under `point`, without starting a drag.
    #[must_use]
    pub fn zone_at(&self, store: &OverlayStore, point: Point, tolerance: f64) -> Option<HitZone> {
        let rect = self.target_rect(store)?;
        hit::classify(&rect, point, tolerance)
    }

    /// Press phase. Starts a drag when `point` hits the target.
    pub fn on_press(&mut self, store: &OverlayStore, point: Point, tolerance: f64) -> Option<HitZone> {
        let rect = self.target_rect(store)?;
        let zone = hit::classify(&rect, point, tolerance)?;
        self.drag = Some(Drag { zone, start: point, orig: rect });
        Some(zone)
    }

    /// Drag phase. Writes the recomputed rectangle into the store.
    pub fn on_drag(&mut self, store: &mut OverlayStore, point: Point) -> Option<Rect> {
        let drag = self.drag?;
        let key = self.target.as_ref()?;
        let rect = resize(&drag.orig, drag.zone, drag.start, point);
        let overlay = store.get_mut(key)?;
        overlay.set_rect(rect).then_some(rect)
    }

    /// Release phase. Invokes the finish hook and returns the edited overlay.
    pub fn on_release(&mut self, store: &OverlayStore) -> Option<Overlay> {
        self.drag.take()?;
        let key = self.target.as_ref()?;
        let overlay = store.get(key)?.clone();
        if let Some(hook) = self.hook.as_mut() {
            hook(&overlay);
        }
        Some(overlay)
    }

    fn target_rect(&self, store: &OverlayStore) -> Option<Rect> {
        let key = self.target.as_ref()?;
        store.get(key).filter(|o| o.visible).and_then(Overlay::rect)
    }
}

/// Rectangle produced by dragging `zone` of `orig` from `start` to `pointer`.
///
/// The grabbed corner or edge takes the pointer coordinate on each axis it
/// moves along while the opposite side stays anchored; the result is the
/// min/max box of the two, so it never has a negative width or height. The
/// interior zone translates the rectangle by the pointer delta from `start`.
#[must_use]
pub fn resize(orig: &Rect, zone: HitZone, start: Point, pointer: Point) -> Rect {
    let (left, top, right, bottom) = (orig.x, orig.y, orig.right(), orig.bottom());

    let (moves_left, moves_top, moves_right, moves_bottom) = match zone {
        HitZone::Center => return orig.translate(pointer.x - start.x, pointer.y - start.y),
        HitZone::TopLeft => (true, true, false, false),
        HitZone::Top => (false, true, false, false),
        HitZone::TopRight => (false, true, true, false),
        HitZone::Right => (false, false, true, false),
        HitZone::BottomRight => (false, false, true, true),
        HitZone::Bottom => (false, false, false, true),
        HitZone::BottomLeft => (true, false, false, true),
        HitZone::Left => (true, false, false, false),
    };

    let a = Point::new(if moves_left { pointer.x } else { left }, if moves_top { pointer.y } else { top });
    let b = Point::new(if moves_right { pointer.x } else { right }, if moves_bottom { pointer.y } else { bottom });
    Rect::from_corners(a, b)
}
