//! Interactive rectangle drawing.
//!
//! Once armed with a group and id, a press anchors one corner, dragging
//! stretches the rectangle to the pointer, and release finalizes it. Each new
//! drawing supersedes the previous overlay with the same group and id.

#[cfg(test)]
#[path = "draw_test.rs"]
mod draw_test;

use crate::geom::{Point, Rect};
use crate::overlay::{Overlay, OverlayKey, OverlayStore};

/// Rectangle drawing tool state.
#[derive(Debug, Default)]
pub struct DrawTool {
    armed: Option<OverlayKey>,
    anchor: Option<Point>,
}

impl DrawTool {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the tool so the next press draws overlay `key`.
    pub fn start_draw(&mut self, key: OverlayKey) {
        self.armed = Some(key);
        self.anchor = None;
    }

    /// Disarm the tool. A drawing in progress is kept as-is.
    pub fn stop_draw(&mut self) {
        self.armed = None;
        self.anchor = None;
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    #[must_use]
    pub fn is_drawing(&self) -> bool {
        self.anchor.is_some()
    }

    /// Press phase: replace any previous overlay with the armed key by a
    /// zero-size rectangle anchored at `point`.
    pub fn on_press(&mut self, store: &mut OverlayStore, point: Point) -> bool {
        let Some(key) = self.armed.as_ref() else {
            return false;
        };
        while store.remove(key).is_some() {}
        store.add(Overlay::rectangle(key.group.clone(), key.id.clone(), Rect::new(point.x, point.y, 0.0, 0.0)));
        self.anchor = Some(point);
        true
    }

    /// Drag phase: stretch the rectangle between the anchor and `point`.
    pub fn on_drag(&mut self, store: &mut OverlayStore, point: Point) -> Option<Rect> {
        let anchor = self.anchor?;
        let key = self.armed.as_ref()?;
        let rect = Rect::from_corners(anchor, point);
        store.get_mut(key)?.set_rect(rect).then_some(rect)
    }

    /// Release phase: return the finished overlay, or drop it when it has no area.
    pub fn on_release(&mut self, store: &mut OverlayStore) -> Option<Overlay> {
        self.anchor.take()?;
        let key = self.armed.as_ref()?;
        let empty = store.get(key).and_then(Overlay::rect).is_none_or(|r| r.is_empty());
        if empty {
            store.remove(key);
            return None;
        }
        store.get(key).cloned()
    }
}
