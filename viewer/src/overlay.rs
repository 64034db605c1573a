//! Overlay model: drawn annotations and the in-memory overlay store.
//!
//! An [`Overlay`] is a rectangle or line placed on the page in viewport
//! coordinates. Overlays belong to a named group that selects their style
//! profile; ids are caller-supplied and unique within a group by convention
//! only, so lookups return the first match in insertion order.
//!
//! Data flows into this layer from the host (stored coordinates) and from the
//! input engine (interactive drawing and transforming). The renderer reads
//! from [`OverlayStore::iter`], which yields overlays in draw order.

#[cfg(test)]
#[path = "overlay_test.rs"]
mod overlay_test;

use serde::{Deserialize, Serialize};

use crate::geom::{Point, Rect};

/// Geometry of an overlay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Shape {
    /// Axis-aligned rectangle in viewport coordinates.
    Rectangle { rect: Rect },
    /// Straight segment in viewport coordinates; `thickness` is in screen pixels.
    Line { start: Point, end: Point, thickness: f64 },
}

/// Identity of an overlay: its group and caller-supplied id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OverlayKey {
    pub group: String,
    pub id: String,
}

impl OverlayKey {
    #[must_use]
    pub fn new(group: impl Into<String>, id: impl Into<String>) -> Self {
        Self { group: group.into(), id: id.into() }
    }
}

/// A drawn annotation on the viewer canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Overlay {
    /// Style/interactivity profile name.
    pub group: String,
    /// Caller-supplied identifier.
    pub id: String,
    /// Rectangle or line geometry.
    pub shape: Shape,
    /// Hidden overlays are neither drawn nor hit-tested.
    #[serde(default = "default_visible")]
    pub visible: bool,
    /// Drawn with the group's highlight stroke.
    #[serde(default)]
    pub highlighted: bool,
}

fn default_visible() -> bool {
    true
}

impl Overlay {
    #[must_use]
    pub fn rectangle(group: impl Into<String>, id: impl Into<String>, rect: Rect) -> Self {
        Self { group: group.into(), id: id.into(), shape: Shape::Rectangle { rect }, visible: true, highlighted: false }
    }

    #[must_use]
    pub fn line(group: impl Into<String>, id: impl Into<String>, start: Point, end: Point, thickness: f64) -> Self {
        Self {
            group: group.into(),
            id: id.into(),
            shape: Shape::Line { start, end, thickness },
            visible: true,
            highlighted: false,
        }
    }

    #[must_use]
    pub fn key(&self) -> OverlayKey {
        OverlayKey::new(self.group.clone(), self.id.clone())
    }

    /// Whether this overlay has the given group and id.
    #[must_use]
    pub fn is(&self, key: &OverlayKey) -> bool {
        self.group == key.group && self.id == key.id
    }

    /// The rectangle, if this overlay is a rectangle.
    #[must_use]
    pub fn rect(&self) -> Option<Rect> {
        match self.shape {
            Shape::Rectangle { rect } => Some(rect),
            Shape::Line { .. } => None,
        }
    }

    /// Replace the rectangle geometry. Returns false for lines.
    pub fn set_rect(&mut self, rect: Rect) -> bool {
        match &mut self.shape {
            Shape::Rectangle { rect: r } => {
                *r = rect;
                true
            }
            Shape::Line { .. } => false,
        }
    }
}

/// In-memory list of overlays in insertion (draw) order.
#[derive(Debug, Default)]
pub struct OverlayStore {
    overlays: Vec<Overlay>,
}

impl OverlayStore {
    #[must_use]
    pub fn new() -> Self {
        Self { overlays: Vec::new() }
    }

    /// Append an overlay. Duplicates are allowed.
    pub fn add(&mut self, overlay: Overlay) {
        self.overlays.push(overlay);
    }

    /// Append a rectangle overlay and return its key.
    pub fn draw_rect(&mut self, group: &str, id: &str, rect: Rect) -> OverlayKey {
        self.add(Overlay::rectangle(group, id, rect));
        OverlayKey::new(group, id)
    }

    /// Append a line overlay and return its key.
    pub fn draw_line(&mut self, group: &str, id: &str, start: Point, end: Point, thickness: f64) -> OverlayKey {
        self.add(Overlay::line(group, id, start, end, thickness));
        OverlayKey::new(group, id)
    }

    /// Remove the first overlay matching `key`, returning it if present.
    pub fn remove(&mut self, key: &OverlayKey) -> Option<Overlay> {
        let index = self.overlays.iter().position(|o| o.is(key))?;
        Some(self.overlays.remove(index))
    }

    /// Remove every overlay of `group`, returning how many were removed.
    pub fn remove_group(&mut self, group: &str) -> usize {
        let before = self.overlays.len();
        self.overlays.retain(|o| o.group != group);
        before - self.overlays.len()
    }

    /// Remove all overlays.
    pub fn clear(&mut self) {
        self.overlays.clear();
    }

    #[must_use]
    pub fn get(&self, key: &OverlayKey) -> Option<&Overlay> {
        self.overlays.iter().find(|o| o.is(key))
    }

    pub fn get_mut(&mut self, key: &OverlayKey) -> Option<&mut Overlay> {
        self.overlays.iter_mut().find(|o| o.is(key))
    }

    /// All overlays of `group` in draw order.
    pub fn in_group<'a>(&'a self, group: &'a str) -> impl Iterator<Item = &'a Overlay> + 'a {
        self.overlays.iter().filter(move |o| o.group == group)
    }

    /// All overlays in draw order.
    pub fn iter(&self) -> impl Iterator<Item = &Overlay> {
        self.overlays.iter()
    }

    /// Show or hide an overlay. Returns false if it doesn't exist.
    pub fn set_visible(&mut self, key: &OverlayKey, visible: bool) -> bool {
        let Some(overlay) = self.get_mut(key) else {
            return false;
        };
        overlay.visible = visible;
        true
    }

    /// Toggle the highlight state of an overlay. Returns false if it doesn't exist.
    pub fn set_highlighted(&mut self, key: &OverlayKey, highlighted: bool) -> bool {
        let Some(overlay) = self.get_mut(key) else {
            return false;
        };
        overlay.highlighted = highlighted;
        true
    }

    /// The topmost visible rectangle containing `point` whose group passes
    /// `accept`. Later overlays are drawn above earlier ones.
    pub fn topmost_rect_at<F>(&self, point: Point, accept: F) -> Option<&Overlay>
    where
        F: Fn(&str) -> bool,
    {
        self.overlays
            .iter()
            .rev()
            .filter(|o| o.visible && accept(&o.group))
            .find(|o| o.rect().is_some_and(|r| r.contains(point)))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }
}
