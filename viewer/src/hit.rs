//! Hit-zone classification for rectangle transform handles.
//!
//! A rectangle exposes nine zones: four corners, four edges and the interior.
//! Corners win over edges, edges win over the interior, and anything outside
//! the rectangle and beyond tolerance misses.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::geom::{Point, Rect, point_segment_distance};

/// Which part of a rectangle a pointer landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitZone {
    TopLeft,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
    /// Interior: moves the rectangle without resizing.
    Center,
}

impl HitZone {
    /// Corner zones in the same order as [`Rect::corners`].
    pub const CORNERS: [HitZone; 4] = [Self::TopLeft, Self::TopRight, Self::BottomRight, Self::BottomLeft];

    /// Edge zones in the same order as [`Rect::edges`].
    pub const EDGES: [HitZone; 4] = [Self::Top, Self::Right, Self::Bottom, Self::Left];

    #[must_use]
    pub fn is_corner(self) -> bool {
        Self::CORNERS.contains(&self)
    }

    #[must_use]
    pub fn is_edge(self) -> bool {
        Self::EDGES.contains(&self)
    }
}

/// Classify `point` against `rect` with the given `tolerance` (same units as
/// the rectangle).
#[must_use]
pub fn classify(rect: &Rect, point: Point, tolerance: f64) -> Option<HitZone> {
    let corner = nearest(rect.corners().iter().map(|c| point.distance_to(*c)));
    if let Some((index, dist)) = corner {
        if dist <= tolerance {
            return Some(HitZone::CORNERS[index]);
        }
    }

    let edge = nearest(rect.edges().iter().map(|(a, b)| point_segment_distance(point, *a, *b)));
    if let Some((index, dist)) = edge {
        if dist <= tolerance {
            return Some(HitZone::EDGES[index]);
        }
    }

    rect.contains(point).then_some(HitZone::Center)
}

/// Index and value of the smallest distance; the earliest wins ties.
fn nearest(distances: impl Iterator<Item = f64>) -> Option<(usize, f64)> {
    distances
        .enumerate()
        .fold(None, |best, (i, d)| match best {
            Some((_, best_d)) if best_d <= d => best,
            _ => Some((i, d)),
        })
}
