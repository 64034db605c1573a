#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-10;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

// =============================================================
// Point
// =============================================================

#[test]
fn point_distance_is_euclidean() {
    assert!(approx_eq(Point::new(0.0, 0.0).distance_to(Point::new(3.0, 4.0)), 5.0));
}

#[test]
fn point_offset_adds_delta() {
    assert_eq!(Point::new(1.0, 2.0).offset(0.5, -1.0), Point::new(1.5, 1.0));
}

// =============================================================
// Rect
// =============================================================

#[test]
fn rect_from_corners_normalizes_any_order() {
    let r = Rect::from_corners(Point::new(5.0, 1.0), Point::new(2.0, 4.0));
    assert_eq!(r, Rect::new(2.0, 1.0, 3.0, 3.0));
}

#[test]
fn rect_corners_are_clockwise_from_top_left() {
    let r = Rect::new(1.0, 2.0, 3.0, 4.0);
    assert_eq!(
        r.corners(),
        [Point::new(1.0, 2.0), Point::new(4.0, 2.0), Point::new(4.0, 6.0), Point::new(1.0, 6.0)]
    );
}

#[test]
fn rect_contains_is_inclusive() {
    let r = Rect::new(0.0, 0.0, 1.0, 1.0);
    assert!(r.contains(Point::new(0.0, 0.0)));
    assert!(r.contains(Point::new(1.0, 1.0)));
    assert!(r.contains(Point::new(0.5, 0.5)));
    assert!(!r.contains(Point::new(1.01, 0.5)));
}

#[test]
fn rect_center_and_extents() {
    let r = Rect::new(1.0, 1.0, 2.0, 4.0);
    assert_eq!(r.center(), Point::new(2.0, 3.0));
    assert_eq!(r.right(), 3.0);
    assert_eq!(r.bottom(), 5.0);
}

#[test]
fn rect_zero_size_is_empty() {
    assert!(Rect::new(1.0, 1.0, 0.0, 2.0).is_empty());
    assert!(!Rect::new(1.0, 1.0, 0.1, 2.0).is_empty());
}

// =============================================================
// point_segment_distance
// =============================================================

#[test]
fn segment_distance_perpendicular() {
    let d = point_segment_distance(Point::new(5.0, 3.0), Point::new(0.0, 0.0), Point::new(10.0, 0.0));
    assert!(approx_eq(d, 3.0));
}

#[test]
fn segment_distance_clamps_beyond_end() {
    let d = point_segment_distance(Point::new(13.0, 4.0), Point::new(0.0, 0.0), Point::new(10.0, 0.0));
    assert!(approx_eq(d, 5.0));
}

#[test]
fn segment_distance_clamps_before_start() {
    let d = point_segment_distance(Point::new(-3.0, 4.0), Point::new(0.0, 0.0), Point::new(10.0, 0.0));
    assert!(approx_eq(d, 5.0));
}

#[test]
fn segment_distance_zero_length_segment() {
    let a = Point::new(2.0, 2.0);
    let d = point_segment_distance(Point::new(5.0, 6.0), a, a);
    assert!(approx_eq(d, 5.0));
}
