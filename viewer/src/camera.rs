//! Viewport camera: pan, zoom and rotation of the page image.
//!
//! Viewport coordinates are normalized so the image width spans `[0, 1]` and
//! the height spans `[0, aspect]`. The camera records which viewport point sits
//! at the centre of the screen, a zoom where `1.0` makes the image width fill
//! the viewer width, and a clockwise view rotation in degrees.

#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use crate::geom::Point;
use crate::zoom::ZoomLimits;

/// Camera state for the page viewer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Viewport point displayed at the centre of the screen.
    pub center: Point,
    /// Zoom factor relative to the "image width fills viewer" level.
    pub zoom: f64,
    /// Clockwise view rotation in degrees, normalized to `[0, 360)`.
    pub rotation_deg: f64,
    /// Viewer width in CSS pixels.
    pub viewport_width: f64,
    /// Viewer height in CSS pixels.
    pub viewport_height: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { center: Point::new(0.5, 0.5), zoom: 1.0, rotation_deg: 0.0, viewport_width: 0.0, viewport_height: 0.0 }
    }
}

impl Camera {
    /// Screen pixels per viewport unit.
    #[must_use]
    pub fn scale(&self) -> f64 {
        (self.zoom * self.viewport_width).max(f64::EPSILON)
    }

    /// Centre of the viewer in screen coordinates.
    #[must_use]
    pub fn screen_center(&self) -> Point {
        Point::new(self.viewport_width * 0.5, self.viewport_height * 0.5)
    }

    /// Convert a screen-space point (CSS pixels) to viewport coordinates.
    #[must_use]
    pub fn screen_to_viewport(&self, screen: Point) -> Point {
        let c = self.screen_center();
        let (dx, dy) = rotate(screen.x - c.x, screen.y - c.y, -self.rotation_deg);
        let s = self.scale();
        Point::new(self.center.x + dx / s, self.center.y + dy / s)
    }

    /// Convert a viewport point to screen coordinates (CSS pixels).
    #[must_use]
    pub fn viewport_to_screen(&self, viewport: Point) -> Point {
        let s = self.scale();
        let (dx, dy) = rotate((viewport.x - self.center.x) * s, (viewport.y - self.center.y) * s, self.rotation_deg);
        let c = self.screen_center();
        Point::new(c.x + dx, c.y + dy)
    }

    /// Convert a screen-space distance (pixels) to a viewport distance.
    #[must_use]
    pub fn screen_dist_to_viewport(&self, screen_dist: f64) -> f64 {
        screen_dist / self.scale()
    }

    /// Move the view by a screen-space delta, as when dragging the image.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        let (vx, vy) = rotate(dx, dy, -self.rotation_deg);
        let s = self.scale();
        self.center = self.center.offset(-vx / s, -vy / s);
    }

    /// Set the zoom, clamped to `limits`, keeping the screen centre fixed.
    pub fn set_zoom(&mut self, zoom: f64, limits: &ZoomLimits) {
        self.zoom = limits.clamp(zoom);
    }

    /// Multiply the zoom by `factor` while keeping the viewport point under
    /// `screen` stationary on screen.
    pub fn zoom_about(&mut self, screen: Point, factor: f64, limits: &ZoomLimits) {
        let before = self.screen_to_viewport(screen);
        self.zoom = limits.clamp(self.zoom * factor);
        let after = self.screen_to_viewport(screen);
        self.center = self.center.offset(before.x - after.x, before.y - after.y);
    }

    /// Set the rotation, normalized to `[0, 360)`.
    pub fn set_rotation(&mut self, degrees: f64) {
        self.rotation_deg = normalize_degrees(degrees);
    }

    /// Zoom at which an image of `aspect` (height / width) fits entirely in
    /// the viewer under the current rotation.
    #[must_use]
    pub fn fit_zoom(&self, aspect: f64) -> f64 {
        if self.viewport_width <= 0.0 || self.viewport_height <= 0.0 || aspect <= 0.0 {
            return 1.0;
        }
        let (w, h) = if quarter_turns(self.rotation_deg) % 2 == 1 { (aspect, 1.0) } else { (1.0, aspect) };
        let scale = (self.viewport_width / w).min(self.viewport_height / h);
        scale / self.viewport_width
    }

    /// Centre the image of `aspect` and zoom so it fits the viewer.
    pub fn go_home(&mut self, aspect: f64, limits: &ZoomLimits) {
        self.center = Point::new(0.5, aspect.max(0.0) * 0.5);
        self.zoom = limits.clamp(self.fit_zoom(aspect));
    }
}

/// Normalize an angle in degrees to `[0, 360)`.
#[must_use]
pub fn normalize_degrees(degrees: f64) -> f64 {
    let r = degrees.rem_euclid(360.0);
    if r >= 360.0 { 0.0 } else { r }
}

/// Number of clockwise quarter turns (0-3) nearest to `degrees`.
#[must_use]
pub fn quarter_turns(degrees: f64) -> u8 {
    let r = normalize_degrees(degrees);
    if !(45.0..315.0).contains(&r) {
        0
    } else if r < 135.0 {
        1
    } else if r < 225.0 {
        2
    } else {
        3
    }
}

/// Rotate a vector clockwise (on a y-down screen) by `degrees`.
fn rotate(x: f64, y: f64, degrees: f64) -> (f64, f64) {
    if degrees == 0.0 {
        return (x, y);
    }
    let (sin, cos) = degrees.to_radians().sin_cos();
    (x * cos - y * sin, x * sin + y * cos)
}
