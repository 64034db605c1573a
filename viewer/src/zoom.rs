//! Zoom limits and the zoom-slider mapping.
//!
//! The slider exposes zoom as a position in `[0, 1]` mapped linearly onto
//! `[min, max]`. Everything that changes zoom goes through [`ZoomLimits::clamp`].

#[cfg(test)]
#[path = "zoom_test.rs"]
mod zoom_test;

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_ZOOM, MIN_ZOOM};

/// Inclusive bounds on the camera zoom.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomLimits {
    pub min: f64,
    pub max: f64,
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self { min: MIN_ZOOM, max: MAX_ZOOM }
    }
}

impl ZoomLimits {
    /// Clamp `zoom` into the limits. Tolerates swapped bounds.
    #[must_use]
    pub fn clamp(&self, zoom: f64) -> f64 {
        let (lo, hi) = crate::geom::min_max(self.min, self.max);
        zoom.clamp(lo, hi)
    }

    /// Map a slider position in `[0, 1]` to a zoom level.
    #[must_use]
    pub fn slider_to_zoom(&self, position: f64) -> f64 {
        let t = position.clamp(0.0, 1.0);
        self.clamp(self.min + (self.max - self.min) * t)
    }

    /// Map a zoom level to a slider position in `[0, 1]`.
    #[must_use]
    pub fn zoom_to_slider(&self, zoom: f64) -> f64 {
        let span = self.max - self.min;
        if span.abs() <= f64::EPSILON {
            return 0.0;
        }
        ((self.clamp(zoom) - self.min) / span).clamp(0.0, 1.0)
    }
}
