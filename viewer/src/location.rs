//! Serializable view location, stored by the host between page loads.

#[cfg(test)]
#[path = "location_test.rs"]
mod location_test;

use serde::{Deserialize, Serialize};

use crate::camera::Camera;
use crate::geom::Point;
use crate::zoom::ZoomLimits;

/// Camera centre, zoom and rotation tagged with the page they belong to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageLocation {
    pub x: f64,
    pub y: f64,
    pub zoom: f64,
    pub rotation: f64,
    #[serde(default)]
    pub persistence_id: Option<String>,
}

impl ImageLocation {
    #[must_use]
    pub fn from_camera(camera: &Camera, persistence_id: Option<&str>) -> Self {
        Self {
            x: camera.center.x,
            y: camera.center.y,
            zoom: camera.zoom,
            rotation: camera.rotation_deg,
            persistence_id: persistence_id.map(str::to_owned),
        }
    }

    /// Restore this location into `camera` if it was stored for
    /// `persistence_id`. Returns whether the camera changed.
    pub fn apply(&self, camera: &mut Camera, limits: &ZoomLimits, persistence_id: Option<&str>) -> bool {
        if self.persistence_id.as_deref() != persistence_id {
            return false;
        }
        if ![self.x, self.y, self.zoom, self.rotation].iter().all(|v| v.is_finite()) {
            return false;
        }
        camera.center = Point::new(self.x, self.y);
        camera.set_zoom(self.zoom, limits);
        camera.set_rotation(self.rotation);
        true
    }
}
