//! Typed viewer configuration.
//!
//! The host passes configuration as JSON (typically a `data-config` attribute
//! on the mount element). Every field has a default so partial documents are
//! accepted; unknown fields are ignored.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::{HIT_TOLERANCE_PX, ROTATION_STEP_DEG, ZOOM_STEP};
use crate::zoom::ZoomLimits;

/// Visual and interaction profile shared by all overlays of a group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OverlayStyle {
    /// Group name this style applies to.
    pub name: String,
    /// CSS stroke color.
    pub stroke: String,
    /// Optional CSS fill color.
    pub fill: Option<String>,
    /// CSS stroke color used while the overlay is highlighted.
    pub highlight_stroke: String,
    /// Stroke width in screen pixels.
    pub line_width: f64,
    /// Whether overlays of this group can be picked for transforming.
    pub interactive: bool,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            name: String::new(),
            stroke: "#3365A9".to_owned(),
            fill: None,
            highlight_stroke: "#F29400".to_owned(),
            line_width: 2.0,
            interactive: false,
        }
    }
}

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewerConfig {
    /// Allowed zoom range.
    pub zoom: ZoomLimits,
    /// Factor applied per zoom-in/zoom-out step and per wheel notch.
    pub zoom_step: f64,
    /// Degrees applied per rotate-left/rotate-right step.
    pub rotation_step_deg: f64,
    /// Grab tolerance for rectangle handles in screen pixels.
    pub hit_tolerance_px: f64,
    /// Identifies the page a stored view location belongs to.
    pub persistence_id: Option<String>,
    /// Per-group overlay styles.
    pub overlay_styles: Vec<OverlayStyle>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            zoom: ZoomLimits::default(),
            zoom_step: ZOOM_STEP,
            rotation_step_deg: ROTATION_STEP_DEG,
            hit_tolerance_px: HIT_TOLERANCE_PX,
            persistence_id: None,
            overlay_styles: Vec::new(),
        }
    }
}

impl ViewerConfig {
    /// Parse configuration from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns the JSON error if `raw` is not a valid configuration object.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Style registered for `group`, if any.
    #[must_use]
    pub fn style_for(&self, group: &str) -> Option<&OverlayStyle> {
        self.overlay_styles.iter().find(|s| s.name == group)
    }

    /// Whether overlays of `group` may be picked for transforming.
    #[must_use]
    pub fn is_interactive(&self, group: &str) -> bool {
        self.style_for(group).is_some_and(|s| s.interactive)
    }
}
