//! Viewer telemetry and control requests shared between the host and chrome.
//!
//! ARCHITECTURE
//! ============
//! `ViewerHost` owns the imperative `viewer::engine::Engine` and publishes
//! snapshots through this struct so the controls can render zoom and rotation
//! without touching the engine. Controls talk back by queueing a
//! [`ViewCommand`]; the host applies it when `command_seq` changes.

#[cfg(test)]
#[path = "viewer_test.rs"]
mod viewer_test;

use viewer::engine::{Action, EngineCore};
use viewer::overlay::Overlay;

/// A control request from the viewer chrome.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ViewCommand {
    ZoomIn,
    ZoomOut,
    RotateLeft,
    RotateRight,
    Home,
    Reset,
    /// Zoom to a slider position in `[0, 1]`.
    ZoomSlider(f64),
}

impl ViewCommand {
    /// Run this command against the engine.
    pub fn apply(self, core: &mut EngineCore) -> Vec<Action> {
        match self {
            Self::ZoomIn => core.zoom_in(),
            Self::ZoomOut => core.zoom_out(),
            Self::RotateLeft => core.rotate_left(),
            Self::RotateRight => core.rotate_right(),
            Self::Home => core.go_home(),
            Self::Reset => core.reset(),
            Self::ZoomSlider(position) => core.set_zoom_from_slider(position),
        }
    }
}

/// Live viewer state consumed by the controls.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ViewerState {
    /// Zoom as a slider position in `[0, 1]`.
    pub zoom_slider: f64,
    pub zoom: f64,
    pub rotation_deg: f64,
    pub transform_active: bool,
    /// Most recently drawn or transformed overlay.
    pub last_edit: Option<Overlay>,
    pub last_render_ms: Option<f64>,
    pub command: Option<ViewCommand>,
    pub command_seq: u64,
}

impl ViewerState {
    /// Queue `command` for the host.
    pub fn request(&mut self, command: ViewCommand) {
        self.command = Some(command);
        self.command_seq += 1;
    }

    /// Refresh the published snapshot from the engine.
    pub fn sync_from(&mut self, core: &EngineCore) {
        self.zoom_slider = core.zoom_slider_position();
        self.zoom = core.camera.zoom;
        self.rotation_deg = core.camera.rotation_deg;
        self.transform_active = core.transform_active();
    }
}

/// Zoom level formatted for the controls, e.g. `"150%"`.
#[must_use]
pub fn format_zoom_percent(zoom: f64) -> String {
    format!("{:.0}%", zoom * 100.0)
}
