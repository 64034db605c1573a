//! Shared numeric constants for the viewer crate.

// ── Hit-testing ─────────────────────────────────────────────────

/// Screen-space tolerance in pixels for grabbing rectangle corners and edges.
pub const HIT_TOLERANCE_PX: f64 = 10.0;

/// Side length of the square transform handles, in screen pixels.
pub const HANDLE_SIZE_PX: f64 = 8.0;

// ── View controls ───────────────────────────────────────────────

/// Multiplicative zoom factor applied per zoom-in/zoom-out step.
pub const ZOOM_STEP: f64 = 1.2;

/// Lowest zoom level reachable by default (1.0 = image width fills the viewer).
pub const MIN_ZOOM: f64 = 0.2;

/// Highest zoom level reachable by default.
pub const MAX_ZOOM: f64 = 20.0;

/// Rotation applied by one rotate-left/rotate-right step, in degrees.
pub const ROTATION_STEP_DEG: f64 = 90.0;

// ── Rendering ───────────────────────────────────────────────────

/// Dash segment length of the transforming outline, in screen pixels.
pub const TRANSFORM_DASH_PX: f64 = 6.0;
