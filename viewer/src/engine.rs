use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::camera::Camera;
use crate::config::ViewerConfig;
use crate::cursor::{self, Cursor};
use crate::draw::DrawTool;
use crate::geom::{Point, Rect};
use crate::input::{Button, InputState, Key, Modifiers, WheelDelta};
use crate::location::ImageLocation;
use crate::overlay::{Overlay, OverlayKey, OverlayStore};
use crate::render;
use crate::transform::{FinishHook, TransformEditor};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from engine calls for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The pointer cursor should change.
    SetCursor(Cursor),
    /// The scene changed and should be redrawn.
    RenderNeeded,
    /// Pan, zoom or rotation changed; the host may persist the location.
    ViewChanged(ImageLocation),
    /// An interactive drawing finished.
    OverlayDrawn(Overlay),
    /// A transform drag was released.
    OverlayTransformed(Overlay),
    /// A transform session started on the given overlay.
    TransformStarted(OverlayKey),
    /// The transform session ended.
    TransformEnded,
}

/// Core engine state: all logic that does not depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
#[derive(Debug)]
pub struct EngineCore {
    pub config: ViewerConfig,
    pub overlays: OverlayStore,
    pub camera: Camera,
    pub transform: TransformEditor,
    pub draw: DrawTool,
    pub input: InputState,
    /// Page image height divided by width.
    pub image_aspect: f64,
    pub dpr: f64,
    cursor: Cursor,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::new(ViewerConfig::default())
    }
}

impl EngineCore {
    #[must_use]
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            config,
            overlays: OverlayStore::new(),
            camera: Camera::default(),
            transform: TransformEditor::new(),
            draw: DrawTool::new(),
            input: InputState::default(),
            image_aspect: 1.0,
            dpr: 1.0,
            cursor: Cursor::Default,
        }
    }

    // --- Viewport and image ---

    /// Update viewer dimensions (CSS pixels) and device pixel ratio.
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        self.camera.viewport_width = width_css.max(0.0);
        self.camera.viewport_height = height_css.max(0.0);
        self.dpr = if dpr > 0.0 { dpr } else { 1.0 };
    }

    /// Record the natural pixel size of the page image.
    pub fn set_image_size(&mut self, width_px: f64, height_px: f64) -> Vec<Action> {
        if width_px <= 0.0 || height_px <= 0.0 {
            return Vec::new();
        }
        self.image_aspect = height_px / width_px;
        vec![Action::RenderNeeded]
    }

    // --- View controls ---

    /// Fit the whole image into the viewer, keeping the rotation.
    pub fn go_home(&mut self) -> Vec<Action> {
        self.camera.go_home(self.image_aspect, &self.config.zoom);
        self.view_changed()
    }

    /// Clear the rotation and fit the image.
    pub fn reset(&mut self) -> Vec<Action> {
        self.camera.set_rotation(0.0);
        self.go_home()
    }

    pub fn zoom_in(&mut self) -> Vec<Action> {
        self.zoom_by(self.config.zoom_step)
    }

    pub fn zoom_out(&mut self) -> Vec<Action> {
        if self.config.zoom_step <= 0.0 {
            return Vec::new();
        }
        self.zoom_by(1.0 / self.config.zoom_step)
    }

    /// Multiply the zoom by `factor` about the viewer centre.
    pub fn zoom_by(&mut self, factor: f64) -> Vec<Action> {
        let center = self.camera.screen_center();
        self.camera.zoom_about(center, factor, &self.config.zoom);
        self.view_changed()
    }

    pub fn set_zoom(&mut self, zoom: f64) -> Vec<Action> {
        self.camera.set_zoom(zoom, &self.config.zoom);
        self.view_changed()
    }

    /// Apply a zoom-slider position in `[0, 1]`.
    pub fn set_zoom_from_slider(&mut self, position: f64) -> Vec<Action> {
        let zoom = self.config.zoom.slider_to_zoom(position);
        self.set_zoom(zoom)
    }

    /// Current zoom as a slider position in `[0, 1]`.
    #[must_use]
    pub fn zoom_slider_position(&self) -> f64 {
        self.config.zoom.zoom_to_slider(self.camera.zoom)
    }

    pub fn rotate_left(&mut self) -> Vec<Action> {
        self.set_rotation(self.camera.rotation_deg - self.config.rotation_step_deg)
    }

    pub fn rotate_right(&mut self) -> Vec<Action> {
        self.set_rotation(self.camera.rotation_deg + self.config.rotation_step_deg)
    }

    pub fn set_rotation(&mut self, degrees: f64) -> Vec<Action> {
        self.camera.set_rotation(degrees);
        self.view_changed()
    }

    /// Current view as a persistable location.
    #[must_use]
    pub fn location(&self) -> ImageLocation {
        ImageLocation::from_camera(&self.camera, self.config.persistence_id.as_deref())
    }

    /// Restore a stored location if it belongs to this page.
    pub fn restore_location(&mut self, location: &ImageLocation) -> bool {
        location.apply(&mut self.camera, &self.config.zoom, self.config.persistence_id.as_deref())
    }

    // --- Overlays ---

    pub fn draw_rect(&mut self, group: &str, id: &str, rect: Rect) -> Vec<Action> {
        self.overlays.draw_rect(group, id, rect);
        vec![Action::RenderNeeded]
    }

    pub fn draw_line(&mut self, group: &str, id: &str, start: Point, end: Point, thickness: f64) -> Vec<Action> {
        self.overlays.draw_line(group, id, start, end, thickness);
        vec![Action::RenderNeeded]
    }

    /// Remove an overlay, ending its transform session if it had one.
    pub fn remove_overlay(&mut self, key: &OverlayKey) -> Vec<Action> {
        let mut actions = Vec::new();
        if self.transform.target() == Some(key) {
            actions.extend(self.end_transform());
        }
        if self.overlays.remove(key).is_some() {
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    /// Remove a whole group, ending a transform session on one of its overlays.
    pub fn remove_group(&mut self, group: &str) -> Vec<Action> {
        let mut actions = Vec::new();
        if self.transform.target().is_some_and(|k| k.group == group) {
            actions.extend(self.end_transform());
        }
        if self.overlays.remove_group(group) > 0 {
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    pub fn highlight(&mut self, key: &OverlayKey, highlighted: bool) -> Vec<Action> {
        if self.overlays.set_highlighted(key, highlighted) { vec![Action::RenderNeeded] } else { Vec::new() }
    }

    pub fn set_overlay_visible(&mut self, key: &OverlayKey, visible: bool) -> Vec<Action> {
        if self.overlays.set_visible(key, visible) { vec![Action::RenderNeeded] } else { Vec::new() }
    }

    // --- Transform and draw sessions ---

    /// Start a transform session on rectangle `key`.
    pub fn start_transform(&mut self, key: OverlayKey, hook: Option<FinishHook>) -> Vec<Action> {
        let had_session = self.transform.is_active();
        if !self.transform.start_drawing(&self.overlays, key.clone(), hook) {
            return if had_session { vec![Action::TransformEnded, Action::RenderNeeded] } else { Vec::new() };
        }
        vec![Action::TransformStarted(key), Action::RenderNeeded]
    }

    /// End the transform session, restoring the default cursor.
    pub fn end_transform(&mut self) -> Vec<Action> {
        if !self.transform.is_active() {
            return Vec::new();
        }
        self.transform.end_drawing();
        if self.input == InputState::Transforming {
            self.input = InputState::Idle;
        }
        let mut actions = vec![Action::TransformEnded];
        actions.extend(self.set_cursor(Cursor::Default));
        actions.push(Action::RenderNeeded);
        actions
    }

    #[must_use]
    pub fn transform_active(&self) -> bool {
        self.transform.is_active()
    }

    /// Arm interactive drawing of rectangle `key`.
    pub fn start_draw(&mut self, key: OverlayKey) -> Vec<Action> {
        self.draw.start_draw(key);
        self.set_cursor(Cursor::Crosshair).into_iter().collect()
    }

    pub fn stop_draw(&mut self) -> Vec<Action> {
        self.draw.stop_draw();
        if self.input == InputState::Drawing {
            self.input = InputState::Idle;
        }
        self.set_cursor(Cursor::Default).into_iter().collect()
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen: Point, button: Button) -> Vec<Action> {
        let mut actions = Vec::new();
        if button == Button::Secondary {
            return actions;
        }
        if button == Button::Primary {
            let pt = self.camera.screen_to_viewport(screen);
            let tolerance = self.tolerance();
            if let Some(zone) = self.transform.on_press(&self.overlays, pt, tolerance) {
                self.input = InputState::Transforming;
                let cursor = cursor::for_zone(zone, self.camera.rotation_deg);
                actions.extend(self.set_cursor(cursor));
                return actions;
            }
            if self.draw.on_press(&mut self.overlays, pt) {
                self.input = InputState::Drawing;
                actions.extend(self.set_cursor(Cursor::Crosshair));
                actions.push(Action::RenderNeeded);
                return actions;
            }
        }
        self.input = InputState::Panning { last_screen: screen };
        actions.extend(self.set_cursor(Cursor::Grabbing));
        actions
    }

    pub fn on_pointer_move(&mut self, screen: Point) -> Vec<Action> {
        let pt = self.camera.screen_to_viewport(screen);
        match self.input {
            InputState::Panning { last_screen } => {
                self.camera.pan_by(screen.x - last_screen.x, screen.y - last_screen.y);
                self.input = InputState::Panning { last_screen: screen };
                vec![Action::RenderNeeded]
            }
            InputState::Transforming => match self.transform.on_drag(&mut self.overlays, pt) {
                Some(_) => vec![Action::RenderNeeded],
                None => Vec::new(),
            },
            InputState::Drawing => match self.draw.on_drag(&mut self.overlays, pt) {
                Some(_) => vec![Action::RenderNeeded],
                None => Vec::new(),
            },
            InputState::Idle => {
                let cursor = self.hover_cursor(pt);
                self.set_cursor(cursor).into_iter().collect()
            }
        }
    }

    pub fn on_pointer_up(&mut self, screen: Point) -> Vec<Action> {
        let mut actions = Vec::new();
        match std::mem::take(&mut self.input) {
            InputState::Idle => return actions,
            InputState::Transforming => {
                if let Some(overlay) = self.transform.on_release(&self.overlays) {
                    actions.push(Action::OverlayTransformed(overlay));
                }
                actions.push(Action::RenderNeeded);
                // Hover re-derives the zone cursor on the next move.
                actions.extend(self.set_cursor(Cursor::Default));
                return actions;
            }
            InputState::Drawing => {
                if let Some(overlay) = self.draw.on_release(&mut self.overlays) {
                    actions.push(Action::OverlayDrawn(overlay));
                }
                actions.push(Action::RenderNeeded);
            }
            InputState::Panning { .. } => actions.extend(self.view_changed()),
        }
        let cursor = self.hover_cursor(self.camera.screen_to_viewport(screen));
        actions.extend(self.set_cursor(cursor));
        actions
    }

    pub fn on_wheel(&mut self, screen: Point, delta: WheelDelta) -> Vec<Action> {
        let step = self.config.zoom_step;
        if step <= 0.0 || delta.dy == 0.0 {
            return Vec::new();
        }
        let factor = if delta.dy < 0.0 { step } else { 1.0 / step };
        self.camera.zoom_about(screen, factor, &self.config.zoom);
        self.view_changed()
    }

    /// Double-click picks the topmost interactive rectangle for transforming.
    pub fn on_double_click(&mut self, screen: Point) -> Vec<Action> {
        let pt = self.camera.screen_to_viewport(screen);
        let config = &self.config;
        let Some(key) = self
            .overlays
            .topmost_rect_at(pt, |group| config.is_interactive(group))
            .map(Overlay::key)
        else {
            return Vec::new();
        };
        self.start_transform(key, None)
    }

    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        if modifiers.ctrl || modifiers.meta {
            return Vec::new();
        }
        match key.0.as_str() {
            "Escape" => {
                let mut actions = self.end_transform();
                if self.draw.is_armed() {
                    actions.extend(self.stop_draw());
                }
                actions
            }
            "+" | "=" => self.zoom_in(),
            "-" => self.zoom_out(),
            "r" => self.rotate_right(),
            "R" => self.rotate_left(),
            "0" | "Home" => self.go_home(),
            _ => Vec::new(),
        }
    }

    // --- Queries ---

    /// Cursor most recently requested from the host.
    #[must_use]
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    #[must_use]
    pub fn overlay(&self, key: &OverlayKey) -> Option<&Overlay> {
        self.overlays.get(key)
    }

    // --- Internals ---

    fn tolerance(&self) -> f64 {
        self.camera.screen_dist_to_viewport(self.config.hit_tolerance_px)
    }

    fn hover_cursor(&self, pt: Point) -> Cursor {
        if let Some(zone) = self.transform.zone_at(&self.overlays, pt, self.tolerance()) {
            cursor::for_zone(zone, self.camera.rotation_deg)
        } else if self.draw.is_armed() {
            Cursor::Crosshair
        } else {
            Cursor::Default
        }
    }

    fn set_cursor(&mut self, cursor: Cursor) -> Option<Action> {
        if self.cursor == cursor {
            return None;
        }
        self.cursor = cursor;
        Some(Action::SetCursor(cursor))
    }

    fn view_changed(&self) -> Vec<Action> {
        vec![Action::ViewChanged(self.location()), Action::RenderNeeded]
    }
}

/// The full viewer engine. Wraps `EngineCore` and owns the browser canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    image: Option<HtmlImageElement>,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement, config: ViewerConfig) -> Self {
        Self { canvas, image: None, core: EngineCore::new(config) }
    }

    /// Use a loaded page image as the background.
    pub fn set_image(&mut self, image: HtmlImageElement) -> Vec<Action> {
        let (width, height) = (f64::from(image.natural_width()), f64::from(image.natural_height()));
        self.image = Some(image);
        self.core.set_image_size(width, height)
    }

    /// Update viewport dimensions and size the canvas backing store to match.
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        self.core.set_viewport(width_css, height_css, dpr);
        self.canvas.set_width(backing_pixels(self.core.camera.viewport_width, self.core.dpr));
        self.canvas.set_height(backing_pixels(self.core.camera.viewport_height, self.core.dpr));
    }

    // --- Delegated input events ---

    pub fn on_pointer_down(&mut self, screen: Point, button: Button) -> Vec<Action> {
        self.core.on_pointer_down(screen, button)
    }

    pub fn on_pointer_move(&mut self, screen: Point) -> Vec<Action> {
        self.core.on_pointer_move(screen)
    }

    pub fn on_pointer_up(&mut self, screen: Point) -> Vec<Action> {
        self.core.on_pointer_up(screen)
    }

    pub fn on_wheel(&mut self, screen: Point, delta: WheelDelta) -> Vec<Action> {
        self.core.on_wheel(screen, delta)
    }

    pub fn on_double_click(&mut self, screen: Point) -> Vec<Action> {
        self.core.on_double_click(screen)
    }

    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_key_down(key, modifiers)
    }

    // --- Render ---

    /// Draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the 2D context is unavailable or a draw call fails.
    pub fn render(&self) -> Result<(), JsValue> {
        let ctx = self
            .canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(JsValue::from)?;
        render::draw(&ctx, &self.core, self.image.as_ref())
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn backing_pixels(css: f64, dpr: f64) -> u32 {
    (css * dpr).round().max(1.0) as u32
}
