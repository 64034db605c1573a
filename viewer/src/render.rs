//! Rendering: draws the page image, overlays and transform handles to a 2D context.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! It reads engine state and produces pixels; it does not mutate anything.
//!
//! The context is transformed once so that all drawing happens in viewport
//! coordinates. Stroke widths and handle sizes are given in screen pixels and
//! divided by the camera scale so they stay constant while zooming.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) handles the result.

use js_sys::Array;
use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use crate::config::OverlayStyle;
use crate::consts::{HANDLE_SIZE_PX, TRANSFORM_DASH_PX};
use crate::engine::EngineCore;
use crate::geom::{Point, Rect};
use crate::overlay::{Overlay, Shape};

/// Viewer background behind the page image.
const BACKGROUND: &str = "#2b2b2b";
/// Handle fill for the transforming rectangle.
const HANDLE_FILL: &str = "#ffffff";

/// Draw the full scene.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn draw(ctx: &CanvasRenderingContext2d, core: &EngineCore, image: Option<&HtmlImageElement>) -> Result<(), JsValue> {
    let camera = &core.camera;
    let (w, h) = (camera.viewport_width, camera.viewport_height);

    // Layer 1: clear and set up the viewport transform.
    ctx.set_transform(core.dpr, 0.0, 0.0, core.dpr, 0.0, 0.0)?;
    ctx.set_fill_style_str(BACKGROUND);
    ctx.fill_rect(0.0, 0.0, w, h);

    let c = camera.screen_center();
    let scale = camera.scale();
    ctx.translate(c.x, c.y)?;
    ctx.rotate(camera.rotation_deg.to_radians())?;
    ctx.scale(scale, scale)?;
    ctx.translate(-camera.center.x, -camera.center.y)?;

    // One screen pixel in viewport units.
    let px = 1.0 / scale;

    // Layer 2: page image.
    if let Some(img) = image {
        ctx.draw_image_with_html_image_element_and_dw_and_dh(img, 0.0, 0.0, 1.0, core.image_aspect)?;
    }

    // Layer 3: overlays in insertion order.
    let fallback = OverlayStyle::default();
    for overlay in core.overlays.iter().filter(|o| o.visible) {
        let style = core.config.style_for(&overlay.group).unwrap_or(&fallback);
        draw_overlay(ctx, overlay, style, px);
    }

    // Layer 4: transform outline and handles.
    if let Some(rect) = core.transform.target().and_then(|k| core.overlays.get(k)).filter(|o| o.visible).and_then(Overlay::rect)
    {
        draw_transform_frame(ctx, rect, px)?;
    }

    Ok(())
}

fn draw_overlay(ctx: &CanvasRenderingContext2d, overlay: &Overlay, style: &OverlayStyle, px: f64) {
    let stroke = if overlay.highlighted { style.highlight_stroke.as_str() } else { style.stroke.as_str() };
    ctx.set_stroke_style_str(stroke);

    match &overlay.shape {
        Shape::Rectangle { rect } => {
            if let Some(fill) = &style.fill {
                ctx.set_fill_style_str(fill);
                ctx.fill_rect(rect.x, rect.y, rect.width, rect.height);
            }
            ctx.set_line_width(style.line_width * px);
            ctx.stroke_rect(rect.x, rect.y, rect.width, rect.height);
        }
        Shape::Line { start, end, thickness } => {
            ctx.set_line_width(thickness * px);
            ctx.begin_path();
            ctx.move_to(start.x, start.y);
            ctx.line_to(end.x, end.y);
            ctx.stroke();
        }
    }
}

fn draw_transform_frame(ctx: &CanvasRenderingContext2d, rect: Rect, px: f64) -> Result<(), JsValue> {
    ctx.save();

    let dash = Array::of2(&JsValue::from_f64(TRANSFORM_DASH_PX * px), &JsValue::from_f64(TRANSFORM_DASH_PX * px));
    ctx.set_line_dash(&dash)?;
    ctx.set_line_width(px);
    ctx.set_stroke_style_str(HANDLE_FILL);
    ctx.stroke_rect(rect.x, rect.y, rect.width, rect.height);
    ctx.set_line_dash(&Array::new())?;

    let size = HANDLE_SIZE_PX * px;
    ctx.set_fill_style_str(HANDLE_FILL);
    ctx.set_stroke_style_str("#000000");
    for p in handle_points(&rect) {
        ctx.fill_rect(p.x - size * 0.5, p.y - size * 0.5, size, size);
        ctx.stroke_rect(p.x - size * 0.5, p.y - size * 0.5, size, size);
    }

    ctx.restore();
    Ok(())
}

/// Corner and edge-midpoint handle positions.
fn handle_points(rect: &Rect) -> [Point; 8] {
    let [tl, tr, br, bl] = rect.corners();
    let c = rect.center();
    [
        tl,
        Point::new(c.x, rect.y),
        tr,
        Point::new(rect.right(), c.y),
        br,
        Point::new(c.x, rect.bottom()),
        bl,
        Point::new(rect.x, c.y),
    ]
}
