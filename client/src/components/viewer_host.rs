//! Bridge component between Leptos state and the imperative `viewer::Engine`.
//!
//! ARCHITECTURE
//! ============
//! The viewer crate owns hit-testing, overlay editing and rendering. This host
//! maps DOM events into engine calls, applies the returned actions (cursor,
//! redraw, view persistence) and publishes a [`ViewerState`] snapshot for the
//! controls. Control requests come back through `ViewerState::command_seq`.

use leptos::prelude::*;

use viewer::config::ViewerConfig;

#[cfg(feature = "csr")]
use crate::state::viewer::ViewerState;

#[cfg(feature = "csr")]
use std::cell::RefCell;
#[cfg(feature = "csr")]
use std::rc::Rc;

#[cfg(feature = "csr")]
use js_sys::Date;
#[cfg(feature = "csr")]
use viewer::engine::{Action, Engine};
#[cfg(feature = "csr")]
use viewer::input::Key;
#[cfg(feature = "csr")]
use viewer::location::ImageLocation;
#[cfg(feature = "csr")]
use wasm_bindgen::{JsCast, closure::Closure};

#[cfg(feature = "csr")]
use crate::util::ui_persistence::{IMAGE_LOCATION_KEY, load_json, save_json};
#[cfg(feature = "csr")]
use crate::util::viewer_input::{
    map_button, map_modifiers, mouse_point, pointer_point, should_prevent_default_key, wheel_delta,
};

#[cfg(feature = "csr")]
type SharedEngine = Rc<RefCell<Option<Engine>>>;

#[cfg(feature = "csr")]
fn render_and_track(engine: &Engine, viewer_state: RwSignal<ViewerState>) {
    let started_ms = Date::now();
    if let Err(err) = engine.render() {
        log::warn!("viewer render failed: {err:?}");
    }
    let elapsed_ms = (Date::now() - started_ms).max(0.0);
    viewer_state.update(|s| s.last_render_ms = Some(elapsed_ms));
}

#[cfg(feature = "csr")]
fn sync_viewport(engine: &mut Engine, canvas_ref: &NodeRef<leptos::html::Canvas>) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(canvas) = canvas_ref.get() else {
        return;
    };
    let width = f64::from(canvas.client_width()).max(1.0);
    let height = f64::from(canvas.client_height()).max(1.0);
    let dpr = window.device_pixel_ratio().max(1.0);
    let camera = &engine.core.camera;
    let changed = (width - camera.viewport_width).abs() > f64::EPSILON
        || (height - camera.viewport_height).abs() > f64::EPSILON
        || (dpr - engine.core.dpr).abs() > f64::EPSILON;
    if changed {
        engine.set_viewport(width, height, dpr);
    }
}

/// Apply engine actions and redraw when any of them asked for it.
#[cfg(feature = "csr")]
fn process_actions(
    actions: Vec<Action>,
    engine: &Engine,
    canvas_ref: &NodeRef<leptos::html::Canvas>,
    viewer_state: RwSignal<ViewerState>,
) {
    let mut render = false;
    for action in actions {
        match action {
            Action::SetCursor(cursor) => {
                if let Some(canvas) = canvas_ref.get() {
                    if let Err(err) = canvas.style().set_property("cursor", cursor.as_css()) {
                        log::debug!("cursor update failed: {err:?}");
                    }
                }
            }
            Action::RenderNeeded => render = true,
            Action::ViewChanged(location) => save_json(IMAGE_LOCATION_KEY, &location),
            Action::OverlayDrawn(overlay) | Action::OverlayTransformed(overlay) => {
                log::info!("overlay {}/{} edited", overlay.group, overlay.id);
                viewer_state.update(|s| s.last_edit = Some(overlay));
            }
            Action::TransformStarted(key) => log::debug!("transforming {}/{}", key.group, key.id),
            Action::TransformEnded => {}
        }
    }
    viewer_state.update(|s| s.sync_from(&engine.core));
    if render {
        render_and_track(engine, viewer_state);
    }
}

/// Load the page image and hand it to the engine once decoded.
#[cfg(feature = "csr")]
fn load_image(
    engine: &SharedEngine,
    image_url: &str,
    restored: bool,
    canvas_ref: NodeRef<leptos::html::Canvas>,
    viewer_state: RwSignal<ViewerState>,
) {
    let image = match web_sys::HtmlImageElement::new() {
        Ok(image) => image,
        Err(err) => {
            log::warn!("cannot create page image: {err:?}");
            return;
        }
    };

    let engine = Rc::clone(engine);
    let loaded = image.clone();
    let onload = Closure::once(move || {
        if let Some(engine) = engine.borrow_mut().as_mut() {
            sync_viewport(engine, &canvas_ref);
            let mut actions = engine.set_image(loaded);
            if !restored {
                actions.extend(engine.core.go_home());
            }
            process_actions(actions, engine, &canvas_ref, viewer_state);
        }
    });
    let url = image_url.to_owned();
    let onerror = Closure::once(move || log::warn!("page image failed to load: {url}"));

    image.set_onload(Some(onload.as_ref().unchecked_ref()));
    image.set_onerror(Some(onerror.as_ref().unchecked_ref()));
    onload.forget();
    onerror.forget();
    image.set_src(image_url);
}

/// Viewer canvas component.
///
/// Mounts `viewer::engine::Engine` on the canvas, restores the stored view
/// location for this page, and forwards pointer, wheel and keyboard input.
#[component]
#[cfg_attr(not(feature = "csr"), allow(unused_variables))]
pub fn ViewerHost(config: ViewerConfig, image_url: String) -> impl IntoView {
    #[cfg(feature = "csr")]
    let viewer_state = expect_context::<RwSignal<ViewerState>>();
    let canvas_ref = NodeRef::<leptos::html::Canvas>::new();

    #[cfg(feature = "csr")]
    let engine: SharedEngine = Rc::new(RefCell::new(None));

    #[cfg(feature = "csr")]
    {
        let engine = Rc::clone(&engine);
        Effect::new(move || {
            let Some(canvas) = canvas_ref.get() else {
                return;
            };
            if engine.borrow().is_some() {
                return;
            }

            let mut instance = Engine::new(canvas, config.clone());
            sync_viewport(&mut instance, &canvas_ref);
            let restored = load_json::<ImageLocation>(IMAGE_LOCATION_KEY)
                .is_some_and(|location| instance.core.restore_location(&location));
            viewer_state.update(|s| s.sync_from(&instance.core));
            *engine.borrow_mut() = Some(instance);
            load_image(&engine, &image_url, restored, canvas_ref, viewer_state);
        });
    }
    #[cfg(feature = "csr")]
    {
        let engine = Rc::clone(&engine);
        let command_seq = Memo::new(move |_| viewer_state.with(|s| s.command_seq));
        Effect::new(move || {
            if command_seq.get() == 0 {
                return;
            }
            let Some(command) = viewer_state.with_untracked(|s| s.command) else {
                return;
            };
            if let Some(engine) = engine.borrow_mut().as_mut() {
                sync_viewport(engine, &canvas_ref);
                let actions = command.apply(&mut engine.core);
                process_actions(actions, engine, &canvas_ref, viewer_state);
            }
        });
    }

    let on_pointer_down = {
        #[cfg(feature = "csr")]
        {
            let engine = Rc::clone(&engine);
            move |ev: leptos::ev::PointerEvent| {
                ev.prevent_default();
                if let Some(canvas) = canvas_ref.get() {
                    if let Err(err) = canvas.focus() {
                        log::debug!("canvas focus failed: {err:?}");
                    }
                    if let Err(err) = canvas.set_pointer_capture(ev.pointer_id()) {
                        log::debug!("pointer capture failed: {err:?}");
                    }
                }
                if let Some(engine) = engine.borrow_mut().as_mut() {
                    sync_viewport(engine, &canvas_ref);
                    let actions = engine.on_pointer_down(pointer_point(&ev), map_button(ev.button()));
                    process_actions(actions, engine, &canvas_ref, viewer_state);
                }
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            move |_ev: leptos::ev::PointerEvent| {}
        }
    };

    let on_pointer_move = {
        #[cfg(feature = "csr")]
        {
            let engine = Rc::clone(&engine);
            move |ev: leptos::ev::PointerEvent| {
                if let Some(engine) = engine.borrow_mut().as_mut() {
                    let actions = engine.on_pointer_move(pointer_point(&ev));
                    process_actions(actions, engine, &canvas_ref, viewer_state);
                }
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            move |_ev: leptos::ev::PointerEvent| {}
        }
    };

    let on_pointer_up = {
        #[cfg(feature = "csr")]
        {
            let engine = Rc::clone(&engine);
            move |ev: leptos::ev::PointerEvent| {
                if let Some(canvas) = canvas_ref.get() {
                    if let Err(err) = canvas.release_pointer_capture(ev.pointer_id()) {
                        log::debug!("pointer release failed: {err:?}");
                    }
                }
                if let Some(engine) = engine.borrow_mut().as_mut() {
                    let actions = engine.on_pointer_up(pointer_point(&ev));
                    process_actions(actions, engine, &canvas_ref, viewer_state);
                }
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            move |_ev: leptos::ev::PointerEvent| {}
        }
    };

    let on_wheel = {
        #[cfg(feature = "csr")]
        {
            let engine = Rc::clone(&engine);
            move |ev: leptos::ev::WheelEvent| {
                ev.prevent_default();
                if let Some(engine) = engine.borrow_mut().as_mut() {
                    sync_viewport(engine, &canvas_ref);
                    let point = mouse_point(&ev);
                    let delta = wheel_delta(ev.delta_y(), ev.delta_mode());
                    let actions = engine.on_wheel(point, delta);
                    process_actions(actions, engine, &canvas_ref, viewer_state);
                }
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            move |_ev: leptos::ev::WheelEvent| {}
        }
    };

    let on_double_click = {
        #[cfg(feature = "csr")]
        {
            let engine = Rc::clone(&engine);
            move |ev: leptos::ev::MouseEvent| {
                if ev.button() != 0 {
                    return;
                }
                if let Some(engine) = engine.borrow_mut().as_mut() {
                    let actions = engine.on_double_click(mouse_point(&ev));
                    process_actions(actions, engine, &canvas_ref, viewer_state);
                }
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            move |_ev: leptos::ev::MouseEvent| {}
        }
    };

    let on_key_down = {
        #[cfg(feature = "csr")]
        {
            let engine = Rc::clone(&engine);
            move |ev: leptos::ev::KeyboardEvent| {
                let key = ev.key();
                if should_prevent_default_key(&key) {
                    ev.prevent_default();
                }
                if let Some(engine) = engine.borrow_mut().as_mut() {
                    let modifiers = map_modifiers(ev.ctrl_key(), ev.meta_key());
                    let actions = engine.on_key_down(&Key(key), modifiers);
                    process_actions(actions, engine, &canvas_ref, viewer_state);
                }
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            move |_ev: leptos::ev::KeyboardEvent| {}
        }
    };

    view! {
        <canvas
            class="viewer__canvas"
            node_ref=canvas_ref
            tabindex="0"
            on:pointerdown=on_pointer_down
            on:pointermove=on_pointer_move
            on:pointerup=on_pointer_up
            on:dblclick=on_double_click
            on:wheel=on_wheel
            on:keydown=on_key_down
        >
            "Your browser does not support canvas."
        </canvas>
    }
}
