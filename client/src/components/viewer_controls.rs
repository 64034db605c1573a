//! Zoom, rotation and reset controls for the page viewer.
//!
//! SYSTEM CONTEXT
//! ==============
//! Reads the published [`ViewerState`] snapshot and queues [`ViewCommand`]s
//! for `ViewerHost` to apply. Never touches the engine directly.

use leptos::prelude::*;

use crate::state::viewer::{ViewCommand, ViewerState, format_zoom_percent};

/// Slider resolution: positions are sent as multiples of this step.
const SLIDER_STEP: f64 = 0.01;

/// Toolbar with zoom slider, zoom, rotate and reset buttons.
#[component]
pub fn ViewerControls() -> impl IntoView {
    let viewer_state = expect_context::<RwSignal<ViewerState>>();

    let send = move |command: ViewCommand| viewer_state.update(|s| s.request(command));
    let slider_value = move || format!("{:.2}", viewer_state.with(|s| s.zoom_slider));
    let zoom_label = move || format_zoom_percent(viewer_state.with(|s| s.zoom));
    let rotation_label = move || format!("{:.0}°", viewer_state.with(|s| s.rotation_deg));
    let editing = move || viewer_state.with(|s| s.transform_active);

    let on_slider = move |ev: leptos::ev::Event| {
        if let Ok(position) = event_target_value(&ev).parse::<f64>() {
            send(ViewCommand::ZoomSlider(position.clamp(0.0, 1.0)));
        }
    };

    view! {
        <div class="viewer-controls">
            <button class="viewer-controls__button viewer-controls__zoom-out" title="Zoom out"
                on:click=move |_| send(ViewCommand::ZoomOut)>"−"</button>
            <input
                class="viewer-controls__slider"
                type="range"
                min="0"
                max="1"
                step=SLIDER_STEP.to_string()
                prop:value=slider_value
                on:input=on_slider
            />
            <button class="viewer-controls__button viewer-controls__zoom-in" title="Zoom in"
                on:click=move |_| send(ViewCommand::ZoomIn)>"+"</button>
            <span class="viewer-controls__label">{zoom_label}</span>
            <span class="viewer-controls__divider"></span>
            <button class="viewer-controls__button viewer-controls__rotate-left" title="Rotate left"
                on:click=move |_| send(ViewCommand::RotateLeft)>"⟲"</button>
            <button class="viewer-controls__button viewer-controls__rotate-right" title="Rotate right"
                on:click=move |_| send(ViewCommand::RotateRight)>"⟳"</button>
            <span class="viewer-controls__label">{rotation_label}</span>
            <span class="viewer-controls__divider"></span>
            <button class="viewer-controls__button viewer-controls__home" title="Fit page"
                on:click=move |_| send(ViewCommand::Home)>"⌂"</button>
            <button class="viewer-controls__button viewer-controls__reset" title="Reset view"
                on:click=move |_| send(ViewCommand::Reset)>"Reset"</button>
            <Show when=editing>
                <span class="viewer-controls__badge">"Editing area"</span>
            </Show>
        </div>
    }
}
