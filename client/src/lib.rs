//! Browser UI for the Goobi page viewer.
//!
//! SYSTEM CONTEXT
//! ==============
//! The surrounding page is rendered by the viewer backend. This crate mounts
//! Leptos islands into it: the interactive page viewer with its controls
//! (`#viewer-root`) and the NER facetting sidebar (`#ner-facetting-root`).
//! Browser-only code is gated behind the `csr` feature so state transitions
//! and helpers can be tested natively.

pub mod app;
pub mod components;
pub mod net;
pub mod state;
pub mod util;

/// WASM entry point: install panic and console logging hooks, then mount.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Info) {
        leptos::logging::warn!("console logger unavailable: {err}");
    }
    app::mount();
}
