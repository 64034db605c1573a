//! Mount points and their configuration.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each island reads its configuration from `data-*` attributes on its mount
//! element. Parsing is kept pure ([`ViewerMount::from_attrs`],
//! [`NerMount::from_attrs`]) so it can be tested without a DOM.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use leptos::prelude::*;

use crate::components::ner_facetting::NerFacetting;
use crate::components::sidebar_panel::{SidebarPanel, SidebarToggle};
use crate::components::viewer_controls::ViewerControls;
use crate::components::viewer_host::ViewerHost;
use crate::state::ui::SidebarState;
use crate::state::viewer::ViewerState;
use crate::util::ui_persistence::{ACTIVE_PANEL_KEY, SIDEBAR_STATUS_KEY, load_json, storage_available};
use viewer::config::ViewerConfig;

/// Element id of the viewer island.
pub const VIEWER_ROOT_ID: &str = "viewer-root";
/// Element id of the NER facetting island.
pub const NER_ROOT_ID: &str = "ner-facetting-root";
/// Sidebar panel id of the NER widget.
pub const NER_PANEL_ID: &str = "ner-facetting";

/// Configuration of the viewer island.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewerMount {
    pub config: ViewerConfig,
    pub image_url: String,
}

impl ViewerMount {
    /// Read `data-image-url` and the optional JSON `data-config`.
    ///
    /// # Errors
    ///
    /// Returns a message when the image URL is missing or the config is not valid JSON.
    pub fn from_attrs(get: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let image_url = non_empty(get("data-image-url")).ok_or("missing data-image-url")?;
        let config = match non_empty(get("data-config")) {
            Some(raw) => ViewerConfig::from_json(&raw).map_err(|e| format!("invalid data-config: {e}"))?,
            None => ViewerConfig::default(),
        };
        Ok(Self { config, image_url })
    }
}

/// Configuration of the NER facetting island.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NerMount {
    pub rest_base: String,
    pub pi: String,
    pub total_pages: u32,
    pub current_page: u32,
}

impl NerMount {
    /// Read `data-pi`, `data-rest-base`, `data-total-pages` and `data-current-page`.
    ///
    /// # Errors
    ///
    /// Returns a message when the record identifier is missing.
    pub fn from_attrs(get: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let pi = non_empty(get("data-pi")).ok_or("missing data-pi")?;
        let rest_base = non_empty(get("data-rest-base")).unwrap_or_default();
        let number = |name: &str, fallback: u32| get(name).and_then(|v| v.trim().parse::<u32>().ok()).unwrap_or(fallback);
        Ok(Self { rest_base, pi, total_pages: number("data-total-pages", 1).max(1), current_page: number("data-current-page", 1) })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Viewer island: canvas host plus controls sharing one [`ViewerState`].
#[component]
pub fn ViewerApp(mount: ViewerMount) -> impl IntoView {
    provide_context(RwSignal::new(ViewerState::default()));
    view! {
        <div class="viewer">
            <ViewerHost config=mount.config image_url=mount.image_url />
            <ViewerControls />
        </div>
    }
}

/// NER island: the facetting widget inside a collapsible sidebar panel.
#[component]
pub fn NerApp(mount: NerMount) -> impl IntoView {
    let storage_ok = storage_available();
    let sidebar = SidebarState {
        open: load_json::<bool>(SIDEBAR_STATUS_KEY).unwrap_or(true),
        active_panel: load_json::<Option<String>>(ACTIVE_PANEL_KEY).unwrap_or_else(|| Some(NER_PANEL_ID.to_owned())),
        storage_available: storage_ok,
    };
    provide_context(RwSignal::new(sidebar));
    view! {
        <aside class="sidebar">
            <SidebarToggle />
            <SidebarPanel id=NER_PANEL_ID title="Named entities">
                <NerFacetting mount=mount.clone() />
            </SidebarPanel>
        </aside>
    }
}

/// Mount every island whose root element is present on the page.
#[cfg(feature = "csr")]
pub fn mount() {
    use wasm_bindgen::JsCast;

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let root = |id: &str| document.get_element_by_id(id).and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok());

    if let Some(el) = root(VIEWER_ROOT_ID) {
        match ViewerMount::from_attrs(|name| el.get_attribute(name)) {
            Ok(mount) => leptos::mount::mount_to(el, move || view! { <ViewerApp mount=mount /> }).forget(),
            Err(err) => log::warn!("viewer not mounted: {err}"),
        }
    }
    if let Some(el) = root(NER_ROOT_ID) {
        match NerMount::from_attrs(|name| el.get_attribute(name)) {
            Ok(mount) => leptos::mount::mount_to(el, move || view! { <NerApp mount=mount /> }).forget(),
            Err(err) => log::warn!("NER facetting not mounted: {err}"),
        }
    }
}
