//! Collapsible sidebar chrome with persisted open/expanded state.
//!
//! SYSTEM CONTEXT
//! ==============
//! The backend renders the sidebar frame; these components own only the
//! toggle and the collapsible panel body. State changes are written to local
//! storage (`sidebarStatus`, `activePanel`) so they survive page navigation.

use leptos::prelude::*;

use crate::state::ui::SidebarState;
use crate::util::ui_persistence::{ACTIVE_PANEL_KEY, SIDEBAR_STATUS_KEY, save_json};

/// Button that opens or closes the whole sidebar.
#[component]
pub fn SidebarToggle() -> impl IntoView {
    let sidebar = expect_context::<RwSignal<SidebarState>>();
    let label = move || if sidebar.with(|s| s.open) { "Hide sidebar" } else { "Show sidebar" };
    let on_click = move |_| {
        sidebar.update(SidebarState::toggle);
        save_json(SIDEBAR_STATUS_KEY, &sidebar.with_untracked(|s| s.open));
    };

    view! {
        <button class="sidebar__toggle" on:click=on_click>{label}</button>
    }
}

/// Titled panel whose body is shown only while the sidebar is open and the
/// panel is the active one.
#[component]
pub fn SidebarPanel(id: &'static str, title: &'static str, children: ChildrenFn) -> impl IntoView {
    let sidebar = expect_context::<RwSignal<SidebarState>>();
    let expanded = move || sidebar.with(|s| s.open && s.is_active(id));
    let hidden = move || !sidebar.with(|s| s.open);
    let on_header = move |_| {
        sidebar.update(|s| s.activate(id));
        save_json(ACTIVE_PANEL_KEY, &sidebar.with_untracked(|s| s.active_panel.clone()));
    };

    view! {
        <section class="sidebar__panel" class:sidebar__panel--hidden=hidden id=id>
            <h3 class="sidebar__panel-title" class:sidebar__panel-title--expanded=expanded on:click=on_header>
                {title}
            </h3>
            <Show when=expanded>
                <div class="sidebar__panel-body">{children()}</div>
            </Show>
        </section>
    }
}
