//! Sidebar chrome state: open/closed status and the expanded panel.
//!
//! DESIGN
//! ======
//! Kept apart from widget state (`ner`, `viewer`) so panels can be reordered
//! or restyled without touching protocol data. Both fields are persisted to
//! local storage by the sidebar components.

#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

/// Persisted sidebar state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SidebarState {
    /// Whether the sidebar is expanded (`sidebarStatus`).
    pub open: bool,
    /// Id of the expanded collapsible panel (`activePanel`).
    pub active_panel: Option<String>,
    /// Local storage passed feature detection at startup.
    pub storage_available: bool,
}

impl Default for SidebarState {
    fn default() -> Self {
        Self { open: true, active_panel: None, storage_available: true }
    }
}

impl SidebarState {
    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// Expand `panel`, or collapse it when it is already the active one.
    pub fn activate(&mut self, panel: &str) {
        if self.is_active(panel) {
            self.active_panel = None;
        } else {
            self.active_panel = Some(panel.to_owned());
        }
    }

    #[must_use]
    pub fn is_active(&self, panel: &str) -> bool {
        self.active_panel.as_deref() == Some(panel)
    }
}
