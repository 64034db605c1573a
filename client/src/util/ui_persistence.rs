//! Browser localStorage helpers for view and sidebar persistence.
//!
//! SYSTEM CONTEXT
//! ==============
//! These helpers centralize csr-only read/write behavior so components can
//! persist view location, NER filters and sidebar state without repeating
//! web-sys glue. Outside the browser every read misses and writes are no-ops.

#[cfg(test)]
#[path = "ui_persistence_test.rs"]
mod ui_persistence_test;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Last viewed image location (`viewer::location::ImageLocation`).
pub const IMAGE_LOCATION_KEY: &str = "imageLocation";
/// NER page range size.
pub const NER_PAGE_RANGE_KEY: &str = "currentNerPageRange";
/// NER type filter (`-` for all types).
pub const NER_TYPE_KEY: &str = "currentNerType";
/// Sidebar expanded flag.
pub const SIDEBAR_STATUS_KEY: &str = "sidebarStatus";
/// Id of the expanded sidebar panel.
pub const ACTIVE_PANEL_KEY: &str = "activePanel";

#[cfg(feature = "csr")]
const STORAGE_CHECK_KEY: &str = "__storage_check__";

#[cfg(feature = "csr")]
fn storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

/// Whether local storage exists and accepts writes.
pub fn storage_available() -> bool {
    #[cfg(feature = "csr")]
    {
        let Some(storage) = storage() else {
            return false;
        };
        storage.set_item(STORAGE_CHECK_KEY, STORAGE_CHECK_KEY).is_ok() && storage.remove_item(STORAGE_CHECK_KEY).is_ok()
    }
    #[cfg(not(feature = "csr"))]
    {
        false
    }
}

/// Load a JSON value from `localStorage` for `key`.
#[cfg_attr(not(feature = "csr"), allow(unused_variables))]
pub fn load_json<T: DeserializeOwned>(key: &str) -> Option<T> {
    #[cfg(feature = "csr")]
    {
        let raw = storage()?.get_item(key).ok().flatten()?;
        decode(&raw)
    }
    #[cfg(not(feature = "csr"))]
    {
        None
    }
}

/// Save a JSON value to `localStorage` for `key`.
#[cfg_attr(not(feature = "csr"), allow(unused_variables))]
pub fn save_json<T: Serialize>(key: &str, value: &T) {
    #[cfg(feature = "csr")]
    {
        let Some(storage) = storage() else {
            return;
        };
        let Ok(raw) = serde_json::to_string(value) else {
            return;
        };
        if let Err(err) = storage.set_item(key, &raw) {
            log::warn!("localStorage write failed for {key}: {err:?}");
        }
    }
}

/// Parse a stored value. Values written by older page versions may be bare
/// strings rather than JSON, so those are retried as a JSON string.
#[cfg(any(test, feature = "csr"))]
fn decode<T: DeserializeOwned>(raw: &str) -> Option<T> {
    serde_json::from_str(raw).ok().or_else(|| serde_json::from_value(serde_json::Value::String(raw.to_owned())).ok())
}
