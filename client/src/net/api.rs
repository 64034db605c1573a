//! REST helpers for the NER tag service.
//!
//! Client-side (csr): real HTTP calls via `gloo-net`, cancellable through an
//! `AbortController`. Native builds keep only the pure URL and message helpers.
//!
//! ERROR HANDLING
//! ==============
//! Failures are returned as display strings rather than panics so the widget
//! degrades to an alert box. HTTP failures carry status code and status text.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use tags::{Endpoint, TagError};

/// URL of `endpoint` for record `pi` on the viewer at `rest_base`.
pub fn tags_url(rest_base: &str, pi: &str, endpoint: Endpoint) -> String {
    endpoint.url(rest_base, pi)
}

/// Message shown when the tag service answers with a non-success status.
pub fn tag_request_failed_message(status: u16, status_text: &str) -> String {
    TagError::http(status, status_text).to_string()
}

/// Handle to an in-flight tag request.
///
/// Aborting cancels both the browser fetch and the spawned task awaiting it.
#[cfg(feature = "csr")]
pub struct InFlight {
    controller: Option<web_sys::AbortController>,
    task: futures::future::AbortHandle,
}

#[cfg(feature = "csr")]
impl InFlight {
    pub fn new(controller: Option<web_sys::AbortController>, task: futures::future::AbortHandle) -> Self {
        Self { controller, task }
    }

    pub fn abort(&self) {
        if let Some(controller) = &self.controller {
            controller.abort();
        }
        self.task.abort();
    }
}

/// Fetch and decode a tag document from `url`.
#[cfg(feature = "csr")]
pub async fn fetch_tags(url: &str, signal: Option<&web_sys::AbortSignal>) -> Result<tags::TagDocument, String> {
    let resp = gloo_net::http::Request::get(url)
        .abort_signal(signal)
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if !resp.ok() {
        return Err(tag_request_failed_message(resp.status(), &resp.status_text()));
    }
    let body = resp.text().await.map_err(|e| e.to_string())?;
    tags::TagDocument::decode(&body).map_err(|e| e.to_string())
}
