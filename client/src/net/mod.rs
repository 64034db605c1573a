//! Network access for the client.
//!
//! SYSTEM CONTEXT
//! ==============
//! REST calls to the NER tag service. Wire types live in the shared `tags`
//! crate so they can be tested without a browser.

pub mod api;
