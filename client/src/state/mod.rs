//! Reactive client state held in Leptos signals.
//!
//! SYSTEM CONTEXT
//! ==============
//! Plain structs with pure transition methods; components wrap them in
//! `RwSignal` and provide them via context. Keeping them signal-free lets the
//! transitions be tested natively.

pub mod ner;
pub mod ui;
pub mod viewer;
