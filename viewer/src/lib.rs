//! Overlay and view-control engine for the Goobi page viewer.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns the
//! interactive layer drawn above a page image: translating raw DOM pointer
//! events into overlay edits, keeping the pan/zoom/rotation camera, hit-testing
//! rectangle handles, and rendering the scene. The host layer only wires DOM
//! events to the engine and reacts to the returned [`engine::Action`]s
//! (cursor changes, redraws, persistence of the view).
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`overlay`] | Overlay shapes and the in-memory overlay store |
//! | [`geom`] | Points, rectangles and segment distance |
//! | [`camera`] | Viewport camera and screen/viewport conversions |
//! | [`zoom`] | Zoom limits and zoom-slider mapping |
//! | [`location`] | Serializable view location for persistence |
//! | [`hit`] | Hit-zone classification for rectangle handles |
//! | [`cursor`] | Rotation-aware cursor feedback |
//! | [`transform`] | Rectangle transform (resize/move) sessions |
//! | [`draw`] | Interactive rectangle drawing |
//! | [`input`] | Input event types and the gesture state machine |
//! | [`config`] | Typed viewer configuration |
//! | [`render`] | Scene rendering to a 2D canvas context |
//! | [`consts`] | Shared numeric constants |

pub mod camera;
pub mod config;
pub mod consts;
pub mod cursor;
pub mod draw;
pub mod engine;
pub mod geom;
pub mod hit;
pub mod input;
pub mod location;
pub mod overlay;
pub mod render;
pub mod transform;
pub mod zoom;
