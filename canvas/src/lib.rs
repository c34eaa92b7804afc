//! Slide canvas layout engine for the presentation editor and viewer.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns the
//! geometry of free-floating media elements on a fixed-aspect slide:
//! translating raw pointer and keyboard events into element mutations during
//! editing, and reproducing the committed layout on an arbitrary full-screen
//! viewport during playback. The host JavaScript layer wires DOM events to
//! the engine, positions the media nodes from the projected layout, and
//! persists the resulting [`engine::Action`]s.
//!
//! All stored geometry lives in canonical units on [`consts::SURFACE`];
//! physical pixels only appear at the edges (pointer input, projection).
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level editor engine and testable [`engine::EngineCore`] |
//! | [`doc`] | Slide document types and the element store |
//! | [`surface`] | Points, rects, and canonical ↔ physical conversion |
//! | [`snap`] | Grid snapping |
//! | [`gesture`] | Drag, resize, and nudge geometry |
//! | [`input`] | Input event types and the gesture state machine |
//! | [`hit`] | Hit-testing against handles and element bodies |
//! | [`render`] | Editor preview projection and selection overlay |
//! | [`viewer`] | Letterboxed playback projection |
//! | [`playback`] | Registry of mounted video handles |
//! | [`config`] | Host-supplied editor settings |
//! | [`error`] | Decode and configuration errors |
//! | [`consts`] | Shared numeric constants (surface size, minimum size, etc.) |

pub mod config;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod error;
pub mod gesture;
pub mod hit;
pub mod input;
pub mod playback;
pub mod render;
pub mod snap;
pub mod surface;
pub mod viewer;
