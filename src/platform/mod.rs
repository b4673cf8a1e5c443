//! Platform bindings
//!
//! The simulation is platform-free. On wasm32 the `web` module exposes a
//! `WebGame` handle to JavaScript, which owns the canvas, the event
//! listeners and drawing, and calls in once per animation frame.

#[cfg(target_arch = "wasm32")]
pub mod web;
