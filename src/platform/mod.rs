//! Platform abstraction layer
//!
//! Browser bindings for the wasm32 build: a `Date.now()` clock and a
//! `WebGame` wrapper that the page script drives from its pointer/touch
//! handlers and its `requestAnimationFrame` loop. Native hosts use
//! `sim::Game` directly.

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::{JsClock, WebGame};
