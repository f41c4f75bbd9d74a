//! Viewport synchronization helpers shared by the viewport host.
//!
//! These helpers bridge the Leptos reactive world and the imperative
//! tabletop engine. They are all `#[cfg(feature = "csr")]` because they
//! depend on `web_sys` and browser-only APIs.

#[cfg(feature = "csr")]
use leptos::prelude::*;

#[cfg(feature = "csr")]
use tabletop::engine::Engine;

/// Read the canvas element's CSS dimensions and device pixel ratio, then
/// push them to the engine.
///
/// Called on every frame so coordinate transforms stay accurate across
/// container resizes. Uses CSS pixel dimensions (`client_width` /
/// `client_height`); the engine multiplies by DPR when sizing the canvas
/// backing store.
#[cfg(feature = "csr")]
pub fn sync_viewport(engine: &mut Engine, canvas_ref: &NodeRef<leptos::html::Canvas>) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(canvas) = canvas_ref.get_untracked() else {
        return;
    };
    let width = f64::from(canvas.client_width()).max(1.0);
    let height = f64::from(canvas.client_height()).max(1.0);
    let dpr = window.device_pixel_ratio().max(1.0);
    engine.set_viewport(width, height, dpr);
}

/// Reflect the engine's gesture state on the canvas cursor.
#[cfg(feature = "csr")]
pub fn apply_cursor(engine: &Engine, canvas_ref: &NodeRef<leptos::html::Canvas>) {
    let Some(canvas) = canvas_ref.get_untracked() else {
        return;
    };
    let _ = canvas.style().set_property("cursor", engine.cursor());
}
