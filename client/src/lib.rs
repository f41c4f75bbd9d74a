//! # client
//!
//! Leptos + WASM frontend for the virtual tabletop. This crate contains the
//! root component, the viewport host, client-side session state, and the
//! WebSocket transport adapter. It integrates with the `tabletop` crate for
//! the camera/gesture/sync engine and imperative canvas rendering via the
//! `TableViewport` bridge component.
//!
//! Browser-only dependencies are optional behind the `csr` feature so the
//! default host build (and `cargo test`) needs no browser environment.

pub mod app;
pub mod components;
pub mod net;
pub mod state;
pub mod util;

/// WASM entry point: installs the panic and log hooks, then mounts the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        leptos::logging::warn!("console logger already initialized");
    }
    leptos::mount::mount_to_body(app::App);
}
