//! # tablemap-client
//!
//! Leptos + WASM host for the reservation wizard's table-selection step.
//!
//! This crate contains the step page, the reservation draft state, the
//! availability API call, and the `TableMap` controller that bridges DOM
//! events and fetch results into the `tablemap` engine.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;

/// Browser entry point: installs logging and the panic hook, then mounts [`app::App`].
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Debug).is_err() {
        // A logger is already installed; keep using it.
    }
    leptos::mount::mount_to_body(app::App);
}
