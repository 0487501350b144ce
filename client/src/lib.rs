//! # client
//!
//! Leptos + WASM frontend for the HR portal.
//!
//! This crate contains the routed pages, the role gate component, the auth
//! context that drives the `access` session resolver, and the browser
//! adapters (local storage, HTTP identity service) the resolver is built on.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install browser logging and hydrate the SSR markup.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
