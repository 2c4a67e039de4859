//! # gymcontroll-client
//!
//! Leptos + WASM browser client for the GymControll training-management
//! application: users authenticate, then manage trainings and the exercises
//! nested within each training. All persistence and business logic live
//! behind the remote HTTP API; this crate is the UI layer plus the
//! client-side session manager that owns "who is logged in".

#![recursion_limit = "256"]

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point: hydrate the server-rendered shell.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
