//! Shared Dioxus components and browser glue for the clinical dashboard apps.
//!
//! This crate provides:
//! - `js_bridge`: Rust wrappers for the Chart.js and Toastify glue via `js_sys::eval()`
//! - `fetch`: the `web-sys` fetch transport for the API client
//! - `surface`: Chart.js canvases and toasts behind the dashboard traits
//! - `state`: Reactive AppState with Dioxus Signals
//! - `components`: Reusable RSX components (selectors, canvases, forms, etc.)

pub mod js_bridge;
pub mod fetch;
pub mod surface;
pub mod state;
pub mod components;
