//! Typed payloads and API client for the clinical dashboard backend.
//!
//! The network itself sits behind [`transport::HttpTransport`] so the same
//! [`client::ApiClient`] runs over `web-sys` fetch in the browser, over
//! `reqwest` on the command line (feature `api`), and over an in-memory fake
//! in tests (feature `fake`).

pub mod client;
pub mod endpoints;
pub mod error;
pub mod models;
pub mod transport;

#[cfg(feature = "api")]
pub mod native;

#[cfg(any(test, feature = "fake"))]
pub mod fake;

pub use client::ApiClient;
pub use error::{ApiError, Result};
pub use transport::{HttpReply, HttpTransport};
