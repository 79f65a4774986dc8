//! Dashboard logic shared by the browser apps and the CLI.
//!
//! This crate turns backend payloads into chart configurations, tracks which
//! chart owns each canvas, and drives the fetch -> derive -> draw cycle
//! without touching the DOM. The browser supplies a [`surface::ChartSurface`]
//! and a [`notify::Notifier`]; tests supply recording fakes.

pub mod aggregate;
pub mod chart_config;
pub mod checks;
pub mod config;
pub mod kind;
pub mod kpi;
pub mod listing;
pub mod notify;
pub mod palette;
pub mod periods;
pub mod registry;
pub mod renderer;
pub mod series;
pub mod surface;
pub mod upload;

#[cfg(test)]
pub(crate) mod testing;

pub use config::DashboardConfig;
pub use kind::{chart_kind, ChartKind};
pub use palette::palette;
pub use renderer::{ComparisonOutcome, RenderOutcome, Renderer};
pub use upload::{UploadOutcome, Uploader};
