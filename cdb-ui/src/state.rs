//! Application state managed via Dioxus context.
//!
//! `AppState` bundles all reactive signals into a single struct provided via
//! `use_context_provider`. Child components retrieve it with `use_context::<AppState>()`.
//! The renderer and uploader are provided alongside it as `Rc`s.

use crate::fetch::WebTransport;
use crate::js_bridge;
use crate::surface::{JsSurface, ToastNotifier};
use cdb_api::models::{AggregateField, KpiSummary, ResourceKind};
use cdb_api::ApiClient;
use cdb_dashboard::listing::ResourceTable;
use cdb_dashboard::periods::PeriodInputs;
use cdb_dashboard::{DashboardConfig, Renderer, Uploader};
use dioxus::prelude::*;
use log::{info, warn};

pub type WebRenderer = Renderer<WebTransport, JsSurface, ToastNotifier>;
pub type WebUploader = Uploader<WebTransport, ToastNotifier>;

/// Defaults overlaid with `window.CDB_CONFIG`, when the page provides one.
pub fn load_config() -> DashboardConfig {
    match js_bridge::page_config_json() {
        Some(json) => match DashboardConfig::from_json(&json) {
            Ok(config) => {
                info!("Using page configuration (API base {:?})", config.api_base);
                config
            }
            Err(e) => {
                warn!("Ignoring malformed CDB_CONFIG: {}", e);
                DashboardConfig::default()
            }
        },
        None => DashboardConfig::default(),
    }
}

pub fn web_renderer(config: DashboardConfig) -> WebRenderer {
    let client = ApiClient::new(WebTransport, config.api_base.clone());
    Renderer::new(client, JsSurface, ToastNotifier, config)
}

pub fn web_uploader(config: DashboardConfig) -> WebUploader {
    let client = ApiClient::new(WebTransport, config.api_base.clone());
    Uploader::new(client, ToastNotifier, config)
}

/// Shared application state for the dashboard apps.
#[derive(Clone, Copy)]
pub struct AppState {
    /// Chart.js is loaded and canvases may be drawn
    pub ready: Signal<bool>,
    /// Error message if something went wrong
    pub error_msg: Signal<Option<String>>,
    /// Last successfully loaded KPI counts
    pub kpis: Signal<Option<KpiSummary>>,
    /// Field shown on `chart1`
    pub field1: Signal<String>,
    /// Field shown on `chart2`
    pub field2: Signal<String>,
    /// Daily incidence window in days
    pub incidence_days: Signal<u32>,
    /// Contents of the four comparison inputs
    pub periods: Signal<PeriodInputs>,
    /// Resource type shown in the table
    pub table_kind: Signal<ResourceKind>,
    pub table: Signal<Option<ResourceTable>>,
}

impl AppState {
    /// Create a new AppState with default signal values.
    pub fn new(config: &DashboardConfig) -> Self {
        Self {
            ready: Signal::new(false),
            error_msg: Signal::new(None),
            kpis: Signal::new(None),
            field1: Signal::new(AggregateField::Gender.as_str().to_string()),
            field2: Signal::new(AggregateField::AgeGroup.as_str().to_string()),
            incidence_days: Signal::new(config.incidence_days),
            periods: Signal::new(PeriodInputs::default()),
            table_kind: Signal::new(ResourceKind::Patient),
            table: Signal::new(None),
        }
    }
}
