//! Chart.js canvases and Toastify notifications behind the dashboard traits.

use crate::js_bridge;
use cdb_dashboard::chart_config::ChartConfig;
use cdb_dashboard::notify::{Notifier, Toast};
use cdb_dashboard::registry::ChartHandle;
use cdb_dashboard::surface::{ChartSurface, DrawError};
use log::debug;
use wasm_bindgen::JsValue;

#[derive(Debug, Default, Clone, Copy)]
pub struct JsSurface;

/// A live Chart.js instance.
pub struct JsChart {
    canvas: String,
    chart: JsValue,
}

impl ChartHandle for JsChart {
    fn destroy(&mut self) {
        debug!("Destroying chart on {}", self.canvas);
        js_bridge::destroy_chart(&self.chart);
    }
}

impl ChartSurface for JsSurface {
    type Handle = JsChart;

    fn draw(&self, canvas_id: &str, config: &ChartConfig) -> Result<JsChart, DrawError> {
        js_bridge::create_chart(canvas_id, config)
            .map(|chart| JsChart {
                canvas: canvas_id.to_string(),
                chart,
            })
            .map_err(|reason| DrawError {
                canvas: canvas_id.to_string(),
                reason,
            })
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ToastNotifier;

impl Notifier for ToastNotifier {
    fn notify(&self, toast: Toast) {
        js_bridge::show_toast(&toast);
    }
}
