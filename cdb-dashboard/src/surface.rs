use crate::chart_config::ChartConfig;
use crate::registry::ChartHandle;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("cannot draw into '{canvas}': {reason}")]
pub struct DrawError {
    pub canvas: String,
    pub reason: String,
}

/// Something that turns a chart configuration into a live chart on a canvas.
pub trait ChartSurface {
    type Handle: ChartHandle;

    fn draw(&self, canvas_id: &str, config: &ChartConfig) -> Result<Self::Handle, DrawError>;
}
