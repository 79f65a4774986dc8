//! Canvas for a Chart.js chart with a placeholder while nothing is drawn.

use dioxus::prelude::*;

/// Props for ChartCanvas
#[derive(Props, Clone, PartialEq)]
pub struct ChartCanvasProps {
    /// The DOM id of the canvas (Chart.js draws into this)
    pub id: String,
    /// Whether the chart library is still loading
    #[props(default = false)]
    pub loading: bool,
    /// Height in pixels
    #[props(default = 320)]
    pub height: u32,
}

/// A canvas for Chart.js with loading overlay.
#[component]
pub fn ChartCanvas(props: ChartCanvasProps) -> Element {
    let style = format!(
        "height: {}px; position: relative; width: 100%;",
        props.height
    );

    rsx! {
        div {
            style: "{style}",
            if props.loading {
                div {
                    style: "position: absolute; top: 50%; left: 50%; transform: translate(-50%, -50%); color: #666;",
                    "Caricamento grafico..."
                }
            }
            canvas {
                id: "{props.id}",
            }
        }
    }
}
