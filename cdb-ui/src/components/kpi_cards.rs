//! The four KPI counters.

use crate::state::AppState;
use cdb_dashboard::kpi::KpiSlot;
use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct KpiCardsProps {
    /// Thousands separator for the counts
    #[props(default = '.')]
    pub separator: char,
}

/// One card per KPI slot; shows "-" until the first summary arrives.
#[component]
pub fn KpiCards(props: KpiCardsProps) -> Element {
    let state = use_context::<AppState>();
    let summary = *state.kpis.read();

    rsx! {
        div {
            style: "display: grid; grid-template-columns: repeat(4, 1fr); gap: 12px; margin: 12px 0;",
            for slot in KpiSlot::ALL.iter() {
                div {
                    key: "{slot.dom_id()}",
                    style: "padding: 12px; border: 1px solid #e0e0e0; border-radius: 6px; text-align: center;",
                    div {
                        style: "font-size: 12px; color: #666;",
                        "{slot.title()}"
                    }
                    div {
                        id: "{slot.dom_id()}",
                        style: "font-size: 24px; font-weight: bold;",
                        {summary.map(|s| slot.text(&s, props.separator)).unwrap_or_else(|| "-".to_string())}
                    }
                }
            }
        }
    }
}
