//! Window selector for the daily incidence chart.

use crate::state::AppState;
use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct WindowSelectorProps {
    /// Windows offered, in days
    pub choices: Vec<u32>,
}

/// Dropdown bound to `incidenceDays`.
#[component]
pub fn WindowSelector(props: WindowSelectorProps) -> Element {
    let mut state = use_context::<AppState>();
    let current = (state.incidence_days)();

    let on_change = move |evt: Event<FormData>| {
        if let Ok(days) = evt.value().parse::<u32>() {
            state.incidence_days.set(days.max(1));
        }
    };

    rsx! {
        div {
            style: "margin: 8px 0; display: flex; gap: 12px; align-items: center;",
            label {
                style: "font-weight: bold;",
                "Ultimi: "
                select {
                    id: "incidenceDays",
                    onchange: on_change,
                    for days in props.choices.iter() {
                        option {
                            value: "{days}",
                            selected: *days == current,
                            "{days} giorni"
                        }
                    }
                }
            }
        }
    }
}
