//! The four date inputs of the period comparison chart.

use crate::state::AppState;
use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct PeriodPickerProps {
    /// Fired by the compare button
    pub on_compare: EventHandler<()>,
}

/// Two start/end pairs plus a compare button.
#[component]
pub fn PeriodPicker(props: PeriodPickerProps) -> Element {
    let mut state = use_context::<AppState>();
    let periods = state.periods.read().clone();
    let on_compare = props.on_compare;

    rsx! {
        div {
            style: "margin: 8px 0; display: flex; flex-wrap: wrap; gap: 12px; align-items: center;",
            label {
                style: "font-weight: bold;",
                "Periodo 1: "
                input {
                    id: "start1",
                    r#type: "date",
                    value: "{periods.start1}",
                    onchange: move |evt: Event<FormData>| state.periods.write().start1 = evt.value(),
                }
                " → "
                input {
                    id: "end1",
                    r#type: "date",
                    value: "{periods.end1}",
                    onchange: move |evt: Event<FormData>| state.periods.write().end1 = evt.value(),
                }
            }
            label {
                style: "font-weight: bold;",
                "Periodo 2: "
                input {
                    id: "start2",
                    r#type: "date",
                    value: "{periods.start2}",
                    onchange: move |evt: Event<FormData>| state.periods.write().start2 = evt.value(),
                }
                " → "
                input {
                    id: "end2",
                    r#type: "date",
                    value: "{periods.end2}",
                    onchange: move |evt: Event<FormData>| state.periods.write().end2 = evt.value(),
                }
            }
            button {
                r#type: "button",
                onclick: move |_| on_compare.call(()),
                "Confronta"
            }
        }
    }
}
