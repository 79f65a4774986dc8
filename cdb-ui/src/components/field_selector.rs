//! Dropdown selector for the field an aggregate chart shows.

use cdb_api::models::AggregateField;
use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct FieldSelectorProps {
    /// DOM id of the select (`aggregationField1`, `aggregationField2`)
    pub id: String,
    /// Currently selected field
    pub selected: String,
    pub on_select: EventHandler<String>,
}

/// Aggregate field dropdown selector.
#[component]
pub fn FieldSelector(props: FieldSelectorProps) -> Element {
    let on_select = props.on_select;
    let on_change = move |evt: Event<FormData>| {
        on_select.call(evt.value());
    };

    rsx! {
        div {
            style: "margin: 8px 0;",
            label {
                r#for: "{props.id}",
                style: "font-weight: bold; margin-right: 8px;",
                "Campo: "
            }
            select {
                id: "{props.id}",
                onchange: on_change,
                for field in AggregateField::ALL.iter() {
                    option {
                        value: "{field.as_str()}",
                        selected: field.as_str() == props.selected,
                        "{field.display_name()}"
                    }
                }
            }
        }
    }
}
