//! Error banner, optionally dismissible.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ErrorDisplayProps {
    pub message: String,
    /// Shows a close button when set
    #[props(default)]
    pub on_dismiss: Option<EventHandler<()>>,
}

#[component]
pub fn ErrorDisplay(props: ErrorDisplayProps) -> Element {
    let on_dismiss = props.on_dismiss;

    rsx! {
        div {
            role: "alert",
            style: "display: flex; justify-content: space-between; padding: 12px 16px; margin: 8px 0; background: #FFEBEE; color: #C62828; border-radius: 4px; border: 1px solid #EF9A9A;",
            span {
                strong { "Errore: " }
                "{props.message}"
            }
            if let Some(handler) = on_dismiss {
                button {
                    r#type: "button",
                    style: "background: none; border: none; color: inherit; cursor: pointer;",
                    onclick: move |_| handler.call(()),
                    "✕"
                }
            }
        }
    }
}
