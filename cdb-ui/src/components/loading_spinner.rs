use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct LoadingSpinnerProps {
    #[props(default = "Caricamento dati...".to_string())]
    pub message: String,
}

/// Centered placeholder shown while the chart library loads.
#[component]
pub fn LoadingSpinner(props: LoadingSpinnerProps) -> Element {
    rsx! {
        div {
            style: "display: flex; justify-content: center; align-items: center; padding: 24px; color: #666; font-style: italic;",
            "{props.message}"
        }
    }
}
