//! Data Ingestion
//!
//! One form per CSV resource type plus a bulk FHIR JSON form, each posting
//! multipart data to the backend and reporting inserted/skipped counts and
//! row errors as toasts. Below the forms, buttons run the backend's
//! data-quality checks.

use cdb_api::models::{ResourceKind, UploadTarget};
use cdb_ui::components::{ChartHeader, CheckPanel, UploadForm};
use cdb_ui::js_bridge;
use cdb_ui::state::{load_config, web_uploader, WebUploader};
use dioxus::prelude::*;
use std::rc::Rc;

const TOASTIFY_JS_URL: &str = "https://cdn.jsdelivr.net/npm/toastify-js@1.12.0/src/toastify.min.js";
const TOASTIFY_CSS_URL: &str = "https://cdn.jsdelivr.net/npm/toastify-js@1.12.0/src/toastify.min.css";

/// (form id, target, title, accepted extensions)
const FORMS: [(&str, UploadTarget, &str, &str); 5] = [
    ("patientCsvForm", UploadTarget::Csv(ResourceKind::Patient), "Pazienti (CSV)", ".csv"),
    ("encounterCsvForm", UploadTarget::Csv(ResourceKind::Encounter), "Incontri (CSV)", ".csv"),
    ("observationCsvForm", UploadTarget::Csv(ResourceKind::Observation), "Parametri (CSV)", ".csv"),
    ("conditionCsvForm", UploadTarget::Csv(ResourceKind::Condition), "Condizioni (CSV)", ".csv"),
    ("genericJsonForm", UploadTarget::JsonBulk, "Bundle FHIR (JSON)", ".json"),
];

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("upload-root"))
        .launch(App);
}

#[component]
fn App() -> Element {
    let config = use_hook(load_config);
    use_context_provider(|| Rc::new(web_uploader(config.clone())) as Rc<WebUploader>);

    use_effect(|| js_bridge::load_scripts());

    rsx! {
        document::Script { src: TOASTIFY_JS_URL }
        document::Stylesheet { href: TOASTIFY_CSS_URL }

        div {
            style: "max-width: 720px; margin: 0 auto; padding: 8px; font-family: system-ui, -apple-system, sans-serif;",

            ChartHeader {
                title: "Caricamento dati".to_string(),
                subtitle: "I file CSV devono avere l'intestazione attesa dal backend".to_string(),
            }
            for (form_id, target, title, accept) in FORMS {
                UploadForm {
                    key: "{form_id}",
                    form_id: form_id.to_string(),
                    target,
                    title: title.to_string(),
                    accept: accept.to_string(),
                }
            }

            ChartHeader { title: "Controlli di qualità".to_string() }
            CheckPanel {}
        }
    }
}
