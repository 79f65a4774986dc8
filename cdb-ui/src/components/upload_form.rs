//! File upload form posting multipart data to an ingestion endpoint.

use crate::fetch::form_data;
use crate::state::WebUploader;
use cdb_api::models::UploadTarget;
use dioxus::prelude::*;
use log::error;
use std::rc::Rc;

#[derive(Props, Clone, PartialEq)]
pub struct UploadFormProps {
    /// DOM id of the form (`patientCsvForm`, ..., `genericJsonForm`)
    pub form_id: String,
    pub target: UploadTarget,
    pub title: String,
    /// Value of the file input's `accept` attribute
    #[props(default = ".csv".to_string())]
    pub accept: String,
}

/// Upload form; its submit button stays disabled while a request is in flight.
#[component]
pub fn UploadForm(props: UploadFormProps) -> Element {
    let uploader = use_context::<Rc<WebUploader>>();
    let mut busy = use_signal(|| false);
    let form_id = props.form_id.clone();
    let target = props.target;

    let on_submit = move |evt: Event<FormData>| {
        evt.prevent_default();
        if busy() {
            return;
        }
        let Some(form) = form_data(&form_id) else {
            error!("Form {} not found", form_id);
            return;
        };
        busy.set(true);
        let uploader = uploader.clone();
        let form_id = form_id.clone();
        spawn(async move {
            uploader.submit(&form_id, target, form).await;
            busy.set(false);
        });
    };

    rsx! {
        form {
            id: "{props.form_id}",
            style: "margin: 8px 0; padding: 12px; border: 1px solid #e0e0e0; border-radius: 6px;",
            onsubmit: on_submit,
            h4 {
                style: "margin: 0 0 8px 0;",
                "{props.title}"
            }
            input {
                r#type: "file",
                name: "file",
                accept: "{props.accept}",
                required: true,
            }
            button {
                r#type: "submit",
                disabled: busy(),
                style: "margin-left: 8px;",
                if busy() { "Caricamento..." } else { "Carica" }
            }
        }
    }
}
