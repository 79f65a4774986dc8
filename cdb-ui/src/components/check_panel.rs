//! Buttons running the backend's data-quality checks.

use crate::state::WebUploader;
use cdb_api::models::CheckKind;
use cdb_dashboard::checks::run_check;
use dioxus::prelude::*;
use std::rc::Rc;

/// One button per check; the last count of each is shown next to it.
#[component]
pub fn CheckPanel() -> Element {
    let uploader = use_context::<Rc<WebUploader>>();
    let mut counts = use_signal(Vec::<(CheckKind, u64)>::new);
    let shown = counts.read().clone();

    rsx! {
        div {
            style: "margin: 12px 0; display: flex; flex-direction: column; gap: 6px;",
            for kind in CheckKind::ALL {
                div {
                    key: "{kind.path_segment()}",
                    style: "display: flex; gap: 8px; align-items: center;",
                    button {
                        r#type: "button",
                        onclick: {
                            let uploader = uploader.clone();
                            move |_| {
                                let uploader = uploader.clone();
                                spawn(async move {
                                    if let Some(report) = run_check(uploader.client(), uploader.notifier(), kind).await {
                                        let mut counts = counts.write();
                                        counts.retain(|(k, _)| *k != kind);
                                        counts.push((kind, report.count));
                                    }
                                });
                            }
                        },
                        "{kind.description()}"
                    }
                    if let Some((_, count)) = shown.iter().find(|(k, _)| *k == kind) {
                        span {
                            style: "font-size: 12px; color: #666;",
                            "{count}"
                        }
                    }
                }
            }
        }
    }
}
