//! Raw resource listing with a type selector.

use crate::state::AppState;
use cdb_api::models::ResourceKind;
use dioxus::prelude::*;
use std::str::FromStr;

const LISTED: [ResourceKind; 3] = [
    ResourceKind::Patient,
    ResourceKind::Encounter,
    ResourceKind::Observation,
];

/// Table bound to `resourceTable`, fed from `AppState::table`.
#[component]
pub fn ResourceTableView() -> Element {
    let mut state = use_context::<AppState>();
    let current = (state.table_kind)();
    let listing = state.table.read().clone();

    let on_change = move |evt: Event<FormData>| {
        if let Ok(kind) = ResourceKind::from_str(&evt.value()) {
            state.table_kind.set(kind);
        }
    };

    rsx! {
        div {
            style: "margin: 8px 0;",
            select {
                onchange: on_change,
                for kind in LISTED.iter() {
                    option {
                        value: "{kind.as_str()}",
                        selected: *kind == current,
                        "{kind.as_str()}"
                    }
                }
            }
        }
        div {
            style: "max-height: 420px; overflow: auto;",
            table {
                id: "resourceTable",
                style: "width: 100%; border-collapse: collapse; font-size: 13px;",
                if let Some(listing) = listing {
                    thead {
                        tr {
                            for header in listing.headers.iter() {
                                th {
                                    style: "text-align: left; border-bottom: 1px solid #ccc; padding: 4px;",
                                    "{header}"
                                }
                            }
                        }
                    }
                    tbody {
                        for row in listing.rows.iter() {
                            tr {
                                for cell in row.iter() {
                                    td {
                                        style: "border-bottom: 1px solid #eee; padding: 4px;",
                                        "{cell}"
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
