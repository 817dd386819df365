//! Dropdown selector for choosing an uploaded dataset.

use crate::components::Alert;
use crate::components::Tone;
use crate::state::AppState;
use dioxus::prelude::*;

/// Dataset dropdown selector.
/// Reads the catalog from AppState and records the selection in the Session.
#[component]
pub fn DatasetSelector() -> Element {
    let mut state = use_context::<AppState>();
    let catalog = state.catalog.read().clone();
    let selected = state
        .session
        .read()
        .selected_file_id()
        .unwrap_or_default()
        .to_string();
    let info = catalog.find(&selected).map(|dataset| dataset.info_line());

    let on_change = move |evt: Event<FormData>| {
        let value = evt.value();
        let catalog = state.catalog.read().clone();
        state.session.write().select(&value, &catalog);
    };

    rsx! {
        div {
            style: "margin: 8px 0;",
            label {
                r#for: "fileSelect",
                style: "font-weight: bold; margin-right: 8px;",
                "Dataset: "
            }
            if (state.catalog_loading)() {
                span { style: "color: #666;", "Loading datasets..." }
            } else {
                select {
                    id: "fileSelect",
                    onchange: on_change,
                    option {
                        value: "",
                        selected: info.is_none(),
                        "-- Select a file --"
                    }
                    for dataset in catalog.iter() {
                        option {
                            key: "{dataset.id}",
                            value: "{dataset.id}",
                            selected: dataset.id.to_string() == selected,
                            "{dataset.name}"
                        }
                    }
                }
            }
            if let Some(info) = info {
                div {
                    style: "margin-top: 4px; font-size: 12px; color: #666;",
                    "{info}"
                }
            }
            if let Some(err) = (state.catalog_error)() {
                Alert { tone: Tone::Danger, message: err }
            }
        }
    }
}
