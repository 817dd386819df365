//! Period comparison toggle with operating and climatology date ranges.

use crate::state::AppState;
use dioxus::prelude::*;

/// Comparison settings. The date inputs are only shown while comparison is enabled
/// and are sent as typed; the server validates them.
#[component]
pub fn ComparisonOptions() -> Element {
    let mut state = use_context::<AppState>();
    let controls = state.controls.read().clone();
    let ranges = controls.comparison.clone();

    let on_toggle = move |evt: Event<FormData>| {
        state.controls.write().enable_comparison = evt.checked();
    };
    let on_op_start = move |evt: Event<FormData>| {
        state.controls.write().comparison.op_start = evt.value();
    };
    let on_op_end = move |evt: Event<FormData>| {
        state.controls.write().comparison.op_end = evt.value();
    };
    let on_clim_start = move |evt: Event<FormData>| {
        state.controls.write().comparison.clim_start = evt.value();
    };
    let on_clim_end = move |evt: Event<FormData>| {
        state.controls.write().comparison.clim_end = evt.value();
    };

    rsx! {
        div {
            style: "margin: 8px 0;",
            label {
                style: "font-weight: bold;",
                input {
                    r#type: "checkbox",
                    id: "enableComparison",
                    checked: controls.enable_comparison,
                    onchange: on_toggle,
                }
                " Compare operating period against climatology"
            }
            if controls.enable_comparison {
                div {
                    id: "comparisonOptions",
                    style: "margin: 8px 0; display: grid; grid-template-columns: auto auto auto; gap: 8px 12px; align-items: center;",
                    span { style: "font-weight: bold;", "Operating period:" }
                    input { r#type: "date", id: "opStart", value: "{ranges.op_start}", onchange: on_op_start }
                    input { r#type: "date", id: "opEnd", value: "{ranges.op_end}", onchange: on_op_end }
                    span { style: "font-weight: bold;", "Climatology period:" }
                    input { r#type: "date", id: "climStart", value: "{ranges.clim_start}", onchange: on_clim_start }
                    input { r#type: "date", id: "climEnd", value: "{ranges.clim_end}", onchange: on_clim_end }
                }
            }
        }
    }
}
