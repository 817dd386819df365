//! Month, season and plot type checkboxes.

use crate::state::AppState;
use dioxus::prelude::*;
use precip_core::plot::{month_name, PlotType, SEASONS};

const GROUP_STYLE: &str = "display: flex; flex-wrap: wrap; gap: 8px 16px; margin: 4px 0 12px 0;";

/// Filters and plot selection.
///
/// Checking "Generate All Plots" hides the individual plot types; they are
/// ignored while it is on.
#[component]
pub fn PlotOptions() -> Element {
    let mut state = use_context::<AppState>();
    let controls = state.controls.read().clone();

    let months: Vec<(u32, &'static str, bool)> = (1..=12u32)
        .filter_map(|m| month_name(m).map(|name| (m, name, controls.months.contains(&m))))
        .collect();
    let seasons: Vec<(&'static str, &'static str, bool)> = SEASONS
        .iter()
        .map(|&(code, label)| (code, label, controls.seasons.iter().any(|s| s == code)))
        .collect();
    let plots: Vec<(&'static str, &'static str, bool)> = PlotType::ALL
        .iter()
        .map(|p| {
            let value = p.as_str();
            (value, p.label(), controls.plot_types.iter().any(|t| t == value))
        })
        .collect();

    rsx! {
        div {
            style: "margin: 8px 0;",

            h4 { style: "margin: 8px 0 4px 0;", "Months" }
            div {
                style: GROUP_STYLE,
                for (month, name, checked) in months {
                    label {
                        key: "{month}",
                        input {
                            r#type: "checkbox",
                            class: "month-check",
                            value: "{month}",
                            checked,
                            onchange: move |evt: Event<FormData>| {
                                state.controls.write().set_month(month, evt.checked());
                            },
                        }
                        " {name}"
                    }
                }
            }

            h4 { style: "margin: 8px 0 4px 0;", "Seasons" }
            div {
                style: GROUP_STYLE,
                for (code, label, checked) in seasons {
                    label {
                        key: "{code}",
                        input {
                            r#type: "checkbox",
                            class: "season-check",
                            value: code,
                            checked,
                            onchange: move |evt: Event<FormData>| {
                                state.controls.write().set_season(code, evt.checked());
                            },
                        }
                        " {label}"
                    }
                }
            }

            h4 { style: "margin: 8px 0 4px 0;", "Plots" }
            label {
                style: "font-weight: bold;",
                input {
                    r#type: "checkbox",
                    id: "generateAll",
                    checked: controls.generate_all,
                    onchange: move |evt: Event<FormData>| {
                        state.controls.write().generate_all = evt.checked();
                    },
                }
                " Generate All Plots"
            }
            if !controls.generate_all {
                div {
                    id: "plotOptions",
                    style: GROUP_STYLE,
                    for (value, label, checked) in plots {
                        label {
                            key: "{value}",
                            input {
                                r#type: "checkbox",
                                class: "plot-check",
                                value,
                                checked,
                                onchange: move |evt: Event<FormData>| {
                                    state.controls.write().set_plot_type(value, evt.checked());
                                },
                            }
                            " {label}"
                        }
                    }
                }
            }
        }
    }
}
