//! Precipitation Analysis
//!
//! Single page front end for the precipitation analysis server. The user
//! uploads a CSV of daily observations or picks a stored dataset, chooses
//! filters and plot types, and the server renders the charts.
//!
//! Data flow:
//! 1. On mount, the dataset list is read from the server's index page.
//! 2. Uploads go to `/upload`; on success the page reloads after a short delay.
//! 3. "Generate Plots" validates the controls through the `Session` and posts
//!    the request to `/process`.
//! 4. The response is turned into a `ResultsView` and rendered as plot cards
//!    and, when requested, the period comparison statistics.

mod actions;
mod components;
mod js_bridge;
mod state;

use components::{
    ComparisonOptions, DatasetSelector, LoadingSpinner, PlotOptions, ResultsPanel, UploadForm,
};
use dioxus::prelude::*;
use precip_core::client::PrecipClient;
use state::AppState;

const SECTION_STYLE: &str =
    "background: #FAFAFA; border: 1px solid #E0E0E0; border-radius: 4px; padding: 12px 16px; margin-bottom: 12px;";

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("precip-root"))
        .launch(App);
}

#[component]
fn App() -> Element {
    let state = use_context_provider(|| AppState::new(PrecipClient::new(js_bridge::page_origin())));

    // Load the dataset list on mount
    use_effect(move || {
        spawn(actions::reload_catalog(state));
    });

    let generating = state.session.read().is_generating();

    rsx! {
        div {
            style: "padding: 16px; max-width: 1200px; margin: 0 auto; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;",

            h1 { style: "margin: 0 0 4px 0; font-size: 22px;", "Precipitation Analysis" }
            p {
                style: "margin: 0 0 16px 0; color: #666; font-size: 13px;",
                "Upload daily rain and snow observations and explore them as monthly, seasonal and annual plots."
            }

            div {
                style: SECTION_STYLE,
                UploadForm {}
            }

            div {
                style: SECTION_STYLE,
                h3 { style: "margin: 0 0 8px 0; font-size: 16px;", "Analysis Options" }
                DatasetSelector {}
                PlotOptions {}
                ComparisonOptions {}
                button {
                    id: "generateBtn",
                    disabled: generating,
                    onclick: move |_| actions::generate(state),
                    "Generate Plots"
                }
                if generating {
                    LoadingSpinner { label: "Generating...".to_string() }
                }
            }

            ResultsPanel {}
        }
    }
}
