//! Results region: plot cards grouped by precipitation type plus the period
//! comparison section.

use crate::components::{Alert, StatsTable, Tone};
use crate::state::{AppState, ResultsState};
use dioxus::prelude::*;
use precip_core::plot::PrecipType;
use precip_core::view::{PlotCard, ResultsView};

#[component]
pub fn ResultsPanel() -> Element {
    let state = use_context::<AppState>();
    let body = match (state.results)() {
        ResultsState::Idle => rsx! {},
        ResultsState::Pending => rsx! {
            Alert { tone: Tone::Info, message: "Generating plots, please wait...".to_string() }
        },
        ResultsState::Notice(message) => rsx! {
            Alert { tone: Tone::Warning, message }
        },
        ResultsState::Failed(message) => rsx! {
            Alert { tone: Tone::Danger, message }
        },
        ResultsState::Ready(view) => rsx! {
            ResultsSections { view }
        },
    };

    rsx! {
        div {
            id: "results",
            style: "margin-top: 16px;",
            {body}
        }
    }
}

#[component]
fn ResultsSections(view: ResultsView) -> Element {
    rsx! {
        if !view.rain.is_empty() {
            PlotSection { title: PrecipType::Rain.section_title().to_string(), cards: view.rain.clone() }
        }
        if !view.snow.is_empty() {
            PlotSection { title: PrecipType::Snow.section_title().to_string(), cards: view.snow.clone() }
        }
        if let Some(section) = view.comparison.clone() {
            div {
                h3 { style: "margin: 16px 0 8px 0;", "Period Comparison Analysis" }
                if section.has_stats() {
                    StatsTable { rows: section.stats.clone() }
                }
                PlotGrid { cards: section.plots.clone() }
            }
        }
    }
}

#[component]
fn PlotSection(title: String, cards: Vec<PlotCard>) -> Element {
    rsx! {
        div {
            h3 { style: "margin: 16px 0 8px 0;", "{title}" }
            PlotGrid { cards }
        }
    }
}

#[component]
fn PlotGrid(cards: Vec<PlotCard>) -> Element {
    rsx! {
        div {
            style: "display: grid; grid-template-columns: repeat(auto-fill, minmax(480px, 1fr)); gap: 16px;",
            for card in cards {
                PlotCardView { key: "{card.precip}_{card.key}", card: card.clone() }
            }
        }
    }
}

#[component]
fn PlotCardView(card: PlotCard) -> Element {
    let heading = card.heading();
    let src = card.data_uri();

    rsx! {
        div {
            style: "border: 1px solid #DDD; border-radius: 4px; padding: 8px; background: white;",
            h4 { style: "margin: 0 0 8px 0; font-size: 14px;", "{heading}" }
            img {
                src: "{src}",
                alt: "{heading}",
                style: "width: 100%; height: auto;",
            }
        }
    }
}
