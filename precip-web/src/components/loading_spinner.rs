//! Busy indicator.

use dioxus::prelude::*;

/// Inline busy indicator shown while a request is in flight.
#[component]
pub fn LoadingSpinner(#[props(default = "Loading...".to_string())] label: String) -> Element {
    rsx! {
        span {
            style: "display: inline-flex; align-items: center; gap: 6px; margin-left: 8px; color: #666;",
            span {
                style: "display: inline-block; width: 12px; height: 12px; border: 2px solid #BBB; border-top-color: #333; border-radius: 50%;",
            }
            "{label}"
        }
    }
}
