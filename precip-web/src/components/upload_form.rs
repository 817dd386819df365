//! CSV upload form.

use crate::actions::{self, UPLOAD_INPUT_ID};
use crate::components::{Alert, LoadingSpinner, Tone};
use crate::state::{AppState, UploadStatus};
use dioxus::prelude::*;

/// File input, upload button, busy indicator and inline status.
#[component]
pub fn UploadForm() -> Element {
    let state = use_context::<AppState>();
    let uploading = state.session.read().is_uploading();
    let status = match (state.upload_status)() {
        Some(UploadStatus::Warning(message)) => rsx! { Alert { tone: Tone::Warning, message } },
        Some(UploadStatus::Success(message)) => rsx! {
            Alert { tone: Tone::Success, message: format!("Success! {}", message) }
        },
        Some(UploadStatus::Failed(message)) => rsx! { Alert { tone: Tone::Danger, message } },
        None => rsx! {},
    };

    rsx! {
        div {
            style: "margin: 8px 0 16px 0;",
            h3 { style: "margin: 0 0 8px 0; font-size: 16px;", "Upload Data" }
            input {
                r#type: "file",
                id: UPLOAD_INPUT_ID,
                accept: ".csv",
            }
            button {
                style: "margin-left: 8px;",
                disabled: uploading,
                onclick: move |_| actions::upload(state),
                "Upload"
            }
            if uploading {
                LoadingSpinner { label: "Uploading...".to_string() }
            }
            {status}
        }
    }
}
