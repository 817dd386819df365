//! Event handlers that talk to the server.
//!
//! Each action reads what it needs from `AppState`, consults the `Session`
//! before any network call, and writes the outcome back into signals.

use crate::js_bridge;
use crate::state::{AppState, ResultsState, UploadStatus};
use dioxus::prelude::*;
use precip_core::{ExchangeError, SubmitError, UPLOAD_RELOAD_DELAY_MS};

/// DOM id of the upload file input.
pub const UPLOAD_INPUT_ID: &str = "fileInput";

/// Reload the dataset list from the server.
pub async fn reload_catalog(mut state: AppState) {
    state.catalog_loading.set(true);
    let client = state.client.read().clone();
    match client.datasets().await {
        Ok(catalog) => {
            log::info!("Loaded {} datasets", catalog.len());
            state.catalog.set(catalog);
            state.catalog_error.set(None);
        }
        Err(e) => {
            log::error!("Failed to load datasets: {}", e);
            state
                .catalog_error
                .set(Some(format!("Failed to load the dataset list: {}", e)));
        }
    }
    state.catalog_loading.set(false);
}

/// Validate the controls and submit a plot job.
pub fn generate(mut state: AppState) {
    let controls = state.controls.read().clone();
    let catalog = state.catalog.read().clone();
    let submitted = state.session.write().begin_generate(&controls, &catalog);

    let request = match submitted {
        Ok(request) => request,
        Err(SubmitError::Invalid(err)) => {
            js_bridge::alert(&err.to_string());
            if err.requires_reload() {
                spawn(reload_catalog(state));
            }
            return;
        }
        Err(err) => {
            log::warn!("Generate ignored: {}", err);
            return;
        }
    };

    // The results region is cleared before every submission.
    state.results.set(ResultsState::Pending);
    let client = state.client.read().clone();
    spawn(async move {
        let outcome = client.process(&request).await;
        state.session.write().finish_generate();
        state.results.set(ResultsState::from_outcome(outcome));
    });
}

/// Upload the file chosen in the upload form.
pub fn upload(mut state: AppState) {
    let selection = js_bridge::selected_file(UPLOAD_INPUT_ID);
    let file = match state.session.write().begin_upload(selection) {
        Ok(file) => file,
        Err(SubmitError::Invalid(e)) => {
            state.upload_status.set(Some(UploadStatus::Warning(e.to_string())));
            return;
        }
        Err(err) => {
            log::warn!("Upload ignored: {}", err);
            return;
        }
    };

    state.upload_status.set(None);
    let client = state.client.read().clone();
    spawn(async move {
        let result = match js_bridge::read_file(&file).await {
            Ok(bytes) => client.upload(&file.name(), bytes).await,
            Err(e) => Err(ExchangeError::Transport(e)),
        };
        state.session.write().finish_upload();

        match result {
            Ok(receipt) => {
                state
                    .upload_status
                    .set(Some(UploadStatus::Success(receipt.summary())));
                js_bridge::clear_file_input(UPLOAD_INPUT_ID);
                js_bridge::schedule_reload(UPLOAD_RELOAD_DELAY_MS);
            }
            Err(e) => {
                log::error!("Upload failed: {}", e);
                state
                    .upload_status
                    .set(Some(UploadStatus::Failed(format!("Error: {}", e))));
            }
        }
    });
}
