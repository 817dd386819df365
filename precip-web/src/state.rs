//! Application state managed via Dioxus context.
//!
//! `AppState` bundles all reactive signals into a single struct provided via
//! `use_context_provider`. Child components retrieve it with `use_context::<AppState>()`.
//! The selected dataset lives in the `Session`, never in a free-standing global.

use dioxus::prelude::*;
use precip_core::client::PrecipClient;
use precip_core::view::{NOTHING_GENERATED_NOTICE, NO_PLOTS_NOTICE};
use precip_core::{
    DatasetCatalog, ExchangeError, PlotControls, ProcessOutcome, ResultsView, Session,
};

/// Inline status of the upload form.
#[derive(Debug, Clone, PartialEq)]
pub enum UploadStatus {
    Warning(String),
    Success(String),
    Failed(String),
}

/// What the results region currently shows.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ResultsState {
    #[default]
    Idle,
    Pending,
    Notice(String),
    Failed(String),
    Ready(ResultsView),
}

impl ResultsState {
    /// Replace the results region with the outcome of a `/process` call.
    pub fn from_outcome(outcome: Result<ProcessOutcome, ExchangeError>) -> Self {
        match outcome {
            Ok(ProcessOutcome::Plots(response)) => {
                let view = ResultsView::from_response(&response);
                if view.is_empty() {
                    ResultsState::Notice(NO_PLOTS_NOTICE.to_string())
                } else {
                    ResultsState::Ready(view)
                }
            }
            Ok(ProcessOutcome::NoPlots) => ResultsState::Notice(NOTHING_GENERATED_NOTICE.to_string()),
            Err(e) => {
                log::error!("Plot generation failed: {}", e);
                ResultsState::Failed(format!("Error: {}", e))
            }
        }
    }
}

/// Shared application state.
#[derive(Clone, Copy)]
pub struct AppState {
    /// Client for the server the page was loaded from
    pub client: Signal<PrecipClient>,
    /// Datasets currently offered by the server
    pub catalog: Signal<DatasetCatalog>,
    /// Whether the dataset list is being (re)loaded
    pub catalog_loading: Signal<bool>,
    /// Error message if the dataset list could not be loaded
    pub catalog_error: Signal<Option<String>>,
    /// Selected dataset and in-flight flags
    pub session: Signal<Session>,
    /// Plot option controls
    pub controls: Signal<PlotControls>,
    pub upload_status: Signal<Option<UploadStatus>>,
    pub results: Signal<ResultsState>,
}

impl AppState {
    pub fn new(client: PrecipClient) -> Self {
        Self {
            client: Signal::new(client),
            catalog: Signal::new(DatasetCatalog::default()),
            catalog_loading: Signal::new(true),
            catalog_error: Signal::new(None),
            session: Signal::new(Session::new()),
            controls: Signal::new(PlotControls::default()),
            upload_status: Signal::new(None),
            results: Signal::new(ResultsState::Idle),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use precip_core::error::ServerError;
    use precip_core::PlotResponse;
    use serde_json::json;

    fn plots(value: serde_json::Value) -> Result<ProcessOutcome, ExchangeError> {
        Ok(ProcessOutcome::Plots(
            serde_json::from_value::<PlotResponse>(value).unwrap(),
        ))
    }

    #[test]
    fn renderable_plots_are_ready() {
        let state = ResultsState::from_outcome(plots(json!({"plots": {"rain_a": "X"}})));
        match state {
            ResultsState::Ready(view) => assert_eq!(view.rain.len(), 1),
            other => panic!("unexpected state: {:?}", other),
        }
    }

    #[test]
    fn only_failed_plots_show_notice() {
        let state = ResultsState::from_outcome(plots(json!({"plots": {"rain_a": null}})));
        assert_eq!(state, ResultsState::Notice(NO_PLOTS_NOTICE.to_string()));
    }

    #[test]
    fn no_plots_payload_shows_notice() {
        let state = ResultsState::from_outcome(Ok(ProcessOutcome::NoPlots));
        assert_eq!(
            state,
            ResultsState::Notice(NOTHING_GENERATED_NOTICE.to_string())
        );
    }

    #[test]
    fn failures_are_prefixed() {
        let state = ResultsState::from_outcome(Err(ExchangeError::Server(ServerError::Json(
            "No file selected".to_string(),
        ))));
        assert_eq!(state, ResultsState::Failed("Error: No file selected".to_string()));

        let state = ResultsState::from_outcome(Err(ExchangeError::EmptyBody));
        assert_eq!(
            state,
            ResultsState::Failed("Error: Empty response from server".to_string())
        );
    }
}
