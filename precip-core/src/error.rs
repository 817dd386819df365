//! Error types for validation and server exchanges.

use thiserror::Error;

/// A submission refused before any network call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please select a file from the database.")]
    NoDatasetSelected,
    /// The selected id is no longer offered; the dataset list must be reloaded.
    #[error("The selected file is no longer available. Please select a file again.")]
    StaleSelection,
    #[error("Please select at least one plot type or check 'Generate All Plots'.")]
    NoPlotTypes,
    #[error("Month {0} is out of range (expected 1-12).")]
    InvalidMonth(u32),
    #[error("Please select a file")]
    NoUploadFile,
}

impl ValidationError {
    /// True when the caller must reload the dataset list before retrying.
    pub fn requires_reload(&self) -> bool {
        matches!(self, ValidationError::StaleSelection)
    }
}

/// Refusal to start a submission, either invalid input or a call already in flight.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("Plots are already being generated, please wait.")]
    Busy,
    #[error("An upload is already in progress, please wait.")]
    UploadBusy,
}

/// Message carried by a non-2xx response.
///
/// Variants are tried in order: a JSON body with an `error` field, then the raw
/// body text, then a generic status line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServerError {
    #[error("{0}")]
    Json(String),
    #[error("{0}")]
    Text(String),
    #[error("Server error: {status} {status_text}")]
    Generic { status: u16, status_text: String },
}

/// Failure outcome of a round trip to the server.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExchangeError {
    /// Non-2xx status.
    #[error(transparent)]
    Server(#[from] ServerError),
    /// 2xx status with an empty or whitespace-only body.
    #[error("Empty response from server")]
    EmptyBody,
    /// 2xx status with a body that is not JSON (or not the expected shape).
    #[error("Invalid JSON response: {0}")]
    InvalidJson(String),
    /// 2xx status, valid JSON, and the payload reports an `error`.
    #[error("{0}")]
    Application(String),
    /// The request never produced a response.
    #[error("Request failed: {0}")]
    Transport(String),
}

#[cfg(feature = "api")]
impl From<reqwest::Error> for ExchangeError {
    fn from(err: reqwest::Error) -> Self {
        ExchangeError::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_stale_selection_requires_reload() {
        assert!(ValidationError::StaleSelection.requires_reload());
        assert!(!ValidationError::NoDatasetSelected.requires_reload());
        assert!(!ValidationError::NoPlotTypes.requires_reload());
    }

    #[test]
    fn generic_server_error_names_status() {
        let err = ServerError::Generic {
            status: 502,
            status_text: "Bad Gateway".to_string(),
        };
        assert_eq!(err.to_string(), "Server error: 502 Bad Gateway");
    }

    #[test]
    fn server_error_message_passes_through_exchange_error() {
        let err: ExchangeError = ServerError::Json("No file selected".to_string()).into();
        assert_eq!(err.to_string(), "No file selected");
    }
}
