//! Client-side core of the precipitation analysis service.
//!
//! This crate provides:
//! - `dataset`: the catalog of uploaded datasets offered for selection
//! - `plot`: plot type, precipitation type, season and month catalogs
//! - `request`: control state and validation into a `/process` job request
//! - `exchange`: normalization of `/upload` and `/process` responses
//! - `view`: partitioning and formatting of returned plots and statistics
//! - `session`: controller state shared by the CLI and the web front end
//! - `client` (feature `api`): reqwest client for the two endpoints

pub mod dataset;
pub mod error;
pub mod exchange;
pub mod plot;
pub mod request;
pub mod session;
pub mod view;

#[cfg(feature = "api")]
pub mod client;

pub use dataset::{Dataset, DatasetCatalog};
pub use error::{ExchangeError, ServerError, SubmitError, ValidationError};
pub use exchange::{HttpReply, PlotResponse, ProcessOutcome, UploadReceipt};
pub use request::{ComparisonRanges, PlotControls, PlotRequest};
pub use session::Session;
pub use view::ResultsView;

/// Delay before the page reloads after a successful upload, in milliseconds.
pub const UPLOAD_RELOAD_DELAY_MS: u32 = 2000;
