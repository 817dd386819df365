//! Reusable Dioxus RSX components for the precipitation analysis page.

mod alert;
mod comparison_options;
mod dataset_selector;
mod loading_spinner;
mod plot_options;
mod results_panel;
mod stats_table;
mod upload_form;

pub use alert::{Alert, Tone};
pub use comparison_options::ComparisonOptions;
pub use dataset_selector::DatasetSelector;
pub use loading_spinner::LoadingSpinner;
pub use plot_options::PlotOptions;
pub use results_panel::ResultsPanel;
pub use stats_table::StatsTable;
pub use upload_form::UploadForm;
