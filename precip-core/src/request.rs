//! Request building and pre-submission validation for `/process`.

use crate::dataset::DatasetCatalog;
use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The four date boundaries of a period comparison.
///
/// Values are passed through verbatim; the server validates them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonRanges {
    pub op_start: String,
    pub op_end: String,
    pub clim_start: String,
    pub clim_end: String,
}

/// Current state of the plot option controls.
///
/// The selected dataset is not part of this; it is owned by [`crate::Session`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlotControls {
    /// Checked months (1 = January).
    pub months: BTreeSet<u32>,
    /// Checked season codes, e.g. `DJF`.
    pub seasons: Vec<String>,
    /// Checked plot type identifiers, e.g. `annual_totals`.
    pub plot_types: Vec<String>,
    pub generate_all: bool,
    pub enable_comparison: bool,
    pub comparison: ComparisonRanges,
}

impl PlotControls {
    pub fn set_month(&mut self, month: u32, checked: bool) {
        if checked {
            self.months.insert(month);
        } else {
            self.months.remove(&month);
        }
    }

    pub fn set_season(&mut self, season: &str, checked: bool) {
        toggle(&mut self.seasons, season, checked);
    }

    pub fn set_plot_type(&mut self, plot_type: &str, checked: bool) {
        toggle(&mut self.plot_types, plot_type, checked);
    }
}

fn toggle(values: &mut Vec<String>, value: &str, checked: bool) {
    let present = values.iter().any(|v| v == value);
    if checked && !present {
        values.push(value.to_string());
    } else if !checked {
        values.retain(|v| v != value);
    }
}

/// Job description posted to `/process`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlotRequest {
    pub file_id: i64,
    pub months: Vec<u32>,
    pub seasons: Vec<String>,
    /// Empty when `generate_all` is set; the server reads that as "all".
    pub plot_types: Vec<String>,
    pub generate_all: bool,
    pub enable_comparison: bool,
    /// Present only when comparison is enabled.
    #[serde(flatten)]
    pub comparison: Option<ComparisonRanges>,
}

/// Validate the controls and build a job request.
///
/// Checks run in order: a dataset is selected, the selection is still in the
/// catalog, months are in range, and at least one plot type is checked unless
/// "generate all" is on.
pub fn build_request(
    selected: Option<&str>,
    controls: &PlotControls,
    catalog: &DatasetCatalog,
) -> Result<PlotRequest, ValidationError> {
    let selected = selected
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or(ValidationError::NoDatasetSelected)?;

    let dataset = catalog
        .find(selected)
        .ok_or(ValidationError::StaleSelection)?;

    if let Some(&month) = controls.months.iter().find(|m| !(1..=12).contains(*m)) {
        return Err(ValidationError::InvalidMonth(month));
    }

    let plot_types = if controls.generate_all {
        Vec::new()
    } else if controls.plot_types.is_empty() {
        return Err(ValidationError::NoPlotTypes);
    } else {
        controls.plot_types.clone()
    };

    Ok(PlotRequest {
        file_id: dataset.id,
        months: controls.months.iter().copied().collect(),
        seasons: controls.seasons.clone(),
        plot_types,
        generate_all: controls.generate_all,
        enable_comparison: controls.enable_comparison,
        comparison: controls
            .enable_comparison
            .then(|| controls.comparison.clone()),
    })
}

/// Require a file for upload, yielding it back on success.
pub fn require_upload<T>(selection: Option<T>) -> Result<T, ValidationError> {
    selection.ok_or(ValidationError::NoUploadFile)
}
