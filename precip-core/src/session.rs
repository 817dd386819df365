//! Controller state shared by the front ends.
//!
//! `Session` owns the selected dataset and the in-flight flags of the two
//! asynchronous actions. Upload and generate are independent: one being busy
//! never blocks the other. A second call of the same kind while one is pending
//! is refused.

use crate::dataset::{Dataset, DatasetCatalog};
use crate::error::{SubmitError, ValidationError};
use crate::request::{self, PlotControls, PlotRequest};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    selected_file_id: Option<String>,
    generating: bool,
    uploading: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_file_id(&self) -> Option<&str> {
        self.selected_file_id.as_deref()
    }

    /// Record a selection from the dataset dropdown.
    ///
    /// Returns the selected dataset when it is in the catalog, for the info line.
    /// An empty value clears the selection.
    pub fn select<'a>(&mut self, value: &str, catalog: &'a DatasetCatalog) -> Option<&'a Dataset> {
        let value = value.trim();
        if value.is_empty() {
            self.selected_file_id = None;
            return None;
        }
        self.selected_file_id = Some(value.to_string());
        catalog.find(value)
    }

    pub fn clear_selection(&mut self) {
        self.selected_file_id = None;
    }

    pub fn is_generating(&self) -> bool {
        self.generating
    }

    pub fn is_uploading(&self) -> bool {
        self.uploading
    }

    /// Validate the controls and mark a generate call as in flight.
    ///
    /// On a stale selection the selection is dropped; the caller reloads the
    /// catalog and asks the user to select again.
    pub fn begin_generate(
        &mut self,
        controls: &PlotControls,
        catalog: &DatasetCatalog,
    ) -> Result<PlotRequest, SubmitError> {
        if self.generating {
            return Err(SubmitError::Busy);
        }

        match request::build_request(self.selected_file_id.as_deref(), controls, catalog) {
            Ok(request) => {
                log::info!(
                    "Submitting plot request for dataset {} ({} plot types, generate_all={})",
                    request.file_id,
                    request.plot_types.len(),
                    request.generate_all
                );
                self.generating = true;
                Ok(request)
            }
            Err(ValidationError::StaleSelection) => {
                log::warn!(
                    "Selected dataset {:?} is no longer available",
                    self.selected_file_id
                );
                self.selected_file_id = None;
                Err(ValidationError::StaleSelection.into())
            }
            Err(err) => Err(err.into()),
        }
    }

    pub fn finish_generate(&mut self) {
        self.generating = false;
    }

    /// Check an upload selection and mark the upload as in flight.
    ///
    /// A second upload is refused with `UploadBusy` until the first finishes.
    pub fn begin_upload<T>(&mut self, selection: Option<T>) -> Result<T, SubmitError> {
        if self.uploading {
            return Err(SubmitError::UploadBusy);
        }
        let file = request::require_upload(selection)?;
        self.uploading = true;
        Ok(file)
    }

    pub fn finish_upload(&mut self) {
        self.uploading = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(ids: &[i64]) -> DatasetCatalog {
        DatasetCatalog::new(
            ids.iter()
                .map(|&id| Dataset {
                    id,
                    name: format!("file{}.csv", id),
                    rows_count: 10,
                    date_range_start: "2020-01-01".to_string(),
                    date_range_end: "2020-01-10".to_string(),
                })
                .collect(),
        )
    }

    fn all_plots() -> PlotControls {
        PlotControls {
            generate_all: true,
            ..Default::default()
        }
    }

    #[test]
    fn select_returns_dataset_for_info_line() {
        let catalog = catalog(&[1, 2]);
        let mut session = Session::new();
        let dataset = session.select("2", &catalog).unwrap();
        assert_eq!(dataset.id, 2);
        assert_eq!(session.selected_file_id(), Some("2"));

        assert!(session.select("", &catalog).is_none());
        assert_eq!(session.selected_file_id(), None);
    }

    #[test]
    fn generate_without_selection_is_refused() {
        let mut session = Session::new();
        assert_eq!(
            session.begin_generate(&all_plots(), &catalog(&[1])),
            Err(SubmitError::Invalid(ValidationError::NoDatasetSelected))
        );
        assert!(!session.is_generating());
    }

    #[test]
    fn stale_selection_is_dropped_and_nothing_is_sent() {
        let mut session = Session::new();
        session.select("1", &catalog(&[1, 2]));

        // Dataset 1 was deleted server-side and the catalog reloaded.
        let reloaded = catalog(&[2]);
        let err = session.begin_generate(&all_plots(), &reloaded).unwrap_err();
        assert_eq!(err, SubmitError::Invalid(ValidationError::StaleSelection));
        assert!(!session.is_generating());
        assert_eq!(session.selected_file_id(), None);
    }

    #[test]
    fn overlapping_generate_is_refused_until_finished() {
        let catalog = catalog(&[1]);
        let mut session = Session::new();
        session.select("1", &catalog);

        let request = session.begin_generate(&all_plots(), &catalog).unwrap();
        assert_eq!(request.file_id, 1);
        assert!(session.is_generating());
        assert_eq!(
            session.begin_generate(&all_plots(), &catalog),
            Err(SubmitError::Busy)
        );

        session.finish_generate();
        assert!(session.begin_generate(&all_plots(), &catalog).is_ok());
    }

    #[test]
    fn upload_and_generate_are_independent() {
        let catalog = catalog(&[1]);
        let mut session = Session::new();
        session.select("1", &catalog);

        let file = session.begin_upload(Some("rain.csv")).unwrap();
        assert_eq!(file, "rain.csv");
        assert!(session.is_uploading());
        assert!(session.begin_generate(&all_plots(), &catalog).is_ok());

        session.finish_upload();
        assert!(!session.is_uploading());
        assert!(session.is_generating());
    }

    #[test]
    fn overlapping_upload_is_refused_until_finished() {
        let mut session = Session::new();
        session.begin_upload(Some("first.csv")).unwrap();
        assert_eq!(
            session.begin_upload(Some("second.csv")),
            Err(SubmitError::UploadBusy)
        );
        assert!(session.is_uploading());

        session.finish_upload();
        assert_eq!(session.begin_upload(Some("second.csv")), Ok("second.csv"));
    }

    #[test]
    fn upload_without_file_is_refused() {
        let mut session = Session::new();
        assert_eq!(
            session.begin_upload::<Vec<u8>>(None),
            Err(SubmitError::Invalid(ValidationError::NoUploadFile))
        );
        assert!(!session.is_uploading());
    }
}
