//! Single-shot upload-and-render flow over an attached `UiState`.

use client_core::{PredictionBackend, SelectedFile};
use shared::{error::SubmitError, protocol::PredictionResponse};
use tracing::{debug, info};

use crate::controller::events::{SubmitOutcome, UiEvent};
use crate::ui::state::{
    format_inference_time, DetectionRow, ResultImage, UiState, NO_FILE_SELECTED_LABEL,
};

pub struct UploadController<B: PredictionBackend> {
    backend: B,
    view: Option<UiState>,
    selected: Option<SelectedFile>,
}

impl<B: PredictionBackend> UploadController<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            view: None,
            selected: None,
        }
    }

    pub fn attach(&mut self, view: UiState) {
        if self.view.is_some() {
            debug!("replacing previously attached view");
        }
        self.view = Some(view);
    }

    /// Tears down the view and forgets the selection.
    pub fn detach(&mut self) -> Option<UiState> {
        self.selected = None;
        self.view.take()
    }

    pub fn view(&self) -> Option<&UiState> {
        self.view.as_ref()
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    pub async fn handle(&mut self, event: UiEvent) -> Option<SubmitOutcome> {
        match event {
            UiEvent::FileSelected(file) => {
                self.on_file_selected(file);
                None
            }
            UiEvent::Submit => Some(self.on_submit().await),
        }
    }

    pub fn on_file_selected(&mut self, file: Option<SelectedFile>) {
        let Some(view) = self.view.as_mut() else {
            debug!("file selection ignored; no view attached");
            return;
        };
        view.file_name = match &file {
            Some(file) => file.name().to_string(),
            None => NO_FILE_SELECTED_LABEL.to_string(),
        };
        self.selected = file;
    }

    pub async fn on_submit(&mut self) -> SubmitOutcome {
        let Some(view) = self.view.as_mut() else {
            debug!("submit ignored; no view attached");
            return SubmitOutcome::Ignored;
        };
        if view.is_busy() {
            debug!("submit ignored; submit control disabled");
            return SubmitOutcome::Ignored;
        }

        view.results.visible = false;
        view.error.visible = false;

        let Some(file) = self.selected.clone() else {
            return self.fail(SubmitError::no_file_selected());
        };
        if !file.has_accepted_type() {
            debug!(mime_type = file.mime_type(), "rejected upload type");
            return self.fail(SubmitError::invalid_file_type());
        }

        self.set_busy(true);
        let result = self.request_prediction(&file).await;
        self.set_busy(false);

        match result {
            Ok(response) => {
                info!(
                    file = file.name(),
                    total_detections = response.total_detections,
                    "rendering prediction"
                );
                self.render(&response);
                SubmitOutcome::Rendered(response)
            }
            Err(err) => self.fail(err),
        }
    }

    async fn request_prediction(
        &self,
        file: &SelectedFile,
    ) -> Result<PredictionResponse, SubmitError> {
        let upload = file.read_upload().await?;
        self.backend.predict(upload).await
    }

    fn set_busy(&mut self, busy: bool) {
        if let Some(view) = self.view.as_mut() {
            view.loading_visible = busy;
            view.submit_enabled = !busy;
        }
    }

    fn fail(&mut self, err: SubmitError) -> SubmitOutcome {
        self.show_error(err.message());
        SubmitOutcome::Failed(err)
    }

    pub fn render(&mut self, response: &PredictionResponse) {
        let Some(view) = self.view.as_mut() else {
            return;
        };
        let results = &mut view.results;
        results.visible = true;
        results.total_detections = response.total_detections.to_string();
        results.inference_time = format_inference_time(response.inference_time);
        results.image = ResultImage {
            src: response.image_url.clone(),
            alt: format!("Annotated: {}", response.image_name),
        };

        if response.detections.is_empty() {
            results.table_visible = false;
            results.no_detections_visible = true;
        } else {
            results.table_visible = true;
            results.no_detections_visible = false;
            results.rows = response
                .detections
                .iter()
                .enumerate()
                .map(|(index, detection)| DetectionRow::from_detection(index + 1, detection))
                .collect();
        }
    }

    pub fn show_error(&mut self, message: &str) {
        let Some(view) = self.view.as_mut() else {
            return;
        };
        view.error.visible = true;
        view.error.message = format!("Error: {message}");
    }
}

#[cfg(test)]
#[path = "../tests/controller_tests.rs"]
mod tests;
