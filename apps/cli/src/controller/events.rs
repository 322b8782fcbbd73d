//! View events delivered to the controller and submission outcomes.

use client_core::SelectedFile;
use shared::{error::SubmitError, protocol::PredictionResponse};

#[derive(Debug, Clone)]
pub enum UiEvent {
    FileSelected(Option<SelectedFile>),
    Submit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Rendered(PredictionResponse),
    Failed(SubmitError),
    /// The view was detached or its submit control was disabled.
    Ignored,
}

impl SubmitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmitOutcome::Rendered(_))
    }

    pub fn error(&self) -> Option<&SubmitError> {
        match self {
            SubmitOutcome::Failed(err) => Some(err),
            _ => None,
        }
    }
}
