use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const NO_FILE_SELECTED_MESSAGE: &str = "Please select an image file";
pub const INVALID_FILE_TYPE_MESSAGE: &str = "Invalid file type. Please upload JPG, PNG, or BMP image";
pub const PREDICTION_FAILED_MESSAGE: &str = "Prediction failed";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NoFileSelected,
    InvalidFileType,
    RequestFailed,
    TransportFailure,
}

/// Terminal failure of one submission attempt, carrying the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct SubmitError {
    pub kind: ErrorKind,
    pub message: String,
    pub status: Option<u16>,
}

impl SubmitError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
        }
    }

    pub fn no_file_selected() -> Self {
        Self::new(ErrorKind::NoFileSelected, NO_FILE_SELECTED_MESSAGE)
    }

    pub fn invalid_file_type() -> Self {
        Self::new(ErrorKind::InvalidFileType, INVALID_FILE_TYPE_MESSAGE)
    }

    /// Non-2xx reply. Falls back to the generic message when the server gave no detail.
    pub fn request_failed(status: u16, detail: Option<String>) -> Self {
        Self {
            kind: ErrorKind::RequestFailed,
            message: detail.unwrap_or_else(|| PREDICTION_FAILED_MESSAGE.to_string()),
            status: Some(status),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::TransportFailure, message)
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Local precondition failures never reach the network.
    pub fn is_local(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::NoFileSelected | ErrorKind::InvalidFileType
        )
    }
}
