//! Locally selected image files and the upload payload built from them.

use std::path::{Path, PathBuf};

use shared::{domain::is_accepted_mime_type, error::SubmitError};

/// A file picked by the user. Bytes are not read until submit time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    path: PathBuf,
    name: String,
    mime_type: String,
}

impl SelectedFile {
    /// Derives the MIME type from the file extension.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mime_type = mime_guess::from_path(&path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        Self::with_mime_type(path, mime_type)
    }

    pub fn with_mime_type(path: impl Into<PathBuf>, mime_type: impl Into<String>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Self {
            path,
            name,
            mime_type: mime_type.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn has_accepted_type(&self) -> bool {
        is_accepted_mime_type(&self.mime_type)
    }

    /// Reads the file for upload. I/O failures are reported as transport failures.
    pub async fn read_upload(&self) -> Result<ImageUpload, SubmitError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|err| SubmitError::transport(err.to_string()))?;
        Ok(ImageUpload {
            filename: self.name.clone(),
            mime_type: self.mime_type.clone(),
            bytes,
        })
    }
}

#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub filename: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}
