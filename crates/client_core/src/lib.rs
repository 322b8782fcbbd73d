use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::{
    multipart::{Form, Part},
    Client,
};
use shared::{
    error::SubmitError,
    protocol::{
        ClassesResponse, ErrorBody, HealthResponse, PredictionResponse, CLASSES_ROUTE,
        HEALTH_ROUTE, PREDICT_ROUTE, UPLOAD_FIELD_NAME,
    },
};
use tracing::{debug, info, warn};
use url::Url;

mod selection;

pub use selection::{ImageUpload, SelectedFile};

/// Anything that can turn an uploaded image into a prediction.
#[async_trait]
pub trait PredictionBackend: Send + Sync {
    async fn predict(&self, upload: ImageUpload) -> Result<PredictionResponse, SubmitError>;
}

#[derive(Debug, Clone)]
pub struct PredictClient {
    http: Client,
    base_url: Url,
}

impl PredictClient {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_http(Client::new(), base_url)
    }

    pub fn with_http(http: Client, base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url.trim())
            .with_context(|| format!("invalid server url '{base_url}'"))?;
        if base_url.cannot_be_a_base() {
            return Err(anyhow!("server url '{base_url}' cannot be used as a base"));
        }
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves a server path or absolute URL against the base URL.
    pub fn resolve(&self, path_or_url: &str) -> Result<Url> {
        self.base_url
            .join(path_or_url)
            .with_context(|| format!("failed to resolve '{path_or_url}' against {}", self.base_url))
    }

    pub async fn health(&self) -> Result<HealthResponse> {
        let url = self.resolve(HEALTH_ROUTE)?;
        let health = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(health)
    }

    pub async fn classes(&self) -> Result<ClassesResponse> {
        let url = self.resolve(CLASSES_ROUTE)?;
        let classes = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(classes)
    }

    /// Downloads the annotated image referenced by a prediction's `image_url`.
    pub async fn fetch_annotated_image(&self, image_url: &str) -> Result<Vec<u8>> {
        if image_url.is_empty() {
            return Err(anyhow!("prediction did not include an annotated image url"));
        }
        let url = self.resolve(image_url)?;
        let bytes = self
            .http
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("failed to request annotated image {url}"))?
            .error_for_status()?
            .bytes()
            .await?;
        Ok(bytes.to_vec())
    }

    async fn post_prediction(
        &self,
        upload: ImageUpload,
    ) -> Result<PredictionResponse, SubmitError> {
        let url = self
            .resolve(PREDICT_ROUTE)
            .map_err(|err| SubmitError::transport(err.to_string()))?;
        let filename = upload.filename;
        let size_bytes = upload.bytes.len();
        let part = Part::bytes(upload.bytes)
            .file_name(filename.clone())
            .mime_str(&upload.mime_type)
            .map_err(|err| SubmitError::transport(err.to_string()))?;
        let form = Form::new().part(UPLOAD_FIELD_NAME, part);

        debug!(%url, %filename, size_bytes, "posting image for prediction");
        let response = self
            .http
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(|err| SubmitError::transport(err.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| SubmitError::transport(err.to_string()))?;

        if !status.is_success() {
            let error_body = ErrorBody::parse(&body).map_err(|err| {
                warn!(status = status.as_u16(), %err, "unreadable prediction error body");
                SubmitError::transport(err.to_string()).with_status(status.as_u16())
            })?;
            let detail = error_body.detail_message();
            warn!(status = status.as_u16(), ?detail, "prediction request rejected");
            return Err(SubmitError::request_failed(status.as_u16(), detail));
        }

        let prediction: PredictionResponse = serde_json::from_slice(&body)
            .map_err(|err| SubmitError::transport(err.to_string()))?;
        info!(
            %filename,
            total_detections = prediction.total_detections,
            inference_time = prediction.inference_time,
            "prediction received"
        );
        Ok(prediction)
    }
}

#[async_trait]
impl PredictionBackend for PredictClient {
    async fn predict(&self, upload: ImageUpload) -> Result<PredictionResponse, SubmitError> {
        self.post_prediction(upload).await
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
