use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::Detection;

pub const PREDICT_ROUTE: &str = "/api/predict";
pub const HEALTH_ROUTE: &str = "/api/";
pub const CLASSES_ROUTE: &str = "/api/classes";
pub const UPLOAD_FIELD_NAME: &str = "file";

fn default_success() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    #[serde(default = "default_success")]
    pub success: bool,
    pub image_name: String,
    pub detections: Vec<Detection>,
    pub total_detections: i64,
    /// Seconds.
    pub inference_time: f64,
    #[serde(default)]
    pub image_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub model_loaded: bool,
    pub app_name: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassesResponse {
    pub classes: Vec<String>,
    pub total_classes: usize,
}

/// Body of a non-2xx reply. Only the `detail` field is read.
#[derive(Debug, Clone, Default)]
pub struct ErrorBody {
    pub detail: Option<Value>,
}

impl ErrorBody {
    /// Any JSON value is accepted; non-objects simply carry no detail.
    pub fn parse(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_slice(bytes)?;
        Ok(Self {
            detail: value.get("detail").cloned(),
        })
    }

    /// The detail as a non-empty plain string. Structured details are ignored.
    pub fn detail_message(&self) -> Option<String> {
        match &self.detail {
            Some(Value::String(detail)) if !detail.is_empty() => Some(detail.clone()),
            _ => None,
        }
    }
}
