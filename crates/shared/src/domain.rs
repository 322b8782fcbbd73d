use serde::{Deserialize, Serialize};

/// Axis-aligned box in source-image pixel coordinates. Ordering of the corners is trusted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub class_name: String,
    /// 0.0 to 1.0, as reported by the server.
    pub confidence: f64,
    pub bounding_box: BoundingBox,
}

/// Upload MIME types accepted before any request is made. Matched exactly.
pub const ACCEPTED_MIME_TYPES: [&str; 4] = ["image/jpeg", "image/jpg", "image/png", "image/bmp"];

pub fn is_accepted_mime_type(mime_type: &str) -> bool {
    ACCEPTED_MIME_TYPES.contains(&mime_type)
}
