//! View model replacing the upload page's DOM nodes.

use shared::domain::{BoundingBox, Detection};

pub const NO_FILE_SELECTED_LABEL: &str = "No file selected";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultImage {
    pub src: String,
    pub alt: String,
}

/// One rendered table row. `class_name` is the emphasized column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectionRow {
    pub index: usize,
    pub class_name: String,
    pub confidence: String,
    pub location: String,
}

impl DetectionRow {
    pub fn from_detection(index: usize, detection: &Detection) -> Self {
        Self {
            index,
            class_name: detection.class_name.clone(),
            confidence: format_confidence(detection.confidence),
            location: format_location(&detection.bounding_box),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultsPanel {
    pub visible: bool,
    pub total_detections: String,
    pub inference_time: String,
    pub image: ResultImage,
    pub table_visible: bool,
    pub no_detections_visible: bool,
    pub rows: Vec<DetectionRow>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorPanel {
    pub visible: bool,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiState {
    pub file_name: String,
    pub loading_visible: bool,
    pub submit_enabled: bool,
    pub results: ResultsPanel,
    pub error: ErrorPanel,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            file_name: NO_FILE_SELECTED_LABEL.to_string(),
            loading_visible: false,
            submit_enabled: true,
            results: ResultsPanel::default(),
            error: ErrorPanel::default(),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.loading_visible || !self.submit_enabled
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}

/// Shortest numeric form followed by `s`, e.g. `0.123s` or `1s`.
pub fn format_inference_time(seconds: f64) -> String {
    format!("{seconds}s")
}

pub fn format_confidence(confidence: f64) -> String {
    format!("{}%", to_fixed(confidence * 100.0, 2))
}

pub fn format_location(bbox: &BoundingBox) -> String {
    format!(
        "({}, {}, {}, {})",
        to_fixed(bbox.x1, 1),
        to_fixed(bbox.y1, 1),
        to_fixed(bbox.x2, 1),
        to_fixed(bbox.y2, 1)
    )
}

/// Digits of every finite f64 fit in this many fractional places.
const EXACT_FRACTION_DIGITS: usize = 1100;

/// Fixed-point text where an exact tie rounds away from zero.
///
/// `{:.N}` rounds an exactly representable tie (0.25, 10.75) to even; this
/// picks the larger magnitude instead, so 0.25 becomes "0.3".
pub fn to_fixed(value: f64, digits: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    // -0.0 prints without a sign.
    let value = if value == 0.0 { 0.0 } else { value };

    let exact = format!("{:.*}", EXACT_FRACTION_DIGITS, value.abs());
    let (whole, fraction) = exact.split_once('.').unwrap_or((exact.as_str(), ""));
    let rest = fraction.get(digits..).unwrap_or("");
    let is_tie = rest.starts_with('5') && rest[1..].bytes().all(|b| b == b'0');
    if !is_tie {
        return format!("{value:.digits$}");
    }

    let mut kept: Vec<u8> = whole
        .bytes()
        .chain(fraction.bytes().take(digits))
        .collect();
    let mut carry = true;
    for digit in kept.iter_mut().rev() {
        if *digit == b'9' {
            *digit = b'0';
        } else {
            *digit += 1;
            carry = false;
            break;
        }
    }
    if carry {
        kept.insert(0, b'1');
    }

    let split = kept.len() - digits;
    let mut text = String::with_capacity(kept.len() + 2);
    if value < 0.0 {
        text.push('-');
    }
    text.extend(kept[..split].iter().map(|&b| b as char));
    if digits > 0 {
        text.push('.');
        text.extend(kept[split..].iter().map(|&b| b as char));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_view_is_idle() {
        let view = UiState::new();
        assert_eq!(view.file_name, "No file selected");
        assert!(!view.is_busy());
        assert!(!view.results.visible);
        assert!(!view.error.visible);
    }

    #[test]
    fn inference_time_uses_shortest_form() {
        assert_eq!(format_inference_time(0.123), "0.123s");
        assert_eq!(format_inference_time(1.0), "1s");
        assert_eq!(format_inference_time(2.5), "2.5s");
    }

    #[test]
    fn confidence_is_a_two_decimal_percentage() {
        assert_eq!(format_confidence(0.9123), "91.23%");
        assert_eq!(format_confidence(0.5), "50.00%");
        assert_eq!(format_confidence(1.0), "100.00%");
        assert_eq!(format_confidence(0.0), "0.00%");
    }

    #[test]
    fn exact_ties_round_away_from_zero() {
        assert_eq!(to_fixed(0.25, 1), "0.3");
        assert_eq!(to_fixed(2.25, 1), "2.3");
        assert_eq!(to_fixed(10.75, 1), "10.8");
        assert_eq!(to_fixed(12.125, 2), "12.13");
        assert_eq!(to_fixed(9.5, 0), "10");
        assert_eq!(to_fixed(99.75, 1), "99.8");
        assert_eq!(to_fixed(99.5, 0), "100");
        assert_eq!(to_fixed(-2.5, 0), "-3");
        assert_eq!(to_fixed(-0.25, 1), "-0.3");
    }

    #[test]
    fn non_ties_match_standard_rounding() {
        assert_eq!(to_fixed(0.45, 1), "0.5");
        assert_eq!(to_fixed(0.24, 1), "0.2");
        assert_eq!(to_fixed(110.52, 1), "110.5");
        assert_eq!(to_fixed(7.0, 1), "7.0");
        assert_eq!(to_fixed(-0.0, 1), "0.0");
        assert_eq!(to_fixed(f64::NAN, 2), "NaN");
    }

    #[test]
    fn location_rounds_ties_up() {
        let bbox = BoundingBox {
            x1: 0.25,
            y1: 2.25,
            x2: 10.75,
            y2: 0.45,
        };
        assert_eq!(format_location(&bbox), "(0.3, 2.3, 10.8, 0.5)");
    }

    #[test]
    fn confidence_rounds_ties_up() {
        // 0.03125 * 100 == 3.125 exactly.
        assert_eq!(format_confidence(0.03125), "3.13%");
        assert_eq!(format_confidence(0.09375), "9.38%");
        assert_eq!(to_fixed(87.125, 2), "87.13");
    }

    #[test]
    fn location_uses_one_decimal_per_coordinate() {
        let bbox = BoundingBox {
            x1: 10.0,
            y1: 20.04,
            x2: 110.52,
            y2: 7.0,
        };
        assert_eq!(format_location(&bbox), "(10.0, 20.0, 110.5, 7.0)");
    }
}
