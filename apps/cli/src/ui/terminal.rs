//! Plain-text rendering of a `UiState` for the terminal.

use crate::ui::state::{DetectionRow, UiState};

const NO_DETECTIONS_TEXT: &str = "No defects detected";
const TABLE_HEADERS: [&str; 4] = ["#", "Class", "Confidence", "Location"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    pub ansi: bool,
}

impl Style {
    pub fn plain() -> Self {
        Self { ansi: false }
    }

    fn emphasize(&self, text: &str) -> String {
        if self.ansi {
            format!("\x1b[1m{text}\x1b[0m")
        } else {
            text.to_string()
        }
    }
}

pub fn render(view: &UiState, style: Style) -> String {
    let mut lines = vec![format!("File: {}", view.file_name)];

    if view.loading_visible {
        lines.push("Running detection...".to_string());
    }

    if view.error.visible {
        lines.push(view.error.message.clone());
    }

    let results = &view.results;
    if results.visible {
        lines.push(format!("Total detections: {}", results.total_detections));
        lines.push(format!("Inference time: {}", results.inference_time));
        if !results.image.src.is_empty() {
            lines.push(format!(
                "Annotated image: {} ({})",
                results.image.src, results.image.alt
            ));
        }
        if results.no_detections_visible {
            lines.push(NO_DETECTIONS_TEXT.to_string());
        }
        if results.table_visible {
            lines.extend(table_lines(&results.rows, style));
        }
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn table_lines(rows: &[DetectionRow], style: Style) -> Vec<String> {
    let cells: Vec<[String; 4]> = rows
        .iter()
        .map(|row| {
            [
                row.index.to_string(),
                row.class_name.clone(),
                row.confidence.clone(),
                row.location.clone(),
            ]
        })
        .collect();

    let mut widths = TABLE_HEADERS.map(str::len);
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let header: Vec<String> = TABLE_HEADERS
        .iter()
        .zip(widths.iter())
        .map(|(title, width)| format!("{title:<width$}", width = *width))
        .collect();

    let mut lines = Vec::with_capacity(cells.len() + 1);
    lines.push(header.join("  ").trim_end().to_string());
    for row in &cells {
        let line: Vec<String> = row
            .iter()
            .zip(widths.iter())
            .enumerate()
            .map(|(column, (cell, width))| {
                let padding = " ".repeat(width - cell.chars().count());
                if column == 1 {
                    format!("{}{padding}", style.emphasize(cell))
                } else {
                    format!("{cell}{padding}")
                }
            })
            .collect();
        lines.push(line.join("  ").trim_end().to_string());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::state::ResultImage;

    fn rendered_view() -> UiState {
        let mut view = UiState::new();
        view.file_name = "sample.png".into();
        view.results.visible = true;
        view.results.total_detections = "2".into();
        view.results.inference_time = "0.123s".into();
        view.results.image = ResultImage {
            src: "/static/uploads/annotated_sample.png".into(),
            alt: "Annotated: sample.png".into(),
        };
        view.results.table_visible = true;
        view.results.rows = vec![
            DetectionRow {
                index: 1,
                class_name: "crack".into(),
                confidence: "91.23%".into(),
                location: "(10.0, 20.0, 110.5, 220.2)".into(),
            },
            DetectionRow {
                index: 2,
                class_name: "dent".into(),
                confidence: "50.00%".into(),
                location: "(1.0, 2.0, 3.0, 4.0)".into(),
            },
        ];
        view
    }

    #[test]
    fn renders_summary_and_aligned_rows() {
        let text = render(&rendered_view(), Style::plain());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "File: sample.png");
        assert!(text.contains("Total detections: 2"));
        assert!(text.contains("Inference time: 0.123s"));
        assert!(text.contains(
            "Annotated image: /static/uploads/annotated_sample.png (Annotated: sample.png)"
        ));
        assert!(lines.contains(&"#  Class  Confidence  Location"));
        assert!(lines.contains(&"1  crack  91.23%      (10.0, 20.0, 110.5, 220.2)"));
        assert!(lines.contains(&"2  dent   50.00%      (1.0, 2.0, 3.0, 4.0)"));
    }

    #[test]
    fn emphasizes_class_column_with_ansi() {
        let text = render(&rendered_view(), Style { ansi: true });
        assert!(text.contains("\x1b[1mcrack\x1b[0m"));
    }

    #[test]
    fn hidden_table_shows_placeholder_only() {
        let mut view = rendered_view();
        view.results.table_visible = false;
        view.results.no_detections_visible = true;
        let text = render(&view, Style::plain());
        assert!(text.contains("No defects detected"));
        assert!(!text.contains("crack"));
    }

    #[test]
    fn table_lines_start_with_header() {
        let lines = table_lines(&rendered_view().results.rows, Style::plain());
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "#  Class  Confidence  Location");
        assert!(lines.iter().all(|line| !line.ends_with(' ')));
    }

    #[test]
    fn error_panel_is_printed_verbatim() {
        let mut view = UiState::new();
        view.error.visible = true;
        view.error.message = "Error: Please select an image file".into();
        let text = render(&view, Style::plain());
        assert_eq!(
            text,
            "File: No file selected\nError: Please select an image file\n"
        );
    }
}
