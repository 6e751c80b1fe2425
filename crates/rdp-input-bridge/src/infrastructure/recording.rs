//! Recorded browser events: one JSON [`BrowserEvent`] per line.
//!
//! Blank lines and lines starting with `#` are skipped.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::BrowserEvent;

#[derive(Debug, Error)]
pub enum RecordingError {
    #[error("I/O error reading recording at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: invalid browser event: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Parses a JSON-lines recording.
///
/// # Errors
///
/// Returns [`RecordingError::Parse`] with the 1-based line number of the
/// first line that is not a valid event.
pub fn parse_recording(text: &str) -> Result<Vec<BrowserEvent>, RecordingError> {
    text.lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(line, content)| {
            serde_json::from_str(content).map_err(|source| RecordingError::Parse { line, source })
        })
        .collect()
}

/// Reads and parses the recording at `path`.
pub fn load_recording(path: &Path) -> Result<Vec<BrowserEvent>, RecordingError> {
    let text = std::fs::read_to_string(path).map_err(|source| RecordingError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_recording(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MouseEventData, WheelEventData};

    #[test]
    fn test_parse_skips_blank_and_comment_lines() {
        // Arrange
        let text = r#"
# pointer enters, then scrolls
{"type":"mouseenter","clientX":0,"clientY":0}

{"type":"wheel","deltaY":120}
"#;

        // Act
        let events = parse_recording(text).unwrap();

        // Assert
        assert_eq!(
            events,
            vec![
                BrowserEvent::MouseEnter(MouseEventData::at(0.0, 0.0)),
                BrowserEvent::Wheel(WheelEventData {
                    delta_x: 0.0,
                    delta_y: 120.0,
                    delta_mode: 0
                }),
            ]
        );
    }

    #[test]
    fn test_parse_error_reports_line_number() {
        let text = "{\"type\":\"focus\"}\n{\"type\":\"teleport\"}\n";

        let err = parse_recording(text).unwrap_err();

        assert!(matches!(err, RecordingError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = load_recording(Path::new("/nonexistent/recording.jsonl")).unwrap_err();
        assert!(matches!(err, RecordingError::Io { .. }));
    }
}
