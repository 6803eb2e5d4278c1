//! Parsing and validation of MIDI-derived note lists.

use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::regions::Note;

/// A notes file is either a bare JSON array of notes or a document with a
/// top-level `notes` field, depending on which tool wrote it.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NotesFile {
    Document {
        notes: Vec<RawNote>,
    },
    Bare(Vec<RawNote>),
}

/// Note entry as found on disk, before range validation.
///
/// Extra fields (`name`, `port`, ...) are ignored.
#[derive(Debug, Deserialize)]
struct RawNote {
    start: f64,
    pitch: i64,
    velocity: i64,
    #[serde(default)]
    end: Option<f64>,
    #[serde(default)]
    duration: Option<f64>,
}

impl RawNote {
    /// Validate MIDI ranges and timing, producing a [`Note`].
    fn validate(&self, index: usize) -> std::result::Result<Note, String> {
        if !self.start.is_finite() || self.start < 0.0 {
            return Err(format!(
                "note {index}: start must be finite and non-negative, got {}",
                self.start
            ));
        }
        let pitch = midi_range(self.pitch, "pitch", index)?;
        let velocity = midi_range(self.velocity, "velocity", index)?;
        if let Some(end) = self.end {
            if !end.is_finite() || end < self.start {
                return Err(format!("note {index}: end must not precede start"));
            }
        }
        Ok(Note {
            start: self.start,
            pitch,
            velocity,
            end: self.end,
            duration: self.duration,
        })
    }
}

fn midi_range(value: i64, field: &str, index: usize) -> std::result::Result<u8, String> {
    u8::try_from(value)
        .ok()
        .filter(|&v| v <= 127)
        .ok_or_else(|| format!("note {index}: {field} must be 0-127, got {value}"))
}

/// Read and validate a notes JSON file, returning notes sorted by onset.
///
/// # Errors
///
/// Returns [`Error::InputRead`] if the file cannot be read,
/// [`Error::MalformedInput`] if the JSON or any note field is invalid and
/// [`Error::EmptyInput`] if the file contains no notes.
pub fn read_notes_file(path: &Path) -> Result<Vec<Note>> {
    let contents = std::fs::read_to_string(path).map_err(|e| Error::InputRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let raw: NotesFile = serde_json::from_str(&contents).map_err(|e| Error::MalformedInput {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let raw = match raw {
        NotesFile::Document { notes } | NotesFile::Bare(notes) => notes,
    };

    if raw.is_empty() {
        return Err(Error::empty_input(format!(
            "no notes in '{}'",
            path.display()
        )));
    }

    let mut notes = Vec::with_capacity(raw.len());
    for (index, raw_note) in raw.iter().enumerate() {
        let note = raw_note
            .validate(index)
            .map_err(|message| Error::MalformedInput {
                path: path.to_path_buf(),
                message,
            })?;
        notes.push(note);
    }

    notes.sort_by(|a, b| {
        a.start
            .partial_cmp(&b.start)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    Ok(notes)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{contents}").unwrap();
        file
    }

    #[test]
    fn test_read_bare_array() {
        let file = write_temp(
            r#"[{"start": 1.0, "pitch": 60, "velocity": 80},
                {"start": 0.0, "pitch": 64, "velocity": 90}]"#,
        );
        let notes = read_notes_file(file.path()).unwrap();
        assert_eq!(notes.len(), 2);
        // Sorted by onset.
        assert_eq!(notes[0].pitch, 64);
        assert_eq!(notes[1].pitch, 60);
    }

    #[test]
    fn test_read_wrapped_document() {
        let file = write_temp(
            r#"{"notes": [{"start": 0.5, "pitch": 48, "velocity": 64, "duration": 0.25,
                           "name": "C3", "port": "basic-pitch", "channel": 0}]}"#,
        );
        let notes = read_notes_file(file.path()).unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].duration, Some(0.25));
    }

    #[test]
    fn test_empty_array_is_empty_input() {
        let file = write_temp("[]");
        let err = read_notes_file(file.path()).unwrap_err();
        assert!(matches!(err, Error::EmptyInput { .. }));
    }

    #[test]
    fn test_invalid_json_is_malformed() {
        let file = write_temp("not json at all");
        let err = read_notes_file(file.path()).unwrap_err();
        assert!(matches!(err, Error::MalformedInput { .. }));
    }

    #[test]
    fn test_pitch_out_of_range_is_malformed() {
        let file = write_temp(r#"[{"start": 0.0, "pitch": 200, "velocity": 80}]"#);
        let err = read_notes_file(file.path()).unwrap_err();
        assert!(matches!(err, Error::MalformedInput { .. }));
    }

    #[test]
    fn test_negative_start_is_malformed() {
        let file = write_temp(r#"[{"start": -1.0, "pitch": 60, "velocity": 80}]"#);
        let err = read_notes_file(file.path()).unwrap_err();
        assert!(matches!(err, Error::MalformedInput { .. }));
    }

    #[test]
    fn test_end_before_start_is_malformed() {
        let file = write_temp(r#"[{"start": 2.0, "end": 1.0, "pitch": 60, "velocity": 80}]"#);
        let err = read_notes_file(file.path()).unwrap_err();
        assert!(matches!(err, Error::MalformedInput { .. }));
    }

    #[test]
    fn test_missing_file_is_input_read() {
        let err = read_notes_file(Path::new("/nonexistent/notes.json")).unwrap_err();
        assert!(matches!(err, Error::InputRead { .. }));
    }
}
