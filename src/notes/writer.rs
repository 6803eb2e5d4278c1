//! Canonical transcription document output.
//!
//! The document format matches what the visualization frontend consumes:
//! `{"notes": [...]}` with start, end, pitch, velocity, duration, name,
//! port and channel per note.

use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::NOTE_PORT;
use crate::error::{Error, Result};
use crate::regions::Note;

const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// A fully populated note entry in the canonical document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteRecord {
    /// Onset time in seconds.
    pub start: f64,
    /// Release time in seconds.
    pub end: f64,
    /// MIDI pitch (0-127).
    pub pitch: u8,
    /// MIDI velocity (0-127).
    pub velocity: u8,
    /// Duration in seconds.
    pub duration: f64,
    /// Note name with octave, e.g. "C4".
    pub name: String,
    /// Source port.
    pub port: String,
    /// MIDI channel.
    pub channel: u8,
}

/// The canonical transcription document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotesDocument {
    /// All notes of the transcription.
    pub notes: Vec<NoteRecord>,
}

/// Note name with octave for a MIDI pitch, e.g. 60 -> "C4".
#[must_use]
pub fn pitch_name(pitch: u8) -> String {
    let name = NOTE_NAMES[usize::from(pitch % 12)];
    let octave = i32::from(pitch / 12) - 1;
    format!("{name}{octave}")
}

/// Build the canonical document from validated notes.
///
/// Missing `end`/`duration` fields are derived from each other; a note
/// with neither gets a zero duration.
#[must_use]
pub fn notes_document(notes: &[Note]) -> NotesDocument {
    let records = notes
        .iter()
        .map(|note| {
            let end = note.end_or_start();
            NoteRecord {
                start: note.start,
                end,
                pitch: note.pitch,
                velocity: note.velocity,
                duration: note.duration.unwrap_or(end - note.start),
                name: pitch_name(note.pitch),
                port: NOTE_PORT.to_string(),
                channel: 0,
            }
        })
        .collect();
    NotesDocument { notes: records }
}

/// Write a transcription document as JSON with a trailing newline.
pub fn write_notes_json(path: &Path, document: &NotesDocument) -> Result<()> {
    let json = serde_json::to_string(document).map_err(|e| Error::JsonWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut file = std::fs::File::create(path)?;
    writeln!(file, "{json}")?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_pitch_name() {
        assert_eq!(pitch_name(60), "C4");
        assert_eq!(pitch_name(69), "A4");
        assert_eq!(pitch_name(0), "C-1");
        assert_eq!(pitch_name(127), "G9");
        assert_eq!(pitch_name(61), "C#4");
    }

    #[test]
    fn test_document_derives_end_and_duration() {
        let notes = vec![Note {
            start: 1.0,
            pitch: 60,
            velocity: 80,
            end: Some(1.5),
            duration: None,
        }];
        let doc = notes_document(&notes);
        assert_eq!(doc.notes[0].end, 1.5);
        assert_eq!(doc.notes[0].duration, 0.5);
        assert_eq!(doc.notes[0].name, "C4");
        assert_eq!(doc.notes[0].port, NOTE_PORT);
        assert_eq!(doc.notes[0].channel, 0);
    }

    #[test]
    fn test_document_onset_only_note() {
        let notes = vec![Note {
            start: 2.0,
            pitch: 64,
            velocity: 100,
            end: None,
            duration: None,
        }];
        let doc = notes_document(&notes);
        assert_eq!(doc.notes[0].end, 2.0);
        assert_eq!(doc.notes[0].duration, 0.0);
    }

    #[test]
    fn test_write_ends_with_newline() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("take.bp.json");
        let doc = notes_document(&[Note {
            start: 0.0,
            pitch: 60,
            velocity: 80,
            end: Some(1.0),
            duration: Some(1.0),
        }]);

        write_notes_json(&path, &doc).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.ends_with('\n'));
        let parsed: NotesDocument = serde_json::from_str(&contents).unwrap();
        assert_eq!(parsed, doc);
    }
}
