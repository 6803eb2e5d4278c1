//! Note list input parsing and canonical transcription output.

mod parser;
mod writer;

pub use parser::read_notes_file;
pub use writer::{NoteRecord, NotesDocument, notes_document, pitch_name, write_notes_json};
