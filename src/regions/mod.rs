//! Non-silent region detection, merging and click alignment.
//!
//! Regions come from two sources: audio energy and MIDI-derived note
//! onsets. The lists are merged with interval-union semantics and can be
//! expanded outward to metronome click boundaries. Every function here
//! returns lists that are sorted ascending by start with no overlaps.

mod clicks;
mod energy;
mod from_notes;
mod merge;
mod types;

pub use clicks::{align_to_clicks, read_clicks_file};
pub use energy::{EnergyRegionOptions, regions_from_audio};
pub use from_notes::{NoteRegionOptions, regions_from_notes};
pub use merge::merge_regions;
pub use types::{Click, Note, Region, is_normalized};
