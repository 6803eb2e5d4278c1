//! Region extraction from note onsets.
//!
//! Looks only at note starts: a gap between consecutive onsets longer than
//! the silence tolerance closes the current region.

use crate::constants::regions as defaults;
use crate::error::{Error, Result};

use super::{Note, Region};

/// Options for note-onset region extraction.
#[derive(Debug, Clone, Copy)]
pub struct NoteRegionOptions {
    /// Regions shorter than this are dropped.
    pub min_region_dur: f64,
    /// A gap between onsets longer than this closes the region.
    pub max_silence_dur: f64,
    /// Notes quieter than this velocity are ignored.
    pub min_note_velocity: u8,
}

impl Default for NoteRegionOptions {
    fn default() -> Self {
        Self {
            min_region_dur: defaults::DEFAULT_MIN_REGION_DUR,
            max_silence_dur: defaults::DEFAULT_MAX_SILENCE,
            min_note_velocity: defaults::DEFAULT_MIN_NOTE_VELOCITY,
        }
    }
}

/// Extract non-silent regions from a MIDI-derived note list.
///
/// Notes below the velocity threshold are ignored. The first region opens
/// at the first qualifying onset; a gap larger than `max_silence_dur`
/// between consecutive onsets closes the region at the previous onset and
/// opens a new one at the next. The final region closes at the last onset.
/// Regions shorter than `min_region_dur` are dropped afterwards.
///
/// # Errors
///
/// Returns [`Error::EmptyInput`] if the note list is empty or every note
/// falls below the velocity threshold.
pub fn regions_from_notes(notes: &[Note], opts: &NoteRegionOptions) -> Result<Vec<Region>> {
    let mut onsets: Vec<f64> = notes
        .iter()
        .filter(|n| n.velocity >= opts.min_note_velocity)
        .map(|n| n.start)
        .collect();
    onsets.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let Some(&first) = onsets.first() else {
        return Err(Error::empty_input(
            "no notes at or above the velocity threshold",
        ));
    };

    let mut regions = Vec::new();
    let mut region_start = first;
    let mut region_end = first;

    for &onset in &onsets[1..] {
        if onset - region_end > opts.max_silence_dur {
            regions.push(Region::new(region_start, region_end));
            region_start = onset;
        }
        region_end = onset;
    }
    regions.push(Region::new(region_start, region_end));

    regions.retain(|r| r.duration() >= opts.min_region_dur);
    Ok(regions)
}
