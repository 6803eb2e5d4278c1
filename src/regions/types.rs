//! Region and note types.

use serde::{Deserialize, Serialize};

/// A contiguous time interval judged non-silent.
///
/// Region lists produced by this crate are always sorted ascending by
/// `start` with no overlaps. A region may be zero-length when it comes from
/// a single isolated note onset; the minimum-duration filter removes those
/// in practice.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    /// Start time in seconds.
    pub start: f64,
    /// End time in seconds.
    pub end: f64,
}

impl Region {
    /// Create a new region.
    #[must_use]
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Duration of the region in seconds.
    #[must_use]
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// A single note from a MIDI-derived transcription.
///
/// `pitch` and `velocity` follow MIDI conventions (0-127). `end` and
/// `duration` are optional because some sources only report onsets.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Note {
    /// Onset time in seconds.
    pub start: f64,
    /// MIDI pitch (0-127).
    pub pitch: u8,
    /// MIDI velocity (0-127).
    pub velocity: u8,
    /// Release time in seconds, if known.
    #[serde(default)]
    pub end: Option<f64>,
    /// Duration in seconds, if known.
    #[serde(default)]
    pub duration: Option<f64>,
}

impl Note {
    /// Release time, derived from `end` or `start + duration` when present.
    ///
    /// Falls back to the onset time for sources that only report onsets.
    #[must_use]
    pub fn end_or_start(&self) -> f64 {
        self.end
            .or_else(|| self.duration.map(|d| self.start + d))
            .unwrap_or(self.start)
    }
}

/// A metronome click timestamp used as an alignment boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Click {
    /// Click time in seconds.
    pub time: f64,
}

/// Check that a region list is sorted ascending by start with no overlaps.
#[must_use]
pub fn is_normalized(regions: &[Region]) -> bool {
    regions.windows(2).all(|w| w[0].end <= w[1].start) && regions.iter().all(|r| r.start <= r.end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_duration() {
        let r = Region::new(1.5, 4.0);
        assert!((r.duration() - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_is_normalized() {
        let sorted = vec![Region::new(0.0, 1.0), Region::new(2.0, 3.0)];
        assert!(is_normalized(&sorted));

        let overlapping = vec![Region::new(0.0, 2.5), Region::new(2.0, 3.0)];
        assert!(!is_normalized(&overlapping));

        let inverted = vec![Region::new(3.0, 1.0)];
        assert!(!is_normalized(&inverted));
    }

    #[test]
    fn test_note_end_or_start() {
        let onset_only = Note {
            start: 1.0,
            pitch: 60,
            velocity: 80,
            end: None,
            duration: None,
        };
        assert!((onset_only.end_or_start() - 1.0).abs() < f64::EPSILON);

        let with_duration = Note {
            duration: Some(0.5),
            ..onset_only
        };
        assert!((with_duration.end_or_start() - 1.5).abs() < f64::EPSILON);

        let with_end = Note {
            end: Some(2.0),
            duration: Some(0.5),
            ..onset_only
        };
        assert!((with_end.end_or_start() - 2.0).abs() < f64::EPSILON);
    }
}
