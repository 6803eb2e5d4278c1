//! Click alignment: snapping region boundaries to metronome clicks.

use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

use super::merge::sweep;
use super::{Click, Region};

/// Expand regions outward to the nearest click boundaries.
///
/// Each start is snapped down to the latest click at or before it (0 if
/// there is none) and each end up to the earliest click at or after it
/// (the recording duration if there is none). Snapping can make adjacent
/// regions touch or overlap, so the merge sweep runs again before the list
/// is returned.
///
/// `clicks` must be sorted ascending; [`read_clicks_file`] guarantees that.
#[must_use]
pub fn align_to_clicks(regions: &[Region], clicks: &[Click], duration: f64) -> Vec<Region> {
    if clicks.is_empty() {
        return regions.to_vec();
    }

    let snapped: Vec<Region> = regions
        .iter()
        .map(|r| {
            let before = clicks.partition_point(|c| c.time <= r.start);
            let start = if before == 0 {
                0.0
            } else {
                clicks[before - 1].time
            };

            let after = clicks.partition_point(|c| c.time < r.end);
            let end = clicks.get(after).map_or(duration, |c| c.time);

            Region::new(start, end)
        })
        .collect();

    sweep(snapped)
}

/// Raw click entry: either a bare timestamp or an object with a `time`
/// field, depending on which recorder wrote the file.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawClick {
    Time(f64),
    Object { time: f64 },
}

impl RawClick {
    fn time(&self) -> f64 {
        match *self {
            Self::Time(t) | Self::Object { time: t } => t,
        }
    }
}

/// Read metronome click timestamps from a JSON file.
///
/// Accepts a JSON array of numbers or of `{"time": ...}` objects. The
/// result is sorted ascending.
///
/// # Errors
///
/// Returns [`Error::InputRead`] if the file cannot be read and
/// [`Error::MalformedInput`] if it is not valid click JSON.
pub fn read_clicks_file(path: &Path) -> Result<Vec<Click>> {
    let contents = std::fs::read_to_string(path).map_err(|e| Error::InputRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let raw: Vec<RawClick> =
        serde_json::from_str(&contents).map_err(|e| Error::MalformedInput {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let mut clicks: Vec<Click> = raw.iter().map(|c| Click { time: c.time() }).collect();

    if clicks.iter().any(|c| !c.time.is_finite() || c.time < 0.0) {
        return Err(Error::MalformedInput {
            path: path.to_path_buf(),
            message: "click times must be finite and non-negative".to_string(),
        });
    }

    clicks.sort_by(|a, b| {
        a.time
            .partial_cmp(&b.time)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    Ok(clicks)
}
