//! Region extraction from audio energy.
//!
//! Windowed RMS activity detection: windows whose level reaches the
//! threshold are active, silence runs up to the tolerance are kept inside
//! an event, events outside the duration bounds are dropped or split.

use crate::audio::rms_db;
use crate::constants::regions as defaults;

use super::Region;

/// Options for energy-based region extraction.
#[derive(Debug, Clone, Copy)]
pub struct EnergyRegionOptions {
    /// Minimum duration of a valid region in seconds.
    pub min_dur: f64,
    /// Maximum duration of a region; longer activity is split.
    pub max_dur: f64,
    /// Maximum tolerated continuous silence within a region in seconds.
    pub max_silence: f64,
    /// Detection threshold in dBFS.
    pub energy_threshold_db: f32,
    /// Analysis window length in seconds.
    pub window_secs: f64,
}

impl Default for EnergyRegionOptions {
    fn default() -> Self {
        Self {
            min_dur: defaults::DEFAULT_MIN_REGION_DUR,
            max_dur: defaults::DEFAULT_MAX_REGION_DUR,
            max_silence: defaults::DEFAULT_MAX_SILENCE,
            energy_threshold_db: defaults::DEFAULT_ENERGY_THRESHOLD_DB,
            window_secs: defaults::ENERGY_WINDOW_SECS,
        }
    }
}

/// Extract non-silent regions from raw audio samples.
///
/// Empty input yields an empty region list.
#[must_use]
pub fn regions_from_audio(
    samples: &[f32],
    sample_rate: u32,
    opts: &EnergyRegionOptions,
) -> Vec<Region> {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let window = ((opts.window_secs * f64::from(sample_rate)) as usize).max(1);
    #[allow(clippy::cast_precision_loss)]
    let window_dur = window as f64 / f64::from(sample_rate);

    let mut regions = Vec::new();
    // Open event state: (start time, end of the last active window).
    let mut open: Option<(f64, f64)> = None;
    let mut silence_run = 0.0f64;

    for (i, frame) in samples.chunks(window).enumerate() {
        #[allow(clippy::cast_precision_loss)]
        let win_start = i as f64 * window_dur;
        #[allow(clippy::cast_precision_loss)]
        let win_end = win_start + frame.len() as f64 / f64::from(sample_rate);

        let active = rms_db(frame) >= opts.energy_threshold_db;

        if active {
            match open {
                None => open = Some((win_start, win_end)),
                Some((start, _)) => {
                    if win_end - start >= opts.max_dur {
                        // Cap at max_dur and keep going in a fresh event.
                        regions.push(Region::new(start, start + opts.max_dur));
                        open = Some((start + opts.max_dur, win_end));
                    } else {
                        open = Some((start, win_end));
                    }
                }
            }
            silence_run = 0.0;
        } else if let Some((start, last_end)) = open {
            silence_run += window_dur;
            if silence_run > opts.max_silence {
                regions.push(Region::new(start, last_end));
                open = None;
                silence_run = 0.0;
            }
        }
    }

    if let Some((start, last_end)) = open {
        regions.push(Region::new(start, last_end));
    }

    regions.retain(|r| r.duration() >= opts.min_dur);
    regions
}

#[cfg(test)]
#[allow(clippy::cast_precision_loss)]
mod tests {
    use super::*;
    use crate::regions::is_normalized;

    const SR: u32 = 8000;

    /// Build a signal from (duration_secs, amplitude) parts.
    fn signal(parts: &[(f64, f32)]) -> Vec<f32> {
        let mut samples = Vec::new();
        for &(dur, amp) in parts {
            let n = (dur * f64::from(SR)) as usize;
            samples.extend((0..n).map(|i| amp * (i as f32 * 0.1).sin()));
        }
        samples
    }

    fn opts(min_dur: f64, max_dur: f64, max_silence: f64) -> EnergyRegionOptions {
        EnergyRegionOptions {
            min_dur,
            max_dur,
            max_silence,
            energy_threshold_db: -40.0,
            window_secs: 0.05,
        }
    }

    #[test]
    fn test_empty_input_yields_no_regions() {
        let regions = regions_from_audio(&[], SR, &EnergyRegionOptions::default());
        assert!(regions.is_empty());
    }

    #[test]
    fn test_silence_yields_no_regions() {
        let samples = vec![0.0f32; SR as usize * 4];
        let regions = regions_from_audio(&samples, SR, &opts(0.5, 120.0, 1.0));
        assert!(regions.is_empty());
    }

    #[test]
    fn test_detects_single_burst() {
        let samples = signal(&[(1.0, 0.0), (2.0, 0.5), (1.0, 0.0)]);
        let regions = regions_from_audio(&samples, SR, &opts(0.5, 120.0, 0.5));
        assert_eq!(regions.len(), 1);
        assert!((regions[0].start - 1.0).abs() < 0.1);
        assert!((regions[0].end - 3.0).abs() < 0.1);
    }

    #[test]
    fn test_short_silence_is_bridged() {
        let samples = signal(&[(1.0, 0.5), (0.5, 0.0), (1.0, 0.5)]);
        let regions = regions_from_audio(&samples, SR, &opts(0.5, 120.0, 1.0));
        assert_eq!(regions.len(), 1);
    }

    #[test]
    fn test_long_silence_splits_events() {
        let samples = signal(&[(1.0, 0.5), (2.0, 0.0), (1.0, 0.5)]);
        let regions = regions_from_audio(&samples, SR, &opts(0.5, 120.0, 1.0));
        assert_eq!(regions.len(), 2);
        assert!(is_normalized(&regions));
    }

    #[test]
    fn test_short_events_are_dropped() {
        let samples = signal(&[(0.2, 0.5), (3.0, 0.0)]);
        let regions = regions_from_audio(&samples, SR, &opts(1.0, 120.0, 0.5));
        assert!(regions.is_empty());
    }

    #[test]
    fn test_long_events_are_split_at_max_dur() {
        let samples = signal(&[(5.0, 0.5)]);
        let regions = regions_from_audio(&samples, SR, &opts(0.5, 2.0, 0.5));
        assert!(regions.len() >= 2);
        assert!(is_normalized(&regions));
        assert!(regions.iter().all(|r| r.duration() <= 2.0 + 0.1));
    }
}
