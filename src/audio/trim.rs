//! Silence trimming and peak normalization.
//!
//! The trim follows the usual convention: frame-wise RMS is compared
//! against a threshold `top_db` below the recording's peak level, and
//! everything before the first and after the last frame above that
//! threshold is cut.

use crate::constants::SILENCE_FLOOR_DB;

/// Trim frame length in samples, applied at the native decoded rate.
const TRIM_FRAME: usize = 512;

/// RMS level of a sample frame in dBFS.
///
/// Returns the silence floor for empty or all-zero frames.
#[must_use]
pub fn rms_db(frame: &[f32]) -> f32 {
    if frame.is_empty() {
        return SILENCE_FLOOR_DB;
    }

    let sum_squares: f64 = frame.iter().map(|&s| f64::from(s) * f64::from(s)).sum();
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    let rms = (sum_squares / frame.len() as f64).sqrt() as f32;

    if rms > 0.0 {
        (20.0 * rms.log10()).max(SILENCE_FLOOR_DB)
    } else {
        SILENCE_FLOOR_DB
    }
}

/// Trim leading and trailing silence from a recording.
///
/// Frames whose RMS is more than `top_db` below the peak frame level are
/// treated as silent. Returns the trimmed sample range as a subslice; an
/// all-silent recording trims to an empty slice.
#[must_use]
pub fn trim_silence(samples: &[f32], top_db: f32) -> &[f32] {
    let levels: Vec<f32> = samples.chunks(TRIM_FRAME).map(rms_db).collect();
    let peak = levels.iter().copied().fold(SILENCE_FLOOR_DB, f32::max);
    // Floor-level frames must never count as active: without the clamp an
    // all-silent recording has peak == floor and every frame clears
    // peak - top_db.
    let threshold = (peak - top_db).max(SILENCE_FLOOR_DB);

    let first = levels.iter().position(|&db| db > threshold);
    let last = levels.iter().rposition(|&db| db > threshold);

    match (first, last) {
        (Some(first), Some(last)) => {
            let start = first * TRIM_FRAME;
            let end = ((last + 1) * TRIM_FRAME).min(samples.len());
            &samples[start..end]
        }
        _ => &[],
    }
}

/// Scale samples so the peak amplitude is 1.0.
///
/// Silent input is left untouched.
pub fn normalize_peak(samples: &mut [f32]) {
    let peak = samples.iter().fold(0.0f32, |acc, &s| acc.max(s.abs()));
    if peak > 0.0 {
        let gain = 1.0 / peak;
        for s in samples {
            *s *= gain;
        }
    }
}
