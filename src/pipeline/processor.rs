//! Single file preprocessing.
//!
//! One input recording becomes a trimmed, peak-normalized mono WAV at the
//! target sample rate, plus a canonical transcription document when a
//! notes sidecar is available.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::audio::{decode_recording, normalize_peak, resample, trim_silence, write_wav_16bit};
use crate::constants::suffixes;
use crate::error::{Error, Result};
use crate::notes::{notes_document, read_notes_file, write_notes_json};
use crate::pipeline::output_wav_path;

/// Options for preprocessing a single file.
#[derive(Debug, Clone)]
pub struct PreprocessOptions {
    /// Target sample rate for the normalized WAV.
    pub sample_rate: u32,
    /// Trim threshold below peak in dB.
    pub trim_top_db: f32,
    /// Explicit notes sidecar path (otherwise resolved next to the input).
    pub notes: Option<PathBuf>,
}

/// Result of preprocessing a single file.
#[derive(Debug)]
pub struct ProcessResult {
    /// Path of the written WAV file.
    pub wav_path: PathBuf,
    /// Path of the written transcription document, if any.
    pub notes_path: Option<PathBuf>,
    /// Duration of the trimmed audio in seconds.
    pub audio_duration_secs: f64,
}

/// Preprocess one recording.
///
/// # Errors
///
/// Returns [`Error::EmptyInput`] when nothing but silence remains after
/// trimming; decode and write failures are propagated.
pub fn process_file(
    input_path: &Path,
    output_dir: &Path,
    opts: &PreprocessOptions,
) -> Result<ProcessResult> {
    info!("Processing {}", input_path.display());

    let decoded = decode_recording(input_path)?;
    debug!(
        "Decoded {:.1}s at {} Hz",
        decoded.duration_secs(),
        decoded.sample_rate
    );

    let trimmed = trim_silence(&decoded.samples, opts.trim_top_db);
    if trimmed.is_empty() {
        return Err(Error::empty_input(format!(
            "only silence in '{}'",
            input_path.display()
        )));
    }
    debug!(
        "Trimmed {} of {} samples",
        decoded.samples.len() - trimmed.len(),
        decoded.samples.len()
    );

    let mut samples = resample(
        trimmed.to_vec(),
        decoded.sample_rate,
        opts.sample_rate,
        input_path,
    )?;
    normalize_peak(&mut samples);

    std::fs::create_dir_all(output_dir).map_err(|e| Error::OutputDirCreateFailed {
        path: output_dir.to_path_buf(),
        source: e,
    })?;

    let wav_path = output_wav_path(input_path, output_dir);
    write_wav_16bit(&wav_path, &samples, opts.sample_rate)?;
    info!("Wrote {}", wav_path.display());

    let notes_path = write_transcription(input_path, output_dir, opts.notes.as_ref())?;

    #[allow(clippy::cast_precision_loss)]
    let audio_duration_secs = samples.len() as f64 / f64::from(opts.sample_rate);

    Ok(ProcessResult {
        wav_path,
        notes_path,
        audio_duration_secs,
    })
}

/// Normalize a notes sidecar into the canonical transcription document.
///
/// Returns `Ok(None)` when the input has no notes sidecar.
fn write_transcription(
    input_path: &Path,
    output_dir: &Path,
    explicit_notes: Option<&PathBuf>,
) -> Result<Option<PathBuf>> {
    let stem = input_path.file_stem().map_or_else(
        || std::borrow::Cow::Borrowed("output"),
        |s| s.to_string_lossy(),
    );

    let notes_path = match explicit_notes {
        Some(path) => path.clone(),
        None => {
            let sibling = input_path
                .parent()
                .unwrap_or_else(|| Path::new("."))
                .join(format!("{stem}{}", suffixes::NOTES_INPUT));
            if !sibling.exists() {
                return Ok(None);
            }
            sibling
        }
    };

    let notes = read_notes_file(&notes_path)?;
    let document = notes_document(&notes);

    let out_path = output_dir.join(format!("{stem}{}", suffixes::NOTES_OUTPUT));
    write_notes_json(&out_path, &document)?;
    info!("Wrote {} ({} notes)", out_path.display(), document.notes.len());

    Ok(Some(out_path))
}
