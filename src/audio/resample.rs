//! Audio resampling using rubato.

use std::path::Path;

use audioadapter_buffers::direct::SequentialSlice;
use rubato::{Fft, FixedSync, Resampler};

use crate::error::{Error, Result};

const CHUNK_SIZE: usize = 1024;
const CHANNELS: usize = 1;

/// Resample mono audio to the target sample rate.
///
/// Returns the input unchanged if it is already at the target rate. `path`
/// is only used for error reporting.
///
/// # Errors
///
/// Returns [`Error::ExternalTool`] if the resampler fails.
pub fn resample(samples: Vec<f32>, from_rate: u32, to_rate: u32, path: &Path) -> Result<Vec<f32>> {
    if from_rate == to_rate {
        return Ok(samples);
    }

    let mut resampler = Fft::<f32>::new(
        from_rate as usize,
        to_rate as usize,
        CHUNK_SIZE,
        1,
        CHANNELS,
        FixedSync::Both,
    )
    .map_err(|e| resample_error(path, e))?;

    let frames_in = resampler.input_frames_next();
    let ratio = f64::from(to_rate) / f64::from(from_rate);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let mut output =
        Vec::with_capacity((samples.len() as f64 * ratio).ceil() as usize + CHUNK_SIZE);

    let mut chunks = samples.chunks_exact(frames_in);
    for chunk in chunks.by_ref() {
        let resampled = feed(&mut resampler, chunk, path)?;
        output.extend_from_slice(&resampled);
    }

    // Pad the tail up to a full chunk and only keep the proportional part
    // of the resampler's output.
    let tail = chunks.remainder();
    if !tail.is_empty() {
        let mut padded = tail.to_vec();
        padded.resize(frames_in, 0.0);
        let resampled = feed(&mut resampler, &padded, path)?;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let keep = ((tail.len() as f64 * ratio).ceil() as usize).min(resampled.len());
        output.extend_from_slice(&resampled[..keep]);
    }

    Ok(output)
}

/// Push one fixed-size chunk through the resampler.
fn feed(resampler: &mut Fft<f32>, chunk: &[f32], path: &Path) -> Result<Vec<f32>> {
    let adapter = SequentialSlice::new(chunk, CHANNELS, chunk.len())
        .map_err(|e| resample_error(path, e))?;
    let resampled = resampler
        .process(&adapter, 0, None)
        .map_err(|e| resample_error(path, e))?;
    Ok(resampled.take_data())
}

fn resample_error(
    path: &Path,
    source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
) -> Error {
    Error::ExternalTool {
        tool: "rubato",
        path: path.to_path_buf(),
        source: source.into(),
    }
}
