//! WAV file writing.

use std::path::Path;

use hound::{SampleFormat, WavSpec, WavWriter};

use crate::error::{Error, Result};

/// Write mono f32 samples to a 16-bit PCM WAV file.
pub fn write_wav_16bit(path: &Path, samples: &[f32], sample_rate: u32) -> Result<()> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let wav_error = |e: hound::Error| Error::WavWriteFailed {
        path: path.to_path_buf(),
        source: e,
    };

    let mut writer = WavWriter::create(path, spec).map_err(wav_error)?;

    for &sample in samples {
        #[allow(clippy::cast_possible_truncation)]
        let sample_i16 = (sample.clamp(-1.0, 1.0) * f32::from(i16::MAX)) as i16;
        writer.write_sample(sample_i16).map_err(wav_error)?;
    }

    writer.finalize().map_err(wav_error)
}
