//! Audio decoding using symphonia.

use std::fs::File;
use std::path::Path;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{CODEC_TYPE_NULL, DecoderOptions};
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::{MediaSourceStream, MediaSourceStreamOptions};
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::error::{Error, Result};

/// A decoded recording as mono f32 samples in [-1.0, 1.0].
#[derive(Debug, Clone)]
pub struct DecodedRecording {
    /// Mono samples.
    pub samples: Vec<f32>,
    /// Sample rate in Hz.
    pub sample_rate: u32,
}

impl DecodedRecording {
    /// Duration of the recording in seconds.
    #[must_use]
    pub fn duration_secs(&self) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        {
            self.samples.len() as f64 / f64::from(self.sample_rate)
        }
    }
}

/// Decode an audio file to mono f32 samples.
///
/// Multichannel input is mixed down to mono. Container and codec support
/// follows the enabled symphonia features (wav, flac, mp3, aac/m4a,
/// ogg/vorbis, webm).
///
/// # Errors
///
/// Returns [`Error::InputRead`] if the file cannot be opened,
/// [`Error::NoAudioTracks`] if the container has no decodable track and
/// [`Error::ExternalTool`] for codec failures.
pub fn decode_recording(path: &Path) -> Result<DecodedRecording> {
    let file = File::open(path).map_err(|e| Error::InputRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mss = MediaSourceStream::new(Box::new(file), MediaSourceStreamOptions::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| codec_error(path, e))?;
    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| Error::NoAudioTracks {
            path: path.to_path_buf(),
        })?;
    let track_id = track.id;

    let sample_rate = track
        .codec_params
        .sample_rate
        .ok_or_else(|| codec_error(path, "missing sample rate"))?;

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| codec_error(path, e))?;

    let mut samples: Vec<f32> = Vec::new();
    let mut sample_buf: Option<SampleBuffer<f32>> = None;

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(symphonia::core::errors::Error::IoError(e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(e) => return Err(codec_error(path, e)),
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = decoder.decode(&packet).map_err(|e| codec_error(path, e))?;

        let buf = sample_buf.get_or_insert_with(|| {
            SampleBuffer::new(decoded.capacity() as u64, *decoded.spec())
        });
        let channels = decoded.spec().channels.count().max(1);
        buf.copy_interleaved_ref(decoded);

        // Mix interleaved frames down to mono.
        #[allow(clippy::cast_precision_loss)]
        samples.extend(
            buf.samples()
                .chunks_exact(channels)
                .map(|frame| frame.iter().sum::<f32>() / channels as f32),
        );
    }

    Ok(DecodedRecording {
        samples,
        sample_rate,
    })
}

fn codec_error(
    path: &Path,
    source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
) -> Error {
    Error::ExternalTool {
        tool: "symphonia",
        path: path.to_path_buf(),
        source: source.into(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_missing_file_is_input_read() {
        let err = decode_recording(Path::new("/nonexistent/take.wav")).unwrap_err();
        assert!(matches!(err, Error::InputRead { .. }));
    }

    #[test]
    fn test_duration_secs() {
        let decoded = DecodedRecording {
            samples: vec![0.0; 32_000],
            sample_rate: 16_000,
        };
        assert!((decoded.duration_secs() - 2.0).abs() < f64::EPSILON);
    }
}
