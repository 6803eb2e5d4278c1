//! Audio decoding, resampling, trimming and WAV writing.

mod decode;
mod resample;
mod trim;
mod wav;

pub use decode::{DecodedRecording, decode_recording};
pub use resample::resample;
pub use trim::{normalize_peak, rms_db, trim_silence};
pub use wav::write_wav_16bit;
