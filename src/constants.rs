//! Application-wide constants.
//!
//! All magic numbers and strings are defined here to ensure consistency
//! and make changes easy to track.

/// Application name used for config directories and user-facing messages.
pub const APP_NAME: &str = "takesplit";

/// Default sample rate for normalized output WAV files.
pub const DEFAULT_SAMPLE_RATE: u32 = 16_000;

/// Default threshold below the peak (in dB) for trimming leading and
/// trailing silence.
pub const DEFAULT_TRIM_TOP_DB: f32 = 60.0;

/// Region detection defaults.
///
/// These match the values the practice-recording pipeline has been tuned
/// with: five-second minimum takes, two seconds of tolerated silence inside
/// a take.
pub mod regions {
    /// Minimum duration of a valid region in seconds.
    pub const DEFAULT_MIN_REGION_DUR: f64 = 5.0;

    /// Maximum duration of a region in seconds; longer activity is split.
    pub const DEFAULT_MAX_REGION_DUR: f64 = 1200.0;

    /// Maximum tolerated continuous silence within a region in seconds.
    pub const DEFAULT_MAX_SILENCE: f64 = 2.0;

    /// Detection threshold in dBFS for the energy detector.
    pub const DEFAULT_ENERGY_THRESHOLD_DB: f32 = -48.0;

    /// Notes quieter than this velocity are ignored by the note-onset
    /// region extractor.
    pub const DEFAULT_MIN_NOTE_VELOCITY: u8 = 32;

    /// Analysis window length for the energy detector in seconds.
    pub const ENERGY_WINDOW_SECS: f64 = 0.05;
}

/// Sidecar and output file suffixes.
pub mod suffixes {
    /// Raw MIDI-derived note list placed next to a recording.
    pub const NOTES_INPUT: &str = ".notes.json";

    /// Canonical transcription document written by the preprocessor.
    pub const NOTES_OUTPUT: &str = ".bp.json";

    /// Metronome click timestamps placed next to a recording.
    pub const CLICKS: &str = ".clicks.json";
}

/// Supported audio file extensions for input collection.
pub const AUDIO_EXTENSIONS: &[&str] = &["wav", "flac", "mp3", "m4a", "aac", "ogg", "webm"];

/// Port name recorded in transcription documents for pitch-detected notes.
pub const NOTE_PORT: &str = "basic-pitch";

/// RMS floor in dB for silent windows.
pub const SILENCE_FLOOR_DB: f32 = -80.0;
