//! Configuration type definitions.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_SAMPLE_RATE, DEFAULT_TRIM_TOP_DB, regions};

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default preprocessing settings.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Region detection settings.
    #[serde(default)]
    pub regions: RegionsConfig,
}

/// Default preprocessing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Output directory (None = same as input).
    pub output_dir: Option<PathBuf>,

    /// Target sample rate for normalized WAV output.
    pub sample_rate: u32,

    /// Trim threshold below peak in dB.
    pub trim_top_db: f32,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            output_dir: None,
            sample_rate: DEFAULT_SAMPLE_RATE,
            trim_top_db: DEFAULT_TRIM_TOP_DB,
        }
    }
}

/// Region detection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionsConfig {
    /// Minimum duration of a valid region in seconds.
    pub min_region_dur: f64,

    /// Maximum duration of a region in seconds.
    pub max_region_dur: f64,

    /// Maximum tolerated continuous silence within a region in seconds.
    pub max_silence: f64,

    /// Detection threshold in dBFS for the energy detector.
    pub energy_threshold_db: f32,

    /// Notes below this velocity are ignored by the note extractor.
    pub min_note_velocity: u8,
}

impl Default for RegionsConfig {
    fn default() -> Self {
        Self {
            min_region_dur: regions::DEFAULT_MIN_REGION_DUR,
            max_region_dur: regions::DEFAULT_MAX_REGION_DUR,
            max_silence: regions::DEFAULT_MAX_SILENCE,
            energy_threshold_db: regions::DEFAULT_ENERGY_THRESHOLD_DB,
            min_note_velocity: regions::DEFAULT_MIN_NOTE_VELOCITY,
        }
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_config_default_values() {
        let defaults = DefaultsConfig::default();
        assert_eq!(defaults.sample_rate, 16_000);
        assert_eq!(defaults.trim_top_db, 60.0);
        assert!(defaults.output_dir.is_none());
    }

    #[test]
    fn test_regions_config_default_values() {
        let regions = RegionsConfig::default();
        assert_eq!(regions.min_region_dur, 5.0);
        assert_eq!(regions.max_silence, 2.0);
        assert_eq!(regions.min_note_velocity, 32);
    }
}
