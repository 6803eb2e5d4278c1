//! Segment WAV writing with index continuation.
//!
//! Segments are named `<stem>_<index>.wav`. The index continues from the
//! highest existing index for that stem in the output directory, found by
//! a directory scan rather than stored state, so repeated runs append
//! instead of overwriting earlier splits.

use std::fs;
use std::path::PathBuf;

use crate::audio::write_wav_16bit;
use crate::error::{Error, Result};

/// Writes region segments as WAV files into an output directory.
pub struct SegmentWriter {
    output_dir: PathBuf,
}

impl SegmentWriter {
    /// Create a segment writer for the given output directory.
    #[must_use]
    pub fn new(output_dir: PathBuf) -> Self {
        Self { output_dir }
    }

    /// Next free segment index for a stem.
    ///
    /// Scans the output directory for `<stem>_<n>.wav` files and returns
    /// one past the highest `n`, or 0 when none exist (including when the
    /// directory itself does not exist yet).
    #[must_use]
    pub fn next_index(&self, stem: &str) -> usize {
        let Ok(entries) = fs::read_dir(&self.output_dir) else {
            return 0;
        };

        entries
            .filter_map(std::result::Result::ok)
            .filter_map(|entry| {
                let name = entry.file_name();
                segment_index(&name.to_string_lossy(), stem)
            })
            .max()
            .map_or(0, |highest| highest + 1)
    }

    /// Write one segment WAV and return its path.
    pub fn write_segment(
        &self,
        samples: &[f32],
        sample_rate: u32,
        stem: &str,
        index: usize,
    ) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir).map_err(|e| Error::OutputDirCreateFailed {
            path: self.output_dir.clone(),
            source: e,
        })?;

        let path = self.output_dir.join(format!("{stem}_{index}.wav"));
        write_wav_16bit(&path, samples, sample_rate)?;
        Ok(path)
    }
}

/// Parse the index out of a `<stem>_<n>.wav` filename for a given stem.
fn segment_index(file_name: &str, stem: &str) -> Option<usize> {
    let rest = file_name.strip_prefix(stem)?.strip_prefix('_')?;
    rest.strip_suffix(".wav")?.parse().ok()
}
