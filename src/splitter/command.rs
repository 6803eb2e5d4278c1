//! Split command execution.

use std::path::{Path, PathBuf};

use tracing::{error, info, warn};

use crate::cli::SplitArgs;
use crate::config::Config;
use crate::constants::suffixes;
use crate::error::{Error, Result};
use crate::notes::read_notes_file;
use crate::pipeline::collect_input_files;
use crate::regions::{
    EnergyRegionOptions, NoteRegionOptions, Region, align_to_clicks, merge_regions,
    read_clicks_file, regions_from_audio, regions_from_notes,
};
use crate::{audio, regions};

use super::SegmentWriter;

/// Execute the split command over all inputs.
///
/// Failures are local to a file: the error is logged and the batch
/// continues unless `--fail-fast` is set.
pub fn execute(args: &SplitArgs, config: &Config) -> Result<()> {
    let files = collect_input_files(&args.inputs)?;
    if files.is_empty() {
        return Err(Error::NoValidAudioFiles);
    }

    let energy_opts = energy_options(args, config);
    let note_opts = note_options(args, config);

    let mut processed = 0usize;
    let mut segments = 0usize;
    let mut errors = 0usize;

    for file in &files {
        match split_file(file, args, &energy_opts, &note_opts) {
            Ok(count) => {
                processed += 1;
                segments += count;
            }
            Err(e) => {
                error!("Failed to split {}: {}", file.display(), e);
                errors += 1;
                if args.fail_fast {
                    return Err(e);
                }
            }
        }
    }

    info!("Split complete: {segments} segments from {processed} file(s), {errors} error(s)");
    Ok(())
}

/// Split one recording into per-region WAV segments.
fn split_file(
    input: &Path,
    args: &SplitArgs,
    energy_opts: &EnergyRegionOptions,
    note_opts: &NoteRegionOptions,
) -> Result<usize> {
    info!("Splitting {}", input.display());

    let decoded = audio::decode_recording(input)?;
    if decoded.samples.is_empty() {
        return Err(Error::empty_input(format!(
            "no audio in '{}'",
            input.display()
        )));
    }
    let duration = decoded.duration_secs();

    let audio_regions = regions_from_audio(&decoded.samples, decoded.sample_rate, energy_opts);
    let note_regions = note_derived_regions(input, args, note_opts)?;

    let mut merged = merge_regions(&[&audio_regions, &note_regions]);

    if let Some(clicks_path) = sidecar_path(input, args.clicks.as_ref(), suffixes::CLICKS) {
        let clicks = read_clicks_file(&clicks_path)?;
        info!(
            "Aligning {} region(s) to {} click(s) from {}",
            merged.len(),
            clicks.len(),
            clicks_path.display()
        );
        merged = align_to_clicks(&merged, &clicks, duration);
    }

    debug_assert!(regions::is_normalized(&merged));

    if merged.is_empty() {
        warn!("No non-silent regions in {}", input.display());
        return Ok(0);
    }

    let stem = file_stem(input);
    let output_dir = args.output.clone().unwrap_or_else(|| {
        input
            .parent()
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
    });
    let writer = SegmentWriter::new(output_dir);
    let start_index = writer.next_index(&stem);

    let mut written = 0usize;
    for region in &merged {
        let Some(samples) = region_samples(&decoded.samples, decoded.sample_rate, region) else {
            continue;
        };
        // Indices count written segments, so skipped regions leave no holes.
        let index = start_index + written;
        let path = writer.write_segment(samples, decoded.sample_rate, &stem, index)?;
        info!(
            "Region {index}: {:.3}s -- {:.3}s -> {}",
            region.start,
            region.end,
            path.display()
        );
        written += 1;
    }

    Ok(written)
}

/// Regions from a sidecar notes file, if one is present.
///
/// An empty notes file, or one with nothing above the velocity threshold,
/// is not fatal for splitting; the audio-derived regions still stand.
fn note_derived_regions(
    input: &Path,
    args: &SplitArgs,
    note_opts: &NoteRegionOptions,
) -> Result<Vec<Region>> {
    let Some(notes_path) = sidecar_path(input, args.notes.as_ref(), suffixes::NOTES_INPUT) else {
        return Ok(Vec::new());
    };

    let notes = match read_notes_file(&notes_path) {
        Ok(notes) => notes,
        Err(Error::EmptyInput { reason }) => {
            warn!("Ignoring notes from {}: {reason}", notes_path.display());
            return Ok(Vec::new());
        }
        Err(e) => return Err(e),
    };
    match regions_from_notes(&notes, note_opts) {
        Ok(regions) => {
            info!(
                "Found {} note-derived region(s) in {}",
                regions.len(),
                notes_path.display()
            );
            Ok(regions)
        }
        Err(Error::EmptyInput { reason }) => {
            warn!("Ignoring notes from {}: {reason}", notes_path.display());
            Ok(Vec::new())
        }
        Err(e) => Err(e),
    }
}

/// Resolve a sidecar file: an explicit path wins, otherwise the input's
/// stem plus the suffix next to the input, if it exists.
fn sidecar_path(input: &Path, explicit: Option<&PathBuf>, suffix: &str) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.clone());
    }

    let candidate = input
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(format!("{}{suffix}", file_stem(input)));
    candidate.exists().then_some(candidate)
}

/// Sample slice for a region, clamped to the recording bounds.
fn region_samples<'a>(samples: &'a [f32], sample_rate: u32, region: &Region) -> Option<&'a [f32]> {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let start = ((region.start * f64::from(sample_rate)) as usize).min(samples.len());
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let end = ((region.end * f64::from(sample_rate)).ceil() as usize).min(samples.len());

    (start < end).then(|| &samples[start..end])
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map_or_else(|| "output".to_string(), |s| s.to_string_lossy().into_owned())
}

fn energy_options(args: &SplitArgs, config: &Config) -> EnergyRegionOptions {
    EnergyRegionOptions {
        min_dur: args.min_region_dur.unwrap_or(config.regions.min_region_dur),
        max_dur: args.max_region_dur.unwrap_or(config.regions.max_region_dur),
        max_silence: args.max_silence.unwrap_or(config.regions.max_silence),
        energy_threshold_db: args
            .energy_threshold
            .unwrap_or(config.regions.energy_threshold_db),
        ..EnergyRegionOptions::default()
    }
}

fn note_options(args: &SplitArgs, config: &Config) -> NoteRegionOptions {
    NoteRegionOptions {
        min_region_dur: args.min_region_dur.unwrap_or(config.regions.min_region_dur),
        max_silence_dur: args.max_silence.unwrap_or(config.regions.max_silence),
        min_note_velocity: args
            .min_note_velocity
            .unwrap_or(config.regions.min_note_velocity),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_region_samples_clamps_to_bounds() {
        let samples = vec![0.0f32; 1000];
        let region = Region::new(0.0, 10.0);
        let slice = region_samples(&samples, 100, &region).unwrap();
        assert_eq!(slice.len(), 1000);
    }

    #[test]
    fn test_region_samples_out_of_range_is_none() {
        let samples = vec![0.0f32; 1000];
        let region = Region::new(20.0, 30.0);
        assert!(region_samples(&samples, 100, &region).is_none());
    }

    #[test]
    fn test_region_samples_zero_length_is_none() {
        let samples = vec![0.0f32; 1000];
        let region = Region::new(5.0, 5.0);
        assert!(region_samples(&samples, 100, &region).is_none());
    }

    #[test]
    fn test_sidecar_path_explicit_wins() {
        let explicit = PathBuf::from("/somewhere/else.notes.json");
        let resolved = sidecar_path(
            Path::new("/data/take.wav"),
            Some(&explicit),
            suffixes::NOTES_INPUT,
        );
        assert_eq!(resolved, Some(explicit));
    }

    #[test]
    fn test_sidecar_path_missing_sibling_is_none() {
        let resolved = sidecar_path(Path::new("/nonexistent/take.wav"), None, suffixes::CLICKS);
        assert!(resolved.is_none());
    }
}
