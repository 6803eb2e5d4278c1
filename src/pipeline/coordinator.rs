//! Pipeline coordination for batch processing.

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::constants::AUDIO_EXTENSIONS;
use crate::error::Result;

/// Result of checking whether a file should be processed.
#[derive(Debug)]
pub enum ProcessCheck {
    /// File should be processed.
    Process,
    /// Skip - output already exists.
    SkipExists,
}

/// Determine the output directory for a file.
pub fn output_dir_for(input: &Path, explicit_output_dir: Option<&Path>) -> PathBuf {
    explicit_output_dir.map_or_else(
        || {
            input
                .parent()
                .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
        },
        Path::to_path_buf,
    )
}

/// Path of the normalized WAV for an input file.
pub fn output_wav_path(input: &Path, output_dir: &Path) -> PathBuf {
    let stem = input.file_stem().map_or_else(
        || std::borrow::Cow::Borrowed("output"),
        |s| s.to_string_lossy(),
    );
    output_dir.join(format!("{stem}.wav"))
}

/// Check if a file should be preprocessed.
///
/// A file whose normalized WAV already exists in the output directory is
/// skipped unless forced.
pub fn should_process(input: &Path, output_dir: &Path, force: bool) -> ProcessCheck {
    if !force && output_wav_path(input, output_dir).exists() {
        return ProcessCheck::SkipExists;
    }
    ProcessCheck::Process
}

/// Collect input files from paths (files and directories).
pub fn collect_input_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            if is_audio_file(path) {
                files.push(path.clone());
            }
        } else if path.is_dir() {
            collect_audio_files_recursive(path, &mut files)?;
        } else {
            warn!("Skipping non-existent path: {}", path.display());
        }
    }

    files.sort();
    Ok(files)
}

/// Recursively collect audio files from a directory.
fn collect_audio_files_recursive(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            collect_audio_files_recursive(&path, files)?;
        } else if is_audio_file(&path) {
            files.push(path);
        }
    }

    Ok(())
}

/// Check if a file is a supported audio format.
pub fn is_audio_file(path: &Path) -> bool {
    use std::ffi::OsStr;

    path.extension().is_some_and(|ext| {
        AUDIO_EXTENSIONS
            .iter()
            .any(|candidate| ext.eq_ignore_ascii_case(OsStr::new(candidate)))
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_output_dir_for_with_explicit() {
        let input = Path::new("/data/raw/take.webm");
        let output = output_dir_for(input, Some(Path::new("/data/prep")));
        assert_eq!(output, PathBuf::from("/data/prep"));
    }

    #[test]
    fn test_output_dir_for_without_explicit() {
        let input = Path::new("/data/raw/take.webm");
        let output = output_dir_for(input, None);
        assert_eq!(output, PathBuf::from("/data/raw"));
    }

    #[test]
    fn test_output_wav_path_replaces_extension() {
        let path = output_wav_path(Path::new("take.webm"), Path::new("/prep"));
        assert_eq!(path, PathBuf::from("/prep/take.wav"));
    }

    #[test]
    fn test_is_audio_file() {
        assert!(is_audio_file(Path::new("take.wav")));
        assert!(is_audio_file(Path::new("take.WEBM")));
        assert!(is_audio_file(Path::new("take.flac")));
        assert!(is_audio_file(Path::new("take.ogg")));
        assert!(!is_audio_file(Path::new("take.notes.json")));
        assert!(!is_audio_file(Path::new(".gitkeep")));
    }

    #[test]
    fn test_should_process_skips_existing_output() {
        let dir = TempDir::new().unwrap();
        let input = Path::new("take.webm");
        std::fs::write(dir.path().join("take.wav"), b"").unwrap();

        assert!(matches!(
            should_process(input, dir.path(), false),
            ProcessCheck::SkipExists
        ));
        assert!(matches!(
            should_process(input, dir.path(), true),
            ProcessCheck::Process
        ));
    }

    #[test]
    fn test_collect_input_files_from_directory() {
        let dir = TempDir::new().unwrap();
        for name in ["b.wav", "a.webm", "notes.json", ".gitkeep"] {
            std::fs::write(dir.path().join(name), b"").unwrap();
        }

        let files = collect_input_files(&[dir.path().to_path_buf()]).unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.webm", "b.wav"]);
    }
}
