//! Exercise summary over a directory of takes.
//!
//! Take filenames follow `<exercise>_<person>_<date>_<take>.<ext>`; the
//! exercise name is the stem minus the last three underscore-separated
//! fields.

use std::collections::BTreeMap;
use std::path::Path;

use crate::cli::SummaryArgs;
use crate::error::Result;
use crate::pipeline::is_audio_file;

/// Execute the summary command.
#[allow(clippy::print_stdout)]
pub fn execute(args: &SummaryArgs) -> Result<()> {
    let counts = exercise_counts(&args.dir)?;

    if counts.is_empty() {
        println!("No takes found in {}", args.dir.display());
        return Ok(());
    }

    println!("Exercises");
    for (exercise, count) in &counts {
        println!("{exercise:<50} {count}");
    }

    println!("\nCounts (sorted)");
    let mut by_count: Vec<(&String, &usize)> = counts.iter().collect();
    by_count.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
    for (exercise, count) in by_count {
        println!("{exercise:<50} {count}");
    }

    Ok(())
}

/// Count takes per exercise in a directory.
///
/// The result is sorted by exercise name.
pub fn exercise_counts(dir: &Path) -> Result<BTreeMap<String, usize>> {
    let mut counts = BTreeMap::new();

    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() || !is_audio_file(&path) {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            *counts.entry(exercise_name(stem)).or_insert(0) += 1;
        }
    }

    Ok(counts)
}

/// Exercise name for a take stem: everything except the trailing person,
/// date and take fields. Stems with too few fields are kept whole.
fn exercise_name(stem: &str) -> String {
    let parts: Vec<&str> = stem.split('_').collect();
    if parts.len() > 3 {
        parts[..parts.len() - 3].join("_")
    } else {
        stem.to_string()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_exercise_name_strips_trailing_fields() {
        assert_eq!(
            exercise_name("blues-60x2-1_alice_2022-11-15T23-04-17.661Z_3"),
            "blues-60x2-1"
        );
        assert_eq!(
            exercise_name("scale_c-major_bob_2023-01-01_0"),
            "scale_c-major"
        );
    }

    #[test]
    fn test_exercise_name_short_stem_kept_whole() {
        assert_eq!(exercise_name("warmup"), "warmup");
        assert_eq!(exercise_name("a_b_c"), "a_b_c");
    }

    #[test]
    fn test_exercise_counts() {
        let dir = TempDir::new().unwrap();
        for name in [
            "blues_alice_2022-11-15_0.wav",
            "blues_alice_2022-11-16_1.wav",
            "scale_bob_2022-11-15_0.wav",
            ".gitkeep",
            "notes.json",
        ] {
            std::fs::write(dir.path().join(name), b"").unwrap();
        }

        let counts = exercise_counts(dir.path()).unwrap();
        assert_eq!(counts.get("blues"), Some(&2));
        assert_eq!(counts.get("scale"), Some(&1));
        assert_eq!(counts.len(), 2);
    }
}
