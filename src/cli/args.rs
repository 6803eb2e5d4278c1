//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Preprocess and silence-split music practice recordings.
#[derive(Debug, Parser)]
#[command(name = "takesplit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Input files or directories to preprocess.
    pub inputs: Vec<PathBuf>,

    /// Common options for preprocessing.
    #[command(flatten)]
    pub preprocess: PreprocessArgs,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    Config {
        /// Configuration action to perform.
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Split recordings into per-region WAV segments.
    Split(SplitArgs),
    /// Summarize a directory of takes by exercise.
    Summary(SummaryArgs),
}

/// Config subcommand actions.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigAction {
    /// Create default configuration file.
    Init,
    /// Display current configuration.
    Show,
    /// Print configuration file path.
    Path,
}

/// Arguments for the default preprocess command.
#[derive(Debug, Args)]
#[allow(clippy::struct_excessive_bools)]
pub struct PreprocessArgs {
    /// Output directory (default: same as input).
    #[arg(short, long, env = "TAKESPLIT_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Target sample rate for normalized WAV output.
    #[arg(long, env = "TAKESPLIT_SAMPLE_RATE")]
    pub sample_rate: Option<u32>,

    /// Trim threshold below peak in dB.
    #[arg(long, value_parser = parse_positive_db)]
    pub top_db: Option<f32>,

    /// Path to a MIDI-derived notes JSON file (default: `<stem>.notes.json`
    /// next to the input).
    #[arg(long)]
    pub notes: Option<PathBuf>,

    /// Reprocess files even if output exists.
    #[arg(long)]
    pub force: bool,

    /// Stop on first error.
    #[arg(long)]
    pub fail_fast: bool,

    /// Suppress progress output.
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable the progress bar.
    #[arg(long)]
    pub no_progress: bool,

    /// Increase verbosity (-v: debug, -vv: trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Arguments for the split subcommand.
#[derive(Debug, Args)]
pub struct SplitArgs {
    /// Recordings (or directories of recordings) to split.
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Output directory for segments (default: same as input).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Minimum duration of a valid region in seconds.
    #[arg(long, value_parser = parse_duration)]
    pub min_region_dur: Option<f64>,

    /// Maximum duration of a region in seconds.
    #[arg(long, value_parser = parse_duration)]
    pub max_region_dur: Option<f64>,

    /// Maximum tolerated continuous silence within a region in seconds.
    #[arg(long, value_parser = parse_duration)]
    pub max_silence: Option<f64>,

    /// Detection threshold in dBFS for the energy detector.
    #[arg(long, allow_hyphen_values = true)]
    pub energy_threshold: Option<f32>,

    /// Ignore notes below this MIDI velocity (0-127).
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=127))]
    pub min_note_velocity: Option<u8>,

    /// Path to a MIDI-derived notes JSON file (default: `<stem>.notes.json`
    /// next to the input).
    #[arg(long)]
    pub notes: Option<PathBuf>,

    /// Path to a metronome clicks JSON file (default: `<stem>.clicks.json`
    /// next to the input).
    #[arg(long)]
    pub clicks: Option<PathBuf>,

    /// Stop on first error.
    #[arg(long)]
    pub fail_fast: bool,
}

/// Arguments for the summary subcommand.
#[derive(Debug, Args)]
pub struct SummaryArgs {
    /// Directory of takes to summarize.
    #[arg(default_value = ".")]
    pub dir: PathBuf,
}

/// Parse and validate a non-negative duration in seconds.
fn parse_duration(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;

    if !value.is_finite() || value < 0.0 {
        return Err(format!("duration must be non-negative, got {value}"));
    }

    Ok(value)
}

/// Parse and validate a positive dB value.
fn parse_positive_db(s: &str) -> Result<f32, String> {
    let value: f32 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;

    if !value.is_finite() || value <= 0.0 {
        return Err(format!("dB threshold must be positive, got {value}"));
    }

    Ok(value)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration_valid() {
        assert_eq!(parse_duration("0").ok(), Some(0.0));
        assert_eq!(parse_duration("2.5").ok(), Some(2.5));
    }

    #[test]
    fn test_parse_duration_invalid() {
        assert!(parse_duration("-1.0").is_err());
        assert!(parse_duration("abc").is_err());
        assert!(parse_duration("inf").is_err());
    }

    #[test]
    fn test_parse_positive_db() {
        assert_eq!(parse_positive_db("60").ok(), Some(60.0));
        assert!(parse_positive_db("0").is_err());
        assert!(parse_positive_db("-10").is_err());
    }

    #[test]
    fn test_cli_parse_simple() {
        let cli = Cli::try_parse_from(["takesplit", "take.webm"]).unwrap();
        assert_eq!(cli.inputs.len(), 1);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_parse_with_options() {
        let cli = Cli::try_parse_from([
            "takesplit",
            "take.webm",
            "-o",
            "prep",
            "--sample-rate",
            "22050",
            "-q",
        ])
        .unwrap();
        assert_eq!(cli.preprocess.output_dir, Some(PathBuf::from("prep")));
        assert_eq!(cli.preprocess.sample_rate, Some(22_050));
        assert!(cli.preprocess.quiet);
    }

    #[test]
    fn test_cli_parse_config_subcommand() {
        let cli = Cli::try_parse_from(["takesplit", "config", "show"]);
        assert!(cli.is_ok());
    }

    #[test]
    fn test_cli_parse_split_subcommand() {
        let cli = Cli::try_parse_from([
            "takesplit",
            "split",
            "take.wav",
            "--max-silence",
            "1.5",
            "--energy-threshold",
            "-40",
            "--min-note-velocity",
            "48",
        ])
        .unwrap();
        let Some(Command::Split(args)) = cli.command else {
            panic!("expected split subcommand");
        };
        assert_eq!(args.max_silence, Some(1.5));
        assert_eq!(args.energy_threshold, Some(-40.0));
        assert_eq!(args.min_note_velocity, Some(48));
    }

    #[test]
    fn test_cli_parse_split_requires_inputs() {
        let cli = Cli::try_parse_from(["takesplit", "split"]);
        assert!(cli.is_err());
    }

    #[test]
    fn test_cli_parse_split_velocity_out_of_range() {
        let cli = Cli::try_parse_from([
            "takesplit",
            "split",
            "take.wav",
            "--min-note-velocity",
            "200",
        ]);
        assert!(cli.is_err());
    }

    #[test]
    fn test_cli_parse_summary_default_dir() {
        let cli = Cli::try_parse_from(["takesplit", "summary"]).unwrap();
        let Some(Command::Summary(args)) = cli.command else {
            panic!("expected summary subcommand");
        };
        assert_eq!(args.dir, PathBuf::from("."));
    }
}
