//! Takesplit - preprocessing and silence-splitting for music practice
//! recordings.
//!
//! Converts raw recordings to normalized WAV, serializes MIDI-derived
//! transcriptions to JSON and splits recordings into per-region segments.

#![warn(missing_docs)]

pub mod audio;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod notes;
pub mod output;
pub mod pipeline;
pub mod regions;
pub mod splitter;
pub mod summary;

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info, warn};

use cli::{Cli, Command, PreprocessArgs};
use config::Config;
use pipeline::{PreprocessOptions, ProcessCheck, collect_input_files, output_dir_for};

pub use error::{Error, Result};

/// Main entry point for the takesplit CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.preprocess.verbose, cli.preprocess.quiet);

    let config = config::load_default_config()?;

    if let Some(command) = cli.command {
        return handle_command(command, &config);
    }

    if cli.inputs.is_empty() {
        return Err(Error::NoValidAudioFiles);
    }

    preprocess_files(&cli.inputs, &cli.preprocess, &config)
}

/// Preprocess all input files with the given options.
fn preprocess_files(inputs: &[PathBuf], args: &PreprocessArgs, config: &Config) -> Result<()> {
    use crate::output::progress;
    use std::time::Instant;

    let total_start = Instant::now();

    let files = collect_input_files(inputs)?;
    if files.is_empty() {
        return Err(Error::NoValidAudioFiles);
    }

    info!("Found {} audio file(s) to process", files.len());

    let output_dir = args
        .output_dir
        .clone()
        .or_else(|| config.defaults.output_dir.clone());
    let opts = PreprocessOptions {
        sample_rate: args.sample_rate.unwrap_or(config.defaults.sample_rate),
        trim_top_db: args.top_db.unwrap_or(config.defaults.trim_top_db),
        notes: args.notes.clone(),
    };

    let progress_enabled = !args.quiet && !args.no_progress;
    let file_progress = progress::create_file_progress(files.len(), progress_enabled);

    let mut processed = 0usize;
    let mut skipped = 0usize;
    let mut errors = 0usize;

    for file in &files {
        let file_output_dir = output_dir_for(file, output_dir.as_deref());

        if let ProcessCheck::SkipExists = pipeline::should_process(file, &file_output_dir, args.force)
        {
            info!("Skipping (output exists): {}", file.display());
            skipped += 1;
            progress::inc_progress(file_progress.as_ref());
            continue;
        }

        match pipeline::process_file(file, &file_output_dir, &opts) {
            Ok(result) => {
                processed += 1;
                info!(
                    "Done: {} ({:.1}s of audio)",
                    result.wav_path.display(),
                    result.audio_duration_secs
                );
            }
            Err(e) => {
                error!("Failed to process {}: {}", file.display(), e);
                errors += 1;
                if args.fail_fast {
                    progress::finish_progress(file_progress, "Failed");
                    return Err(e);
                }
            }
        }
        progress::inc_progress(file_progress.as_ref());
    }

    progress::finish_progress(file_progress, "Complete");

    info!(
        "Complete: {} processed, {} skipped, {} errors in {:.2}s",
        processed,
        skipped,
        errors,
        total_start.elapsed().as_secs_f64()
    );

    if errors > 0 && !args.fail_fast {
        warn!("{} file(s) had errors", errors);
    }

    Ok(())
}

fn init_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter_str = if quiet {
        "warn"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_str));

    fmt().with_env_filter(filter).init();
}

fn handle_command(command: Command, config: &Config) -> Result<()> {
    match command {
        Command::Config { action } => handle_config_command(action),
        Command::Split(args) => splitter::command::execute(&args, config),
        Command::Summary(args) => summary::execute(&args),
    }
}

#[allow(clippy::print_stdout)]
fn handle_config_command(action: cli::ConfigAction) -> Result<()> {
    use cli::ConfigAction;

    match action {
        ConfigAction::Init => {
            let path = config::config_file_path()?;
            if path.exists() {
                println!("Configuration file already exists: {}", path.display());
            } else {
                let saved_path = config::save_default_config(&Config::default())?;
                println!("Created configuration file: {}", saved_path.display());
            }
            Ok(())
        }
        ConfigAction::Show => {
            let config = config::load_default_config()?;
            println!("{config:#?}");
            Ok(())
        }
        ConfigAction::Path => {
            let path = config::config_file_path()?;
            println!("{}", path.display());
            Ok(())
        }
    }
}
