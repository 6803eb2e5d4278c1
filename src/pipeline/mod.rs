//! Batch preprocessing pipeline.

mod coordinator;
mod processor;

pub use coordinator::{
    ProcessCheck, collect_input_files, is_audio_file, output_dir_for, output_wav_path,
    should_process,
};
pub use processor::{PreprocessOptions, ProcessResult, process_file};
