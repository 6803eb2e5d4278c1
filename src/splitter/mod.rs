//! Splitting recordings into per-region WAV segments.

pub mod command;
mod writer;

pub use writer::SegmentWriter;
