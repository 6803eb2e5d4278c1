//! Output helpers.

pub mod progress;
