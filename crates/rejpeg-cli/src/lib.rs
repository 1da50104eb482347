//! Shared utilities for the rejpeg CLI.

pub mod processing;
pub mod report;

pub use processing::{
    default_output_dir, expand_corrupted_inputs, expand_jpeg_inputs, is_corrupted_name,
    is_jpeg_name,
};
pub use report::{print_report, print_summary};
