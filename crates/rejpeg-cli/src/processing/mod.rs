//! Input discovery and path utilities.

mod input;

pub use input::{
    default_output_dir, expand_corrupted_inputs, expand_jpeg_inputs, is_corrupted_name,
    is_jpeg_name,
};
