//! Cosmetic pass over repaired files: auto contrast, sharpen, saturate.

use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use rejpeg_core::enhance::{auto_color, EnhanceOptions};
use rejpeg_core::{decoders, exporters};

use rejpeg_cli::processing::expand_jpeg_inputs;

pub fn cmd_color(
    folder: PathBuf,
    saturation: f32,
    cutoff: f32,
    quality: u8,
    silent: bool,
) -> Result<(), String> {
    let inputs = expand_jpeg_inputs(&folder)?;
    if inputs.is_empty() {
        return Err(format!("No JPEG files found in {}", folder.display()));
    }

    let options = EnhanceOptions {
        saturation,
        contrast_cutoff: cutoff,
        ..EnhanceOptions::default()
    };
    auto_color_files(&inputs, &options, quality, silent)?;
    if !silent {
        println!("Auto color process complete.");
    }
    Ok(())
}

/// Enhance each file in place. Per-file failures are reported and skipped;
/// only an empty input set is an error for the caller.
pub fn auto_color_files(
    files: &[PathBuf],
    options: &EnhanceOptions,
    quality: u8,
    silent: bool,
) -> Result<(), String> {
    let failures = AtomicUsize::new(0);
    files.par_iter().for_each(|path| {
        if let Err(e) = enhance_one(path, options, quality) {
            failures.fetch_add(1, Ordering::Relaxed);
            eprintln!("  {}: {}", path.display(), e);
        } else if !silent {
            println!("  Auto color applied to {}", path.display());
        }
    });

    let failed = failures.load(Ordering::Relaxed);
    if failed > 0 && !silent {
        eprintln!("Auto color failed for {} of {} files", failed, files.len());
    }
    Ok(())
}

fn enhance_one(path: &Path, options: &EnhanceOptions, quality: u8) -> Result<(), String> {
    let buffer = decoders::decode_jpeg_file(path).map_err(|e| e.to_string())?;
    let enhanced = auto_color(&buffer, options);
    exporters::export_jpeg(&enhanced, path, quality).map_err(|e| e.to_string())
}
