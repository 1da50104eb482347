//! Header splicing only: produce provisional JPEGs without alignment
//! analysis. Useful when the realignment utility is not available yet.

use std::path::PathBuf;
use std::time::Instant;

use rejpeg_core::repair::splice_file;

use rejpeg_cli::processing::{default_output_dir, expand_corrupted_inputs};

use super::ConfigOverrides;

pub fn cmd_splice(
    folder: PathBuf,
    reference: PathBuf,
    out: Option<PathBuf>,
    config_path: Option<PathBuf>,
    overrides: ConfigOverrides,
    silent: bool,
    verbose: bool,
) -> Result<(), String> {
    let start = Instant::now();
    rejpeg_core::config::set_verbose(verbose);

    let config = super::load_config(config_path.as_deref(), &folder, &overrides, silent)?;

    let reference_bytes = std::fs::read(&reference)
        .map_err(|e| format!("Failed to read reference {}: {}", reference.display(), e))?;
    rejpeg_core::splice::scan_header_prefix(&reference_bytes)
        .map_err(|e| format!("{}: {}", reference.display(), e))?;

    let inputs = expand_corrupted_inputs(&folder)?;
    if inputs.is_empty() {
        return Err(format!(
            "No corrupted JPEG files found in {}",
            folder.display()
        ));
    }

    let out_dir = out.unwrap_or_else(|| default_output_dir(&folder));
    let mut failures = 0usize;
    for input in &inputs {
        match splice_file(&reference_bytes, input, &out_dir, &config) {
            Ok(path) => {
                if !silent {
                    println!("  Repaired file saved as {}", path.display());
                }
            }
            Err(e) => {
                failures += 1;
                eprintln!("  {}: {}", input.display(), e);
            }
        }
    }

    if !silent {
        println!(
            "Spliced {} of {} files in {:.1}s",
            inputs.len() - failures,
            inputs.len(),
            start.elapsed().as_secs_f64()
        );
    }
    Ok(())
}
