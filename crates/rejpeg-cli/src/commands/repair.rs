//! All-in-one repair: splice every corrupted file, then crop, measure, and
//! realign each spliced result.

use rayon::prelude::*;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use rejpeg_core::repair::repair_asset;
use rejpeg_core::{JpegRepair, RepairConfig};

use rejpeg_cli::processing::{default_output_dir, expand_corrupted_inputs};
use rejpeg_cli::report::{print_report, print_summary};

use super::{configure_threads, ConfigOverrides};

#[allow(clippy::too_many_arguments)]
pub fn cmd_repair(
    folder: PathBuf,
    reference: PathBuf,
    out: Option<PathBuf>,
    config_path: Option<PathBuf>,
    overrides: ConfigOverrides,
    threads: Option<usize>,
    auto_color: bool,
    json: bool,
    silent: bool,
    verbose: bool,
) -> Result<(), String> {
    let batch_start = Instant::now();
    rejpeg_core::config::set_verbose(verbose);

    let config = super::load_config(config_path.as_deref(), &folder, &overrides, silent)?;

    let reference_bytes = std::fs::read(&reference)
        .map_err(|e| format!("Failed to read reference {}: {}", reference.display(), e))?;
    // A reference without a scan marker can never produce a header, so the
    // whole batch would fail asset by asset. Check once up front.
    rejpeg_core::splice::scan_header_prefix(&reference_bytes)
        .map_err(|e| format!("{}: {}", reference.display(), e))?;

    let inputs = expand_corrupted_inputs(&folder)?;
    if inputs.is_empty() {
        return Err(format!(
            "No corrupted JPEG files found in {} (expected .jpg/.jpeg or jpg.*/jpeg.* names)",
            folder.display()
        ));
    }
    if !silent {
        println!("Found {} corrupted files to repair", inputs.len());
    }

    configure_threads(threads, silent)?;
    let out_dir = out.unwrap_or_else(|| default_output_dir(&folder));
    let tool = JpegRepair::new(
        config.external_utility.clone(),
        Duration::from_secs(config.tool_timeout_secs),
    );

    let reports: Vec<_> = inputs
        .par_iter()
        .map(|path| {
            let report = repair_asset(&reference_bytes, path, &out_dir, &config, &tool);
            if !silent && !json {
                print_report(&report);
            }
            report
        })
        .collect();

    if auto_color {
        run_auto_color(&reports, &config, silent)?;
    }

    if json {
        let rendered = serde_json::to_string_pretty(&reports)
            .map_err(|e| format!("Failed to serialize reports: {}", e))?;
        println!("{}", rendered);
    } else if !silent {
        print_summary(&reports, batch_start.elapsed().as_secs_f64());
    }
    Ok(())
}

fn run_auto_color(
    reports: &[rejpeg_core::AssetReport],
    config: &RepairConfig,
    silent: bool,
) -> Result<(), String> {
    let outputs: Vec<PathBuf> = reports
        .iter()
        .filter_map(|r| r.output_path.clone())
        .collect();
    if outputs.is_empty() {
        return Ok(());
    }
    if !silent {
        println!("Applying auto color to {} repaired files", outputs.len());
    }
    super::auto_color_files(
        &outputs,
        &rejpeg_core::enhance::EnhanceOptions::default(),
        config.jpeg_quality,
        silent,
    )
}
