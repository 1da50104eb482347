//! Alignment pass on already-spliced JPEGs: crop filler rows, measure the
//! residual shift, and delegate to the realignment utility where needed.

use rayon::prelude::*;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use rejpeg_core::repair::align_asset;
use rejpeg_core::JpegRepair;

use rejpeg_cli::processing::{default_output_dir, expand_jpeg_inputs};
use rejpeg_cli::report::{print_report, print_summary};

use super::{configure_threads, ConfigOverrides};

#[allow(clippy::too_many_arguments)]
pub fn cmd_align(
    folder: PathBuf,
    out: Option<PathBuf>,
    config_path: Option<PathBuf>,
    overrides: ConfigOverrides,
    threads: Option<usize>,
    json: bool,
    silent: bool,
    verbose: bool,
) -> Result<(), String> {
    let batch_start = Instant::now();
    rejpeg_core::config::set_verbose(verbose);

    let config = super::load_config(config_path.as_deref(), &folder, &overrides, silent)?;

    let inputs = expand_jpeg_inputs(&folder)?;
    if inputs.is_empty() {
        return Err(format!("No JPEG files found in {}", folder.display()));
    }
    if !silent {
        println!("Found {} JPEG files to analyze", inputs.len());
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
            let report = align_asset(path, &out_dir, &config, &tool);
            if !silent && !json {
                print_report(&report);
            }
            report
        })
        .collect();

    if json {
        let rendered = serde_json::to_string_pretty(&reports)
            .map_err(|e| format!("Failed to serialize reports: {}", e))?;
        println!("{}", rendered);
    } else if !silent {
        print_summary(&reports, batch_start.elapsed().as_secs_f64());
    }
    Ok(())
}
