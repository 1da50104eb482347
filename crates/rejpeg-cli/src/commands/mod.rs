//! Command implementations for the rejpeg CLI.

mod align;
mod color;
mod repair;
mod splice;

pub use align::cmd_align;
pub use color::{auto_color_files, cmd_color};
pub use repair::cmd_repair;
pub use splice::cmd_splice;

use rejpeg_core::RepairConfig;
use std::path::{Path, PathBuf};

/// Tunables that can be overridden from the command line, on top of the
/// config file (or defaults).
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub payload_start: Option<usize>,
    pub payload_trim: Option<usize>,
    pub constant_k: Option<u32>,
    pub threshold: Option<f32>,
    pub tool: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
}

/// Load configuration: explicit file beats discovery next to the inputs,
/// and command-line flags beat both.
pub(crate) fn load_config(
    explicit: Option<&Path>,
    input_dir: &Path,
    overrides: &ConfigOverrides,
    silent: bool,
) -> Result<RepairConfig, String> {
    let mut config = match explicit {
        Some(path) => {
            RepairConfig::load(path).map_err(|e| format!("Failed to load config: {}", e))?
        }
        None => {
            let (config, source) = RepairConfig::discover(input_dir)
                .map_err(|e| format!("Failed to load config: {}", e))?;
            if let Some(source) = source {
                if !silent {
                    println!("Using config from {}", source.display());
                }
            }
            config
        }
    };

    if let Some(v) = overrides.payload_start {
        config.payload_start_offset = v;
    }
    if let Some(v) = overrides.payload_trim {
        config.payload_end_trim = v;
    }
    if let Some(v) = overrides.constant_k {
        config.correction_constant = v;
    }
    if let Some(v) = overrides.threshold {
        config.good_block_threshold = v;
    }
    if let Some(v) = &overrides.tool {
        config.external_utility = v.clone();
    }
    if let Some(v) = overrides.timeout_secs {
        config.tool_timeout_secs = v;
    }
    Ok(config)
}

/// Configure the global rayon pool when a thread count was requested.
pub(crate) fn configure_threads(threads: Option<usize>, silent: bool) -> Result<(), String> {
    if let Some(num_threads) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .map_err(|e| format!("Failed to configure thread pool: {}", e))?;
        if !silent {
            println!("Using {} threads for parallel processing", num_threads);
        }
    }
    Ok(())
}
