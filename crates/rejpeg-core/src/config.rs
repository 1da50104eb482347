//! Repair configuration.
//!
//! The byte offsets and detection thresholds are properties of one specific
//! corruption profile, not of the algorithm, so all of them live here rather
//! than as constants in the pipeline code. Values can be loaded from a
//! `repair.yml` next to the input files or passed explicitly.

use crate::error::{RepairError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

// Global verbose flag for controlling debug output
static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Set the global verbose flag. When true, debug messages will be printed.
pub fn set_verbose(verbose: bool) {
    VERBOSE.store(verbose, Ordering::SeqCst);
}

/// Check if verbose mode is enabled.
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

/// Print a message to stderr only if verbose mode is enabled.
#[macro_export]
macro_rules! verbose_println {
    ($($arg:tt)*) => {
        if $crate::config::is_verbose() {
            eprintln!($($arg)*);
        }
    };
}

/// Candidate config file names searched for next to the input files.
pub const CONFIG_FILENAMES: &[&str] = &["repair.yml", "repair.yaml"];

/// Tunables for one corruption profile.
///
/// Defaults match the profile the tool was originally written against
/// (full-size images from one camera body, encrypted in place with a
/// 153 KiB header overwrite and a 334-byte trailer).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RepairConfig {
    /// First payload byte taken from the corrupted file.
    pub payload_start_offset: usize,

    /// Bytes dropped from the tail of the corrupted file.
    pub payload_end_trim: usize,

    /// MCU block edge in pixels. Must match the codec's MCU granularity.
    pub block_size: usize,

    /// Sample value the decoder emits for rows it could not reconstruct.
    pub sentinel_value: u8,

    /// A block whose mean absolute distance from the sentinel fill is below
    /// this counts as residual filler rather than recovered content.
    pub good_block_threshold: f32,

    /// Subtracted from the residual block count to get the insert value.
    pub correction_constant: u32,

    /// Realignment utility invoked as `<utility> <in> <out> insert <n>`.
    pub external_utility: PathBuf,

    /// Timeout for one utility invocation, in seconds.
    pub tool_timeout_secs: u64,

    /// Quality used when re-encoding intermediate and final JPEGs.
    pub jpeg_quality: u8,
}

impl Default for RepairConfig {
    fn default() -> Self {
        Self {
            payload_start_offset: 153_605,
            payload_end_trim: 334,
            block_size: 8,
            sentinel_value: 128,
            good_block_threshold: 20.0,
            correction_constant: 22,
            external_utility: PathBuf::from("jpegrepair"),
            tool_timeout_secs: 60,
            jpeg_quality: 95,
        }
    }
}

impl RepairConfig {
    /// Load configuration from an explicit YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| RepairError::io(path, e))?;
        let config: RepairConfig = serde_yaml::from_str(&text)
            .map_err(|e| RepairError::Config(format!("{}: {}", path.display(), e)))?;
        Ok(config.sanitize())
    }

    /// Look for a config file in `dir`; fall back to defaults.
    ///
    /// Returns the config and the path it was loaded from, if any.
    pub fn discover(dir: &Path) -> Result<(Self, Option<PathBuf>)> {
        for name in CONFIG_FILENAMES {
            let candidate = dir.join(name);
            if candidate.is_file() {
                let config = Self::load(&candidate)?;
                return Ok((config, Some(candidate)));
            }
        }
        Ok((Self::default(), None))
    }

    /// Clamp out-of-range values instead of failing.
    fn sanitize(mut self) -> Self {
        if self.block_size == 0 {
            self.block_size = 8;
        }
        if self.good_block_threshold < 0.0 {
            self.good_block_threshold = 0.0;
        }
        self.jpeg_quality = self.jpeg_quality.clamp(1, 100);
        if self.tool_timeout_secs == 0 {
            self.tool_timeout_secs = 60;
        }
        self
    }
}
