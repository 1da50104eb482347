//! Error taxonomy for the repair pipeline.
//!
//! Every failure carries enough context to report which asset and which
//! stage went wrong; per-asset failures never abort a batch.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors produced while repairing a single asset.
#[derive(Error, Debug)]
pub enum RepairError {
    /// The reference file contains no start-of-scan marker, so no valid
    /// header prefix can be extracted from it. Fatal for the whole batch:
    /// every asset would need the same header.
    #[error("reference contains no start-of-scan (FF DA) marker")]
    MarkerNotFound,

    /// The corrupted file is too short to hold any payload once the fixed
    /// head offset and tail trim are applied.
    #[error("corrupted payload too short: {len} bytes, need more than {required}")]
    InsufficientPayload { len: usize, required: usize },

    /// The spliced (or intermediate) bytes could not be decoded as a JPEG.
    #[error("JPEG decode failed: {detail}")]
    DecodeFailure { detail: String },

    /// Re-encoding a pixel buffer as JPEG failed.
    #[error("JPEG encode failed: {detail}")]
    EncodeFailure { detail: String },

    /// The external realignment utility finished but signalled failure via
    /// a non-zero exit status or stderr output.
    #[error("realignment tool failed ({status}): {stderr}")]
    ExternalTool { status: String, stderr: String },

    /// The external realignment utility exceeded the configured timeout.
    /// The run is not retried: the tool's partial side effects are unknown.
    #[error("realignment tool timed out after {seconds}s")]
    ToolTimeout { seconds: u64 },

    /// Configuration file could not be read or parsed.
    #[error("config error: {0}")]
    Config(String),

    /// Read/write error on an asset or output path.
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl RepairError {
    /// Attach a path to an I/O error.
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        RepairError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, RepairError>;
