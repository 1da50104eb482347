//! rejpeg core library
//!
//! Reconstructs JPEG files whose container header was destroyed (encrypted
//! or truncated) but whose compressed scan data survives at a known byte
//! offset. Two stages: splice a header taken from a trusted reference shot
//! onto the surviving payload, then measure the residual MCU alignment
//! drift in the decoded pixels and hand the correction value to an external
//! realignment utility.

pub mod analysis;
pub mod config;
pub mod decoders;
pub mod enhance;
pub mod error;
pub mod exporters;
pub mod models;
pub mod repair;
pub mod splice;
pub mod tool;

// Re-export commonly used types
pub use config::RepairConfig;
pub use error::{RepairError, Result};
pub use models::PixelBuffer;
pub use repair::{AssetReport, Outcome, Stage};
pub use tool::{JpegRepair, RealignTool, ToolOutput};
