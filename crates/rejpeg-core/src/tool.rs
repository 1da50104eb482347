//! External realignment utility.
//!
//! The actual MCU bitstream insertion is done by a separate executable
//! (`jpegrepair <in> <out> insert <n>`). The core only decides what to feed
//! it, so the boundary is a narrow trait that tests can mock without
//! touching the detection logic.

use crate::error::{RepairError, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::Duration;
use wait_timeout::ChildExt;

/// Captured output of one realignment invocation.
#[derive(Debug, Clone, Default)]
pub struct ToolOutput {
    /// Exit code, if the process terminated normally.
    pub status_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    /// The original tool signals trouble through stderr even when it exits
    /// zero, so both channels count.
    pub fn success(&self) -> bool {
        self.status_code == Some(0) && self.stderr.trim().is_empty()
    }
}

/// Capability to shift a misaligned JPEG by a number of MCUs.
pub trait RealignTool {
    /// Produce a realigned copy of `input` at `output`, shifting the scan
    /// by `insert` MCU positions. Completion with a non-zero status is an
    /// `Ok` carrying the captured output; only failure to run the tool at
    /// all (spawn error, timeout) is an `Err`.
    fn realign(&self, input: &Path, output: &Path, insert: u32) -> Result<ToolOutput>;
}

/// Process-backed implementation invoking the configured executable.
#[derive(Debug, Clone)]
pub struct JpegRepair {
    pub program: PathBuf,
    pub timeout: Duration,
}

impl JpegRepair {
    pub fn new(program: PathBuf, timeout: Duration) -> Self {
        Self { program, timeout }
    }
}

impl RealignTool for JpegRepair {
    fn realign(&self, input: &Path, output: &Path, insert: u32) -> Result<ToolOutput> {
        let mut child = Command::new(&self.program)
            .arg(input)
            .arg(output)
            .arg("insert")
            .arg(insert.to_string())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| RepairError::io(&self.program, e))?;

        match child
            .wait_timeout(self.timeout)
            .map_err(|e| RepairError::io(&self.program, e))?
        {
            Some(_) => {
                let captured = child
                    .wait_with_output()
                    .map_err(|e| RepairError::io(&self.program, e))?;
                Ok(ToolOutput {
                    status_code: captured.status.code(),
                    stdout: String::from_utf8_lossy(&captured.stdout).into_owned(),
                    stderr: String::from_utf8_lossy(&captured.stderr).into_owned(),
                })
            }
            None => {
                // Kill and reap; partial side effects are unknown, so the
                // caller must not retry automatically.
                let _ = child.kill();
                let _ = child.wait();
                Err(RepairError::ToolTimeout {
                    seconds: self.timeout.as_secs(),
                })
            }
        }
    }
}
