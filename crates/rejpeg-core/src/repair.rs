//! Per-asset repair orchestration.
//!
//! One asset walks `Loaded → Spliced → Decoded → Cropped → Analyzed` and
//! ends in `Delegated`, `Skipped`, or `Failed`. The orchestrator owns all
//! persistence; the splice and analysis stages stay pure. Results come back
//! as structured reports so the caller decides how to render or aggregate
//! them.

use crate::analysis;
use crate::config::RepairConfig;
use crate::decoders;
use crate::error::{RepairError, Result};
use crate::exporters;
use crate::splice;
use crate::tool::RealignTool;
use crate::verbose_println;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Pipeline stage an asset reached (or failed in).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Loaded,
    Spliced,
    Decoded,
    Cropped,
    Analyzed,
    Delegated,
}

/// Terminal state of one asset.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum Outcome {
    /// Handed to the realignment tool, which produced the final output.
    Delegated,
    /// No residual misalignment; the cropped image is the final output.
    Skipped,
    /// Stopped at `stage`; intermediates are retained for inspection.
    Failed { stage: Stage, error: String },
}

/// Structured result for one asset.
#[derive(Debug, Clone, Serialize)]
pub struct AssetReport {
    /// The corrupted (or already-spliced) input this report describes.
    pub asset: PathBuf,
    pub outcome: Outcome,
    /// Residual filler blocks on the last scanline.
    pub good_block_count: usize,
    /// Correction value passed to the realignment tool.
    pub insert_value: u32,
    pub spliced_path: Option<PathBuf>,
    pub cropped_path: Option<PathBuf>,
    /// Final repaired file, when one was produced.
    pub output_path: Option<PathBuf>,
    pub tool_stdout: Option<String>,
    pub tool_stderr: Option<String>,
}

impl AssetReport {
    fn new(asset: &Path) -> Self {
        Self {
            asset: asset.to_path_buf(),
            outcome: Outcome::Skipped,
            good_block_count: 0,
            insert_value: 0,
            spliced_path: None,
            cropped_path: None,
            output_path: None,
            tool_stdout: None,
            tool_stderr: None,
        }
    }

    fn failed(mut self, stage: Stage, error: &RepairError) -> Self {
        self.outcome = Outcome::Failed {
            stage,
            error: error.to_string(),
        };
        self
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.outcome, Outcome::Failed { .. })
    }
}

/// Output file name for an asset: strip the ransomware `jpg.`/`jpeg.`
/// prefix if present, drop the extension, normalize to `.JPG`.
pub fn repaired_file_name(asset: &Path) -> String {
    let name = asset
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "asset".to_string());
    let trimmed = strip_prefix_ci(&name, "jpeg.")
        .or_else(|| strip_prefix_ci(&name, "jpg."))
        .unwrap_or(&name);
    let stem = match trimmed.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => trimmed,
    };
    format!("{}.JPG", stem)
}

fn strip_prefix_ci<'a>(name: &'a str, prefix: &str) -> Option<&'a str> {
    let head = name.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        name.get(prefix.len()..)
    } else {
        None
    }
}

/// Create the output directory, tolerating concurrent creation by sibling
/// workers.
pub fn ensure_output_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| RepairError::io(dir, e))
}

/// Splice the reference header onto one corrupted file and persist the
/// provisional result in `out_dir`. Returns the spliced file's path.
pub fn splice_file(
    reference: &[u8],
    corrupted_path: &Path,
    out_dir: &Path,
    config: &RepairConfig,
) -> Result<PathBuf> {
    let corrupted = fs::read(corrupted_path).map_err(|e| RepairError::io(corrupted_path, e))?;
    let merged = splice::splice(
        reference,
        &corrupted,
        config.payload_start_offset,
        config.payload_end_trim,
    )?;

    ensure_output_dir(out_dir)?;
    let out_path = out_dir.join(repaired_file_name(corrupted_path));
    fs::write(&out_path, &merged).map_err(|e| RepairError::io(&out_path, e))?;
    verbose_println!(
        "  spliced {} -> {} ({} bytes)",
        corrupted_path.display(),
        out_path.display(),
        merged.len()
    );
    Ok(out_path)
}

/// Crop filler rows off a spliced JPEG, measure residual misalignment, and
/// either keep the cropped image (no drift) or delegate to the realignment
/// tool.
pub fn align_asset(
    input: &Path,
    out_dir: &Path,
    config: &RepairConfig,
    tool: &dyn RealignTool,
) -> AssetReport {
    let mut report = AssetReport::new(input);

    let mut buffer = match decoders::decode_jpeg_file(input) {
        Ok(buffer) => buffer,
        Err(e) => return report.failed(Stage::Decoded, &e),
    };

    let cropped_height = analysis::crop_filler_rows(&buffer, config.block_size, config.sentinel_value);
    buffer.crop_to_height(cropped_height);
    verbose_println!(
        "  {}: cropped to {}x{}",
        input.display(),
        buffer.width,
        buffer.height
    );

    report.good_block_count = analysis::count_residual_blocks(
        &buffer,
        config.block_size,
        config.sentinel_value,
        config.good_block_threshold,
    );
    report.insert_value =
        analysis::insert_value(report.good_block_count, config.correction_constant);

    if let Err(e) = ensure_output_dir(out_dir) {
        return report.failed(Stage::Analyzed, &e);
    }
    let cropped_path = out_dir.join(repaired_file_name(input));

    if report.good_block_count == 0 {
        // No correction needed. The cropped image is the final output,
        // unless cropping consumed the whole buffer.
        if buffer.height == 0 {
            report.outcome = Outcome::Skipped;
            return report;
        }
        if let Err(e) = exporters::export_jpeg(&buffer, &cropped_path, config.jpeg_quality) {
            return report.failed(Stage::Analyzed, &e);
        }
        report.cropped_path = Some(cropped_path.clone());
        report.output_path = Some(cropped_path);
        report.outcome = Outcome::Skipped;
        return report;
    }

    if let Err(e) = exporters::export_jpeg(&buffer, &cropped_path, config.jpeg_quality) {
        return report.failed(Stage::Analyzed, &e);
    }
    report.cropped_path = Some(cropped_path.clone());

    let final_name = format!(
        "{}_repaired.JPG",
        cropped_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "asset".to_string())
    );
    let final_path = out_dir.join(final_name);

    match tool.realign(&cropped_path, &final_path, report.insert_value) {
        Ok(output) => {
            report.tool_stdout = Some(output.stdout.clone());
            report.tool_stderr = Some(output.stderr.clone());
            if output.success() {
                report.output_path = Some(final_path);
                report.outcome = Outcome::Delegated;
            } else {
                let e = RepairError::ExternalTool {
                    status: output
                        .status_code
                        .map(|c| format!("exit code {}", c))
                        .unwrap_or_else(|| "killed by signal".to_string()),
                    stderr: output.stderr.trim().to_string(),
                };
                report = report.failed(Stage::Delegated, &e);
            }
        }
        Err(e) => report = report.failed(Stage::Delegated, &e),
    }
    report
}

/// Full pipeline for one corrupted asset: splice, then align the spliced
/// file in place.
pub fn repair_asset(
    reference: &[u8],
    corrupted_path: &Path,
    out_dir: &Path,
    config: &RepairConfig,
    tool: &dyn RealignTool,
) -> AssetReport {
    let spliced_path = match splice_file(reference, corrupted_path, out_dir, config) {
        Ok(path) => path,
        Err(e) => {
            let stage = match e {
                RepairError::Io { .. } => Stage::Loaded,
                _ => Stage::Spliced,
            };
            return AssetReport::new(corrupted_path).failed(stage, &e);
        }
    };

    let mut report = align_asset(&spliced_path, out_dir, config, tool);
    report.asset = corrupted_path.to_path_buf();
    report.spliced_path = Some(spliced_path);
    report
}
