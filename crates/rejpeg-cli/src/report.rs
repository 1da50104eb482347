//! Console rendering of asset reports.

use rejpeg_core::{AssetReport, Outcome};

/// One line per asset, plus captured tool output when present.
pub fn print_report(report: &AssetReport) {
    let asset = report.asset.display();
    match &report.outcome {
        Outcome::Delegated => {
            println!(
                "  {}: {} residual blocks, insert {} -> {}",
                asset,
                report.good_block_count,
                report.insert_value,
                report
                    .output_path
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default()
            );
        }
        Outcome::Skipped => match &report.output_path {
            Some(path) => println!("  {}: no shift needed -> {}", asset, path.display()),
            None => println!("  {}: no decodable content", asset),
        },
        Outcome::Failed { stage, error } => {
            eprintln!("  {}: FAILED at {:?}: {}", asset, stage, error);
        }
    }
    if let Some(stdout) = &report.tool_stdout {
        if !stdout.trim().is_empty() {
            println!("    tool: {}", stdout.trim());
        }
    }
    if let Some(stderr) = &report.tool_stderr {
        if !stderr.trim().is_empty() {
            eprintln!("    tool stderr: {}", stderr.trim());
        }
    }
}

/// Batch totals.
pub fn print_summary(reports: &[AssetReport], elapsed_secs: f64) {
    let failed = reports.iter().filter(|r| r.is_failed()).count();
    let delegated = reports
        .iter()
        .filter(|r| matches!(r.outcome, Outcome::Delegated))
        .count();
    let skipped = reports
        .iter()
        .filter(|r| matches!(r.outcome, Outcome::Skipped))
        .count();
    println!(
        "Processed {} files in {:.1}s: {} realigned, {} already aligned, {} failed",
        reports.len(),
        elapsed_secs,
        delegated,
        skipped,
        failed
    );
}
