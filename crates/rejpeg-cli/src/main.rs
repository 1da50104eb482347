use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

use commands::ConfigOverrides;

#[derive(Parser)]
#[command(name = "rejpeg")]
#[command(version, about = "Repair JPEG files with destroyed headers", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Splice, crop, detect alignment drift, and realign in one pass
    Repair {
        /// Directory containing the corrupted JPEG files
        #[arg(value_name = "DIR")]
        folder: PathBuf,

        /// Known-good JPEG from the same camera/encoder settings
        #[arg(short, long, value_name = "FILE")]
        reference: PathBuf,

        /// Output directory (default: <DIR>/Repaired)
        #[arg(short, long, value_name = "DIR")]
        out: Option<PathBuf>,

        /// Config file (default: repair.yml next to the inputs)
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// First payload byte taken from each corrupted file
        #[arg(long, value_name = "BYTES")]
        payload_start: Option<usize>,

        /// Bytes dropped from each corrupted file's tail
        #[arg(long, value_name = "BYTES")]
        payload_trim: Option<usize>,

        /// Constant subtracted from the residual block count
        #[arg(short = 'k', long, value_name = "N")]
        constant_k: Option<u32>,

        /// Mean-difference threshold for counting a block as filler
        #[arg(long, value_name = "FLOAT")]
        threshold: Option<f32>,

        /// Path to the realignment utility
        #[arg(long, value_name = "PATH")]
        tool: Option<PathBuf>,

        /// Timeout for one utility invocation, in seconds
        #[arg(long, value_name = "SECS")]
        timeout: Option<u64>,

        /// Number of parallel threads
        #[arg(short = 'j', long, value_name = "N")]
        threads: Option<usize>,

        /// Apply the auto color pass to repaired files
        #[arg(long)]
        auto_color: bool,

        /// Print reports as JSON
        #[arg(long)]
        json: bool,

        /// Suppress progress output
        #[arg(short, long)]
        silent: bool,

        /// Print per-stage debug output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Splice the reference header onto corrupted files, nothing more
    Splice {
        /// Directory containing the corrupted JPEG files
        #[arg(value_name = "DIR")]
        folder: PathBuf,

        /// Known-good JPEG from the same camera/encoder settings
        #[arg(short, long, value_name = "FILE")]
        reference: PathBuf,

        /// Output directory (default: <DIR>/Repaired)
        #[arg(short, long, value_name = "DIR")]
        out: Option<PathBuf>,

        /// Config file (default: repair.yml next to the inputs)
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// First payload byte taken from each corrupted file
        #[arg(long, value_name = "BYTES")]
        payload_start: Option<usize>,

        /// Bytes dropped from each corrupted file's tail
        #[arg(long, value_name = "BYTES")]
        payload_trim: Option<usize>,

        /// Suppress progress output
        #[arg(short, long)]
        silent: bool,

        /// Print per-stage debug output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Crop filler rows and realign already-spliced JPEGs
    Align {
        /// Directory containing spliced JPEG files
        #[arg(value_name = "DIR")]
        folder: PathBuf,

        /// Output directory (default: <DIR>/Repaired)
        #[arg(short, long, value_name = "DIR")]
        out: Option<PathBuf>,

        /// Config file (default: repair.yml next to the inputs)
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Constant subtracted from the residual block count
        #[arg(short = 'k', long, value_name = "N")]
        constant_k: Option<u32>,

        /// Mean-difference threshold for counting a block as filler
        #[arg(long, value_name = "FLOAT")]
        threshold: Option<f32>,

        /// Path to the realignment utility
        #[arg(long, value_name = "PATH")]
        tool: Option<PathBuf>,

        /// Timeout for one utility invocation, in seconds
        #[arg(long, value_name = "SECS")]
        timeout: Option<u64>,

        /// Number of parallel threads
        #[arg(short = 'j', long, value_name = "N")]
        threads: Option<usize>,

        /// Print reports as JSON
        #[arg(long)]
        json: bool,

        /// Suppress progress output
        #[arg(short, long)]
        silent: bool,

        /// Print per-stage debug output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Auto contrast / sharpen / saturate repaired JPEGs in place
    Color {
        /// Directory containing repaired JPEG files
        #[arg(value_name = "DIR")]
        folder: PathBuf,

        /// Saturation multiplier
        #[arg(long, value_name = "FLOAT", default_value = "3.0")]
        saturation: f32,

        /// Histogram cutoff fraction for auto contrast
        #[arg(long, value_name = "FLOAT", default_value = "0.01")]
        cutoff: f32,

        /// JPEG quality for re-encoding
        #[arg(short, long, value_name = "N", default_value = "95")]
        quality: u8,

        /// Suppress progress output
        #[arg(short, long)]
        silent: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Repair {
            folder,
            reference,
            out,
            config,
            payload_start,
            payload_trim,
            constant_k,
            threshold,
            tool,
            timeout,
            threads,
            auto_color,
            json,
            silent,
            verbose,
        } => commands::cmd_repair(
            folder,
            reference,
            out,
            config,
            ConfigOverrides {
                payload_start,
                payload_trim,
                constant_k,
                threshold,
                tool,
                timeout_secs: timeout,
            },
            threads,
            auto_color,
            json,
            silent,
            verbose,
        ),
        Commands::Splice {
            folder,
            reference,
            out,
            config,
            payload_start,
            payload_trim,
            silent,
            verbose,
        } => commands::cmd_splice(
            folder,
            reference,
            out,
            config,
            ConfigOverrides {
                payload_start,
                payload_trim,
                ..ConfigOverrides::default()
            },
            silent,
            verbose,
        ),
        Commands::Align {
            folder,
            out,
            config,
            constant_k,
            threshold,
            tool,
            timeout,
            threads,
            json,
            silent,
            verbose,
        } => commands::cmd_align(
            folder,
            out,
            config,
            ConfigOverrides {
                constant_k,
                threshold,
                tool,
                timeout_secs: timeout,
                ..ConfigOverrides::default()
            },
            threads,
            json,
            silent,
            verbose,
        ),
        Commands::Color {
            folder,
            saturation,
            cutoff,
            quality,
            silent,
        } => commands::cmd_color(folder, saturation, cutoff, quality, silent),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
