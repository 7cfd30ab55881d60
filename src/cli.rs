// Command-line flag surface

use clap::Parser;

use crate::compress::CompressProfile;
use crate::scan::{ScanMode, ScanSource};

/// Scan from your scanner to a searchable, compressed PDF.
///
/// Runs scanimage, tesseract, and Ghostscript in sequence. Defaults come
/// from scandoc.yaml in the working directory when present; flags given
/// here override preset and settings values.
#[derive(Debug, Parser)]
#[command(name = "scandoc", version, about)]
pub struct CliArgs {
    /// Output file base name (final PDF is <OUTPUT>.pdf)
    #[arg(default_value = "scan")]
    pub output: String,

    /// Scan color mode
    #[arg(short, long, value_enum)]
    pub mode: Option<ScanMode>,

    /// Paper size of the scanned area, e.g. a4, a5, letter
    #[arg(short, long)]
    pub papersize: Option<String>,

    /// Scan resolution in DPI
    #[arg(short, long)]
    pub resolution: Option<u32>,

    /// Scan source, such as flatbed or adf
    #[arg(short, long, value_enum)]
    pub source: Option<ScanSource>,

    /// SANE device identifier
    #[arg(short, long)]
    pub device: Option<String>,

    /// OCR language set, plus-joined, e.g. "deu" or "deu+eng"
    #[arg(short, long)]
    pub language: Option<String>,

    /// PDF compression profile
    #[arg(short = 'g', long, value_enum)]
    pub profile: Option<CompressProfile>,

    /// Clean up intermediates: -c raster, -cc also the OCR PDF,
    /// -ccc also pre-existing colliding outputs (forces a fresh scan)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub clean: u8,

    /// Print the commands that would run without executing anything
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Run every compression profile and report resulting file sizes
    #[arg(long)]
    pub benchmark: bool,

    /// Print the benchmark report as JSON
    #[arg(long, requires = "benchmark")]
    pub json: bool,

    /// Apply a named preset from the settings file
    #[arg(short = 'P', long)]
    pub preset: Option<String>,
}
