// Compression stage: Ghostscript command construction, invocation, and
// the profile benchmark

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::merged::MergedConfig;
use crate::error::{Result, ScanDocError};
use crate::exec::{self, CommandLine};

/// Ghostscript compression profile. The image resolutions are tuned for
/// scanned documents; `extreme` keeps print quality.
///
/// See: https://www.ghostscript.com/doc/9.26/VectorDevices.htm
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompressProfile {
    /// gray, 100 dpi
    Low,
    /// color, 125 dpi
    Medium,
    /// color, 150 dpi
    High,
    /// color, 300 dpi
    Extreme,
}

impl CompressProfile {
    pub const ALL: [CompressProfile; 4] = [
        CompressProfile::Low,
        CompressProfile::Medium,
        CompressProfile::High,
        CompressProfile::Extreme,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CompressProfile::Low => "low",
            CompressProfile::Medium => "medium",
            CompressProfile::High => "high",
            CompressProfile::Extreme => "extreme",
        }
    }

    /// Profile-specific `gs` arguments.
    pub fn args(&self) -> &'static [&'static str] {
        match self {
            CompressProfile::Low => &[
                "-dPDFSETTINGS=/ebook",
                "-dEmbedAllFonts=false",
                "-dConvertCMYKImagesToRGB=true",
                "-dColorImageResolution=100",
                "-dGrayImageResolution=100",
                "-dMonoImageResolution=100",
                "-sColorConversionStrategy=Gray",
                "-sColorConversionStrategyForImages=Gray",
            ],
            CompressProfile::Medium => &[
                "-dPDFSETTINGS=/ebook",
                "-dEmbedAllFonts=false",
                "-dConvertCMYKImagesToRGB=true",
                "-dColorImageResolution=125",
                "-dGrayImageResolution=125",
                "-dMonoImageResolution=125",
            ],
            CompressProfile::High => &[
                "-dPDFSETTINGS=/ebook",
                "-dEmbedAllFonts=false",
                "-dColorImageResolution=150",
                "-dGrayImageResolution=150",
                "-dMonoImageResolution=150",
            ],
            CompressProfile::Extreme => &["-dPDFSETTINGS=/printer"],
        }
    }
}

/// Path of the compressed PDF the compression stage produces.
pub fn compressed_path(basename: &str) -> PathBuf {
    PathBuf::from(format!("{basename}.compressed.pdf"))
}

/// Build the `gs` command line compressing `input` into `output`.
pub fn compress_command(input: &Path, output: &Path, profile: CompressProfile) -> CommandLine {
    CommandLine::new("gs")
        .arg("-dNOPAUSE")
        .arg("-dSAFER")
        .arg("-dQUIET")
        .arg("-dBATCH")
        .arg("-sDEVICE=pdfwrite")
        .arg("-dCompatibilityLevel=1.7")
        .arg(format!("-sOutputFile={}", output.display()))
        .args(profile.args().iter().copied())
        .arg(input.display().to_string())
}

/// Run the compression stage, producing `<basename>.compressed.pdf`.
pub fn run_compress(config: &MergedConfig, input: &Path, output: &Path) -> Result<()> {
    let cmd = compress_command(input, output, config.profile);
    info!(profile = config.profile.name(), output = %output.display(), "compressing");
    exec::execute(&cmd, config.dry_run)
        .map_err(|e| ScanDocError::compress(format!("gs failed: {cmd}: {e}")))
}

/// One row of the benchmark report.
#[derive(Debug, Serialize)]
pub struct BenchmarkEntry {
    pub profile: &'static str,
    pub bytes: u64,
}

/// Run every compression profile over `input`, record the resulting file
/// sizes, and remove the trial outputs again. In dry-run mode the trial
/// commands are printed and the report is empty.
pub fn run_benchmark(config: &MergedConfig, input: &Path) -> Result<Vec<BenchmarkEntry>> {
    let mut entries = Vec::new();

    for profile in CompressProfile::ALL {
        let trial = PathBuf::from(format!("{}.{}.pdf", config.output, profile.name()));
        let cmd = compress_command(input, &trial, profile);
        info!(profile = profile.name(), "benchmarking");
        exec::execute(&cmd, config.dry_run).map_err(|e| {
            ScanDocError::compress(format!(
                "gs benchmark with profile '{}' failed: {cmd}: {e}",
                profile.name()
            ))
        })?;

        if config.dry_run {
            continue;
        }

        let bytes = std::fs::metadata(&trial)
            .map_err(|e| {
                ScanDocError::compress(format!(
                    "benchmark output {} missing: {e}",
                    trial.display()
                ))
            })?
            .len();
        entries.push(BenchmarkEntry {
            profile: profile.name(),
            bytes,
        });

        debug!(trial = %trial.display(), "removing benchmark output");
        std::fs::remove_file(&trial)?;
    }

    Ok(entries)
}
