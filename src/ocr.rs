// OCR stage: tesseract command construction and invocation

use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::merged::MergedConfig;
use crate::error::{Result, ScanDocError};
use crate::exec::{self, CommandLine};

/// Path of the searchable PDF the OCR stage produces.
pub fn ocr_output_path(basename: &str) -> PathBuf {
    PathBuf::from(format!("{basename}.ocr.pdf"))
}

/// Build the `tesseract` command line.
///
/// Tesseract appends `.pdf` to its output argument itself, so the second
/// argument is the output stem, not the final filename. `--oem 1` pins
/// the LSTM engine; the combined default segfaults on some builds.
pub fn ocr_command(raster: &Path, basename: &str, language: &str) -> CommandLine {
    CommandLine::new("tesseract")
        .arg(raster.display().to_string())
        .arg(format!("{basename}.ocr"))
        .arg("-l")
        .arg(language)
        .arg("--oem")
        .arg("1")
        .arg("pdf")
}

/// Run the OCR stage over the raster, producing `<basename>.ocr.pdf`.
///
/// On failure the raster file is left in place for inspection.
pub fn run_ocr(config: &MergedConfig, raster: &Path) -> Result<()> {
    let cmd = ocr_command(raster, &config.output, &config.language);
    info!(raster = %raster.display(), language = %config.language, "running OCR");
    exec::execute(&cmd, config.dry_run)
        .map_err(|e| ScanDocError::ocr(format!("tesseract failed: {cmd}: {e}")))
}
