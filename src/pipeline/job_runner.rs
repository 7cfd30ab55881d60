// Job execution: scan -> OCR -> compress -> finalize, strictly sequential

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::compress::{self, BenchmarkEntry};
use crate::config::merged::MergedConfig;
use crate::error::{Result, ScanDocError};
use crate::{ocr, scan};

/// What a finished job produced.
pub enum JobOutcome {
    /// Normal run: the final PDF and its size in bytes.
    Completed { output: PathBuf, bytes: u64 },
    /// Benchmark run: one entry per compression profile.
    Benchmark { entries: Vec<BenchmarkEntry> },
    /// Dry run: commands were printed, nothing touched disk.
    DryRun,
}

/// Run the whole pipeline for one job. Each stage blocks on its child
/// process; the first failure aborts the run. No retries.
pub fn run_job(config: &MergedConfig) -> Result<JobOutcome> {
    let raster = scan::raster_path(&config.output);
    let ocr_pdf = ocr::ocr_output_path(&config.output);
    let compressed = compress::compressed_path(&config.output);
    let final_pdf = PathBuf::from(format!("{}.pdf", config.output));

    // Clean level 3 deletes pre-existing colliding outputs up front
    // instead of overwriting them later.
    if config.clean >= 3 {
        for path in [&raster, &ocr_pdf, &compressed, &final_pdf] {
            if path.exists() {
                remove_file(config, path).map_err(|e| {
                    ScanDocError::finalize(format!(
                        "failed to remove pre-existing {}: {e}",
                        path.display()
                    ))
                })?;
            }
        }
    }

    scan::run_scan(config, &raster)?;
    ocr::run_ocr(config, &raster)?;

    let outcome = if config.benchmark {
        let entries = compress::run_benchmark(config, &ocr_pdf)?;
        JobOutcome::Benchmark { entries }
    } else {
        compress::run_compress(config, &ocr_pdf, &compressed)?;
        finalize(config, &compressed, &final_pdf)?;
        if config.dry_run {
            JobOutcome::DryRun
        } else {
            let bytes = std::fs::metadata(&final_pdf)?.len();
            JobOutcome::Completed {
                output: final_pdf.clone(),
                bytes,
            }
        }
    };

    // Remove intermediates per the requested clean level.
    if config.clean >= 1 {
        remove_if_exists(config, &raster)?;
    }
    if config.clean >= 2 {
        remove_if_exists(config, &ocr_pdf)?;
    }

    if config.dry_run {
        Ok(JobOutcome::DryRun)
    } else {
        Ok(outcome)
    }
}

/// Rename the compressed PDF to the requested final name.
fn finalize(config: &MergedConfig, compressed: &Path, final_pdf: &Path) -> Result<()> {
    if config.dry_run {
        println!("mv {} {}", compressed.display(), final_pdf.display());
        return Ok(());
    }
    info!(output = %final_pdf.display(), "finalizing");
    std::fs::rename(compressed, final_pdf).map_err(|e| {
        ScanDocError::finalize(format!(
            "failed to rename {} to {}: {e}",
            compressed.display(),
            final_pdf.display()
        ))
    })
}

fn remove_file(config: &MergedConfig, path: &Path) -> std::io::Result<()> {
    if config.dry_run {
        println!("rm {}", path.display());
        return Ok(());
    }
    debug!(path = %path.display(), "removing");
    std::fs::remove_file(path)
}

fn remove_if_exists(config: &MergedConfig, path: &Path) -> Result<()> {
    if path.exists() {
        remove_file(config, path).map_err(|e| {
            ScanDocError::finalize(format!("failed to remove {}: {e}", path.display()))
        })?;
    }
    Ok(())
}
