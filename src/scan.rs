// Scan stage: scanimage command construction and invocation

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::Deserialize;
use tracing::info;

use crate::config::merged::MergedConfig;
use crate::error::{Result, ScanDocError};
use crate::exec::{self, CommandLine};
use crate::papersize::Geometry;

/// Scannable area of the default device profile (Brother MFC series
/// flatbed/ADF, in millimeters). Requested paper sizes must fit inside.
pub const SCAN_AREA: Geometry = Geometry::new(228, 302);

/// Default SANE device identifier.
pub const DEFAULT_DEVICE: &str = "brother4:net1;dev0";

/// Scan resolutions the device accepts, in DPI.
pub const RESOLUTIONS: [u32; 10] = [100, 150, 200, 300, 400, 600, 1200, 2400, 4800, 9600];

/// Color mode of the scan, mapped to the device's `--mode` strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanMode {
    Bw,
    Diffuse,
    Gray,
    Color,
}

impl ScanMode {
    pub fn mode_arg(&self) -> &'static str {
        match self {
            ScanMode::Bw => "Black & White",
            ScanMode::Diffuse => "Gray[Error Diffusion]",
            ScanMode::Gray => "True Gray",
            ScanMode::Color => "24bit Color[Fast]",
        }
    }
}

/// Where the device should pull the paper from. `Auto` lets the device
/// decide and adds no `--source` argument. The plain `adf` and `duplex`
/// feeders are left-aligned; the `adf-center` variants select the
/// centrally aligned tray.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScanSource {
    Auto,
    Flatbed,
    Adf,
    Duplex,
    AdfCenter,
    AdfCenterDuplex,
}

impl ScanSource {
    pub fn source_arg(&self) -> Option<&'static str> {
        match self {
            ScanSource::Auto => None,
            ScanSource::Flatbed => Some("FlatBed"),
            ScanSource::Adf => Some("Automatic Document Feeder(left aligned)"),
            ScanSource::Duplex => Some("Automatic Document Feeder(left aligned,Duplex)"),
            ScanSource::AdfCenter => Some("Automatic Document Feeder(centrally aligned)"),
            ScanSource::AdfCenterDuplex => {
                Some("Automatic Document Feeder(centrally aligned,Duplex)")
            }
        }
    }
}

/// Validate a requested resolution against the device's supported set.
pub fn validate_resolution(dpi: u32) -> Result<()> {
    if RESOLUTIONS.contains(&dpi) {
        Ok(())
    } else {
        Err(ScanDocError::config(format!(
            "Unsupported resolution {dpi} dpi, expected one of {RESOLUTIONS:?}"
        )))
    }
}

/// Path of the raster file the scan stage produces.
pub fn raster_path(basename: &str) -> PathBuf {
    PathBuf::from(format!("{basename}.tiff"))
}

/// Build the `scanimage` command line. The raster is written to stdout,
/// so the caller redirects it to the raster file.
pub fn scan_command(config: &MergedConfig) -> CommandLine {
    let mut cmd = CommandLine::new("scanimage")
        .arg("--device-name")
        .arg(&config.device)
        .arg("--format")
        .arg("tiff")
        .args(config.paper.scan_args())
        .arg("--mode")
        .arg(config.mode.mode_arg())
        .arg("--resolution")
        .arg(config.resolution.to_string());
    if let Some(source) = config.source.source_arg() {
        cmd = cmd.arg("--source").arg(source);
    }
    cmd
}

/// Run the scan stage, producing `<basename>.tiff`.
///
/// An existing raster is reused instead of re-scanned, except at clean
/// level 3 which always forces a fresh scan (the finalizer removes the
/// stale raster beforehand).
pub fn run_scan(config: &MergedConfig, raster: &Path) -> Result<()> {
    if raster.exists() && config.clean < 3 {
        info!(raster = %raster.display(), "reusing existing raster, skipping scan");
        return Ok(());
    }

    let cmd = scan_command(config);
    info!(device = %config.device, raster = %raster.display(), "scanning");
    exec::execute_redirected(&cmd, raster, config.dry_run).map_err(|e| {
        ScanDocError::scan(format!(
            "scanimage on device '{}' failed: {cmd}: {e}",
            config.device
        ))
    })
}
