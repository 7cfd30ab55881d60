use super::preset::Preset;
use super::settings::Settings;
use crate::cli::CliArgs;
use crate::compress::CompressProfile;
use crate::error::Result;
use crate::papersize::{self, Geometry};
use crate::scan::{self, ScanMode, ScanSource};

/// The fully resolved, immutable job configuration. Constructed once per
/// invocation, read-only thereafter.
#[derive(Debug, Clone)]
pub struct MergedConfig {
    pub device: String,
    pub language: String,
    pub mode: ScanMode,
    pub paper_name: String,
    pub paper: Geometry,
    pub resolution: u32,
    pub source: ScanSource,
    pub profile: CompressProfile,
    pub clean: u8,
    pub dry_run: bool,
    pub benchmark: bool,
    pub json: bool,
    pub output: String,
}

impl MergedConfig {
    /// Layer CLI flags over a preset over the settings file: a CLI value
    /// wins, an unset CLI value falls back to the preset, an unset preset
    /// value falls back to the settings.
    ///
    /// Paper size and resolution are validated here, before any external
    /// tool can be invoked.
    pub fn new(settings: &Settings, preset: Option<&Preset>, cli: &CliArgs) -> Result<Self> {
        let device = cli
            .device
            .clone()
            .or_else(|| preset.and_then(|p| p.device.clone()))
            .unwrap_or_else(|| settings.device.clone());
        let language = cli
            .language
            .clone()
            .or_else(|| preset.and_then(|p| p.language.clone()))
            .unwrap_or_else(|| settings.language.clone());
        let mode = cli
            .mode
            .or(preset.and_then(|p| p.mode))
            .unwrap_or(settings.mode);
        let paper_name = cli
            .papersize
            .clone()
            .or_else(|| preset.and_then(|p| p.papersize.clone()))
            .unwrap_or_else(|| settings.papersize.clone());
        let resolution = cli
            .resolution
            .or(preset.and_then(|p| p.resolution))
            .unwrap_or(settings.resolution);
        let source = cli
            .source
            .or(preset.and_then(|p| p.source))
            .unwrap_or(settings.source);
        let profile = cli
            .profile
            .or(preset.and_then(|p| p.profile))
            .unwrap_or(settings.profile);

        // A counted flag cannot distinguish "unset" from 0, so 0 means
        // "fall back".
        let clean = if cli.clean > 0 {
            cli.clean
        } else {
            preset.and_then(|p| p.clean).unwrap_or(settings.clean)
        }
        .min(3);

        let paper = papersize::resolve(&paper_name, &scan::SCAN_AREA)?;
        scan::validate_resolution(resolution)?;

        Ok(MergedConfig {
            device,
            language,
            mode,
            paper_name,
            paper,
            resolution,
            source,
            profile,
            clean,
            dry_run: cli.dry_run,
            benchmark: cli.benchmark,
            json: cli.json,
            output: cli.output.clone(),
        })
    }
}
