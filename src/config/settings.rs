use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::compress::CompressProfile;
use crate::config::preset::Preset;
use crate::scan::{self, ScanMode, ScanSource};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub device: String,
    pub language: String,
    pub mode: ScanMode,
    pub papersize: String,
    pub resolution: u32,
    pub source: ScanSource,
    pub profile: CompressProfile,
    pub clean: u8,
    pub presets: HashMap<String, Preset>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            device: scan::DEFAULT_DEVICE.to_string(),
            language: "deu".to_string(),
            mode: ScanMode::Color,
            papersize: "a4".to_string(),
            resolution: 300,
            source: ScanSource::Auto,
            profile: CompressProfile::High,
            clean: 0,
            presets: HashMap::new(),
        }
    }
}

impl Settings {
    pub fn from_yaml(yaml: &str) -> crate::error::Result<Self> {
        serde_yml::from_str(yaml).map_err(|e| {
            crate::error::ScanDocError::config(format!("Failed to parse settings YAML: {e}"))
        })
    }

    pub fn from_file(path: &Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }
}
