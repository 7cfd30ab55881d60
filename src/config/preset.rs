use serde::Deserialize;

use crate::compress::CompressProfile;
use crate::scan::{ScanMode, ScanSource};

/// A named flag set from the settings file. Every field is optional;
/// unset fields fall back to the settings defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Preset {
    pub device: Option<String>,
    pub language: Option<String>,
    pub mode: Option<ScanMode>,
    pub papersize: Option<String>,
    pub resolution: Option<u32>,
    pub source: Option<ScanSource>,
    pub profile: Option<CompressProfile>,
    pub clean: Option<u8>,
}
