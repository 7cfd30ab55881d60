pub mod merged;
pub mod preset;
pub mod settings;

use std::path::Path;

use settings::Settings;

/// Name of the settings file discovered in the working directory.
pub const SETTINGS_FILE: &str = "scandoc.yaml";

/// Load settings from `scandoc.yaml` in the given directory, falling back
/// to the built-in defaults when the file does not exist.
pub fn load_settings_from(dir: &Path) -> crate::error::Result<Settings> {
    let settings_path = dir.join(SETTINGS_FILE);

    if settings_path.exists() {
        Settings::from_file(&settings_path)
    } else {
        Ok(Settings::default())
    }
}

/// Load settings from the current working directory.
pub fn load_settings() -> crate::error::Result<Settings> {
    load_settings_from(Path::new("."))
}
