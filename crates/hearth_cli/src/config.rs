//! Hearth CLI configuration file handling

use anyhow::{Context, Result};
use hearth_theme::{EngineSettings, ThemeConfiguration};
use std::path::Path;

/// Settings file picked up from the working directory when `--settings` is
/// not given
pub const DEFAULT_SETTINGS_FILE: &str = "hearth.toml";

/// Load engine settings
///
/// An explicit path must exist. Without one, `hearth.toml` in the current
/// directory is used if present, otherwise the defaults. Environment
/// overrides apply in every case.
pub fn load_settings(path: Option<&Path>) -> Result<EngineSettings> {
    match path {
        Some(path) => EngineSettings::load(path)
            .with_context(|| format!("Failed to load settings from {}", path.display())),
        None => {
            let default_path = Path::new(DEFAULT_SETTINGS_FILE);
            if default_path.exists() {
                EngineSettings::load(default_path)
                    .with_context(|| format!("Failed to load {}", DEFAULT_SETTINGS_FILE))
            } else {
                Ok(EngineSettings::default().with_env_overrides())
            }
        }
    }
}

/// Load a theme file (`.toml` or `.json`)
pub fn load_theme(path: &Path) -> Result<ThemeConfiguration> {
    hearth_theme::load_theme(path)
        .with_context(|| format!("Failed to load theme {}", path.display()))
}
