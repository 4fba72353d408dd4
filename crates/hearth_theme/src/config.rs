//! Loading themes and engine settings
//!
//! Themes are read from `.toml` or `.json` files (chosen by extension) or
//! from strings. [`EngineSettings`] tunes the editing session and can be
//! overridden from the environment:
//!
//! | Variable                  | Setting           |
//! |---------------------------|-------------------|
//! | `HEARTH_QUIET_PERIOD_MS`  | `quiet-period-ms` |
//! | `HEARTH_HISTORY_LIMIT`    | `history-limit`   |
//! | `HEARTH_COLOR_MODE`       | `default-mode`    |

use std::fs;
use std::path::Path;
use std::time::Duration;

use hearth_core::DEFAULT_HISTORY_LIMIT;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Result, ThemeError};
use crate::model::{ColorMode, ThemeConfiguration};

pub const ENV_QUIET_PERIOD_MS: &str = "HEARTH_QUIET_PERIOD_MS";
pub const ENV_HISTORY_LIMIT: &str = "HEARTH_HISTORY_LIMIT";
pub const ENV_COLOR_MODE: &str = "HEARTH_COLOR_MODE";

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| ThemeError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ========== Themes ==========

/// Load a theme from a `.toml` or `.json` file
pub fn load_theme(path: &Path) -> Result<ThemeConfiguration> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let theme = match extension.as_str() {
        "toml" => theme_from_toml(&read(path)?)?,
        "json" => theme_from_json(&read(path)?)?,
        _ => return Err(ThemeError::UnsupportedFormat(path.display().to_string())),
    };
    debug!(
        "loaded theme {:?} from {} ({} element overrides)",
        theme.name,
        path.display(),
        theme.element_styles.len()
    );
    Ok(theme)
}

pub fn theme_from_toml(source: &str) -> Result<ThemeConfiguration> {
    Ok(toml::from_str(source)?)
}

pub fn theme_from_json(source: &str) -> Result<ThemeConfiguration> {
    Ok(serde_json::from_str(source)?)
}

pub fn theme_to_json(theme: &ThemeConfiguration) -> Result<String> {
    Ok(serde_json::to_string_pretty(theme)?)
}

// ========== Engine settings ==========

/// Editing session settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct EngineSettings {
    /// Debounce before an edit burst becomes a history entry
    #[serde(default = "default_quiet_period_ms")]
    pub quiet_period_ms: u64,
    /// Maximum retained history entries
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
    #[serde(default)]
    pub default_mode: ColorMode,
}

fn default_quiet_period_ms() -> u64 {
    500
}

fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            quiet_period_ms: default_quiet_period_ms(),
            history_limit: default_history_limit(),
            default_mode: ColorMode::default(),
        }
    }
}

impl EngineSettings {
    /// Load settings from a TOML file, then apply environment overrides
    pub fn load(path: &Path) -> Result<Self> {
        let settings = Self::from_toml(&read(path)?)?;
        debug!("loaded engine settings from {}", path.display());
        Ok(settings.with_env_overrides())
    }

    pub fn from_toml(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Apply `HEARTH_*` environment overrides
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    ///
    /// Unparseable values are logged and ignored.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(value) = lookup(ENV_QUIET_PERIOD_MS) {
            match value.trim().parse() {
                Ok(ms) => self.quiet_period_ms = ms,
                Err(_) => warn!("ignoring {}={:?}: not a number", ENV_QUIET_PERIOD_MS, value),
            }
        }
        if let Some(value) = lookup(ENV_HISTORY_LIMIT) {
            match value.trim().parse() {
                Ok(limit) => self.history_limit = limit,
                Err(_) => warn!("ignoring {}={:?}: not a number", ENV_HISTORY_LIMIT, value),
            }
        }
        if let Some(value) = lookup(ENV_COLOR_MODE) {
            match value.parse() {
                Ok(mode) => self.default_mode = mode,
                Err(err) => warn!("ignoring {}: {}", ENV_COLOR_MODE, err),
            }
        }
        self
    }

    pub fn quiet_period(&self) -> Duration {
        Duration::from_millis(self.quiet_period_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{ElementId, GlobalElement, Page, WidgetKind};

    #[test]
    fn test_theme_from_toml() {
        let theme = theme_from_toml(
            r##"
            name = "Cozy"

            [ui]
            radius = 12
            shadow = "lg"

            [elements.card.background]
            color = "#3cb371"
            opacity = 0.5

            [elements.dashboard-widget-stats.border]
            color = "#ff0000"
            style = "dashed"
            "##,
        )
        .unwrap();

        assert_eq!(theme.name, "Cozy");
        assert_eq!(theme.ui.radius, 12.0);
        let card = theme
            .element_style(ElementId::Global(GlobalElement::Card))
            .unwrap();
        assert_eq!(card.background.opacity, Some(0.5));
        assert!(theme
            .element_style(ElementId::PageWidget(Page::Dashboard, WidgetKind::Stats))
            .is_some());
        // Palettes default to the built-in preset
        assert_eq!(theme.light, ThemeConfiguration::default().light);
    }

    #[test]
    fn test_unknown_element_rejected() {
        let err = theme_from_json(r#"{ "elements": { "garage-card": {} } }"#).unwrap_err();
        assert!(matches!(err, ThemeError::Json(_)));
        assert!(err.to_string().contains("garage-card"));
    }

    #[test]
    fn test_partial_palette_rejected() {
        let err = theme_from_toml("[light]\nprimary = \"#000000\"\n").unwrap_err();
        assert!(matches!(err, ThemeError::Toml(_)));
    }

    #[test]
    fn test_json_round_trip() {
        let theme = ThemeConfiguration::default().with_element(
            ElementId::PageBackground(Page::Calendar),
            crate::element::ElementStyle::new().bg_image("/img/snow.png"),
        );
        let json = theme_to_json(&theme).unwrap();
        assert!(json.contains("\"calendar-background\""));
        assert_eq!(theme_from_json(&json).unwrap(), theme);
    }

    #[test]
    fn test_unsupported_extension() {
        let err = load_theme(Path::new("theme.yaml")).unwrap_err();
        assert!(matches!(err, ThemeError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_settings_defaults_and_overrides() {
        let settings = EngineSettings::from_toml("history-limit = 10").unwrap();
        assert_eq!(settings.history_limit, 10);
        assert_eq!(settings.quiet_period(), Duration::from_millis(500));

        let settings = settings.with_overrides(|name| match name {
            ENV_QUIET_PERIOD_MS => Some("250".to_string()),
            ENV_HISTORY_LIMIT => Some("many".to_string()),
            ENV_COLOR_MODE => Some("dark".to_string()),
            _ => None,
        });
        assert_eq!(settings.quiet_period_ms, 250);
        assert_eq!(settings.history_limit, 10);
        assert_eq!(settings.default_mode, ColorMode::Dark);
    }
}
