//! Subcommand implementations
//!
//! Each command returns its output as a string; `main` prints it.

use std::path::Path;

use anyhow::{Context, Result};
use hearth_theme::compile::element_variable;
use hearth_theme::{
    apply, apply_opacity, compile as compile_theme, effect_classes_for, extract_effect_classes,
    resolve as resolve_element, ApplicationRecord, ColorMode, ElementId, InMemoryTarget,
    ThemeError, ThemePreset,
};
use serde::Serialize;
use tracing::debug;

use crate::config::load_theme;

/// `hearth compile`
pub fn compile(theme: &Path, mode: ColorMode, accent: &str, json: bool) -> Result<String> {
    let config = load_theme(theme)?;
    let compiled = compile_theme(&config, mode, accent);

    if json {
        return serde_json::to_string_pretty(&compiled).context("Failed to serialize variables");
    }

    let mut target = InMemoryTarget::new();
    let record = apply(&compiled, &ApplicationRecord::default(), &mut target);
    debug!("rendered {} element variables", record.len());
    Ok(target.render())
}

#[derive(Serialize)]
struct ResolveReport<'a> {
    element: String,
    fallback: Option<String>,
    mode: ColorMode,
    /// Palette variables backing facets the cascade leaves absent
    palette: PaletteReport,
    style: hearth_theme::ResolvedStyle,
    variables: Vec<(&'a str, &'a str)>,
    classes: String,
}

#[derive(Serialize)]
struct PaletteReport {
    background: String,
    foreground: String,
}

impl From<ElementId> for PaletteReport {
    fn from(id: ElementId) -> Self {
        let role = id.palette_role();
        Self {
            background: role.background.variable(),
            foreground: role.foreground.variable(),
        }
    }
}

/// `hearth resolve`
pub fn resolve(theme: &Path, element: &str, mode: ColorMode) -> Result<String> {
    let config = load_theme(theme)?;
    let id: ElementId = element.parse()?;

    let compiled = compile_theme(&config, mode, "");
    let prefix = element_variable(id, "");
    let report = ResolveReport {
        element: id.key(),
        fallback: id.fallback().map(|fallback| fallback.key()),
        mode,
        palette: PaletteReport::from(id),
        style: resolve_element(id, &config, mode),
        variables: compiled
            .iter()
            .filter(|(key, _)| key.starts_with(&prefix))
            .collect(),
        classes: effect_classes_for(id, &config, mode),
    };

    serde_json::to_string_pretty(&report).context("Failed to serialize report")
}

/// `hearth effects`
pub fn effects(raw: &str) -> String {
    extract_effect_classes(raw)
}

/// `hearth opacity`
pub fn opacity(color: &str, opacity: &str) -> Result<String> {
    let value: f32 = opacity
        .trim()
        .parse()
        .map_err(|_| ThemeError::InvalidOpacity(opacity.to_string()))?;
    Ok(apply_opacity(color, value))
}

/// `hearth presets`
pub fn presets() -> String {
    ThemePreset::all()
        .iter()
        .map(|preset| format!("{:<8} {}", preset.id(), preset.display_name()))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opacity_command() {
        assert_eq!(opacity("#3cb371", "0.5").unwrap(), "rgba(60, 179, 113, 0.5)");
        assert_eq!(opacity("#3cb371", " 1 ").unwrap(), "#3cb371");
        let err = opacity("#3cb371", "half").unwrap_err();
        assert!(err.to_string().contains("half"));
    }

    #[test]
    fn test_effects_command() {
        assert_eq!(
            effects("matrix-rain: true; matrix-rain-speed: fast"),
            "effect-matrix-rain effect-matrix-rain-fast"
        );
    }

    #[test]
    fn test_palette_report() {
        let report = PaletteReport::from("button".parse::<ElementId>().unwrap());
        assert_eq!(report.background, "--primary");
        assert_eq!(report.foreground, "--primary-foreground");

        let report = PaletteReport::from("chores-widget-stats".parse::<ElementId>().unwrap());
        assert_eq!(report.background, "--card");
    }

    #[test]
    fn test_presets_command() {
        let listing = presets();
        assert_eq!(listing.lines().count(), ThemePreset::all().len());
        assert!(listing.starts_with("hearth"));
    }
}
