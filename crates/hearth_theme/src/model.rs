//! Theme configuration data model
//!
//! [`ThemeConfiguration`] is the root object the engine compiles: two full
//! palettes, layout/typography/UI/surface settings, and a sparse map of
//! per-element overrides.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::element::{ElementId, ElementStyle};
use crate::error::ThemeError;
use crate::presets::ThemePreset;
use crate::shadow::ShadowPreset;

// ========== Color Mode ==========

/// Active color mode (light or dark)
#[derive(Clone, Copy, Debug, Default, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Light,
    Dark,
}

impl ColorMode {
    pub fn key(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// The opposite mode
    pub fn toggle(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ColorMode {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err(ThemeError::InvalidMode(s.to_string())),
        }
    }
}

// ========== Palette ==========

/// Named palette slot keys for dynamic access
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub enum PaletteSlot {
    Primary,
    PrimaryForeground,
    Secondary,
    SecondaryForeground,
    Accent,
    AccentForeground,
    Background,
    Foreground,
    Card,
    CardForeground,
    Muted,
    MutedForeground,
    Border,
    Destructive,
    DestructiveForeground,
    Success,
    SuccessForeground,
    Warning,
    WarningForeground,
}

impl PaletteSlot {
    /// Every slot, in output order
    pub const ALL: [PaletteSlot; 19] = [
        Self::Primary,
        Self::PrimaryForeground,
        Self::Secondary,
        Self::SecondaryForeground,
        Self::Accent,
        Self::AccentForeground,
        Self::Background,
        Self::Foreground,
        Self::Card,
        Self::CardForeground,
        Self::Muted,
        Self::MutedForeground,
        Self::Border,
        Self::Destructive,
        Self::DestructiveForeground,
        Self::Success,
        Self::SuccessForeground,
        Self::Warning,
        Self::WarningForeground,
    ];

    /// Slot name as used in variable names (`--<name>`)
    pub fn name(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::PrimaryForeground => "primary-foreground",
            Self::Secondary => "secondary",
            Self::SecondaryForeground => "secondary-foreground",
            Self::Accent => "accent",
            Self::AccentForeground => "accent-foreground",
            Self::Background => "background",
            Self::Foreground => "foreground",
            Self::Card => "card",
            Self::CardForeground => "card-foreground",
            Self::Muted => "muted",
            Self::MutedForeground => "muted-foreground",
            Self::Border => "border",
            Self::Destructive => "destructive",
            Self::DestructiveForeground => "destructive-foreground",
            Self::Success => "success",
            Self::SuccessForeground => "success-foreground",
            Self::Warning => "warning",
            Self::WarningForeground => "warning-foreground",
        }
    }

    /// Variable name for this slot
    pub fn variable(self) -> String {
        format!("--{}", self.name())
    }
}

/// A complete color palette for one mode
///
/// Every slot is a required field, so a partial palette cannot be
/// constructed or deserialized.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PaletteColors {
    pub primary: String,
    pub primary_foreground: String,
    pub secondary: String,
    pub secondary_foreground: String,
    pub accent: String,
    pub accent_foreground: String,
    pub background: String,
    pub foreground: String,
    pub card: String,
    pub card_foreground: String,
    pub muted: String,
    pub muted_foreground: String,
    pub border: String,
    pub destructive: String,
    pub destructive_foreground: String,
    pub success: String,
    pub success_foreground: String,
    pub warning: String,
    pub warning_foreground: String,
}

impl PaletteColors {
    /// Get a slot's color
    pub fn get(&self, slot: PaletteSlot) -> &str {
        match slot {
            PaletteSlot::Primary => &self.primary,
            PaletteSlot::PrimaryForeground => &self.primary_foreground,
            PaletteSlot::Secondary => &self.secondary,
            PaletteSlot::SecondaryForeground => &self.secondary_foreground,
            PaletteSlot::Accent => &self.accent,
            PaletteSlot::AccentForeground => &self.accent_foreground,
            PaletteSlot::Background => &self.background,
            PaletteSlot::Foreground => &self.foreground,
            PaletteSlot::Card => &self.card,
            PaletteSlot::CardForeground => &self.card_foreground,
            PaletteSlot::Muted => &self.muted,
            PaletteSlot::MutedForeground => &self.muted_foreground,
            PaletteSlot::Border => &self.border,
            PaletteSlot::Destructive => &self.destructive,
            PaletteSlot::DestructiveForeground => &self.destructive_foreground,
            PaletteSlot::Success => &self.success,
            PaletteSlot::SuccessForeground => &self.success_foreground,
            PaletteSlot::Warning => &self.warning,
            PaletteSlot::WarningForeground => &self.warning_foreground,
        }
    }

    /// Iterate `(slot, color)` pairs in output order
    pub fn iter(&self) -> impl Iterator<Item = (PaletteSlot, &str)> {
        PaletteSlot::ALL.into_iter().map(|slot| (slot, self.get(slot)))
    }
}

// ========== Settings ==========

/// Page chrome dimensions (px)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct LayoutSettings {
    #[serde(default = "default_sidebar_width")]
    pub sidebar_width: f32,
    #[serde(default = "default_header_height")]
    pub header_height: f32,
    #[serde(default = "default_content_padding")]
    pub content_padding: f32,
    #[serde(default = "default_card_gap")]
    pub card_gap: f32,
}

fn default_sidebar_width() -> f32 {
    256.0
}

fn default_header_height() -> f32 {
    64.0
}

fn default_content_padding() -> f32 {
    24.0
}

fn default_card_gap() -> f32 {
    16.0
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            sidebar_width: default_sidebar_width(),
            header_height: default_header_height(),
            content_padding: default_content_padding(),
            card_gap: default_card_gap(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TypographySettings {
    #[serde(default = "default_font_family")]
    pub font_family: String,
    /// Falls back to `font_family` when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading_font_family: Option<String>,
    /// Base font size (px)
    #[serde(default = "default_font_size")]
    pub font_size: f32,
    #[serde(default = "default_line_height")]
    pub line_height: f32,
    #[serde(default = "default_font_weight")]
    pub font_weight: u16,
}

fn default_font_family() -> String {
    "Inter, system-ui, sans-serif".to_string()
}

fn default_font_size() -> f32 {
    16.0
}

fn default_line_height() -> f32 {
    1.5
}

fn default_font_weight() -> u16 {
    400
}

impl Default for TypographySettings {
    fn default() -> Self {
        Self {
            font_family: default_font_family(),
            heading_font_family: None,
            font_size: default_font_size(),
            line_height: default_line_height(),
            font_weight: default_font_weight(),
        }
    }
}

impl TypographySettings {
    pub fn heading_family(&self) -> &str {
        self.heading_font_family
            .as_deref()
            .filter(|family| !family.trim().is_empty())
            .unwrap_or(&self.font_family)
    }
}

/// UI-wide settings: corner rounding and shadow intensity
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct UiSettings {
    /// Base corner radius (px); the small/large steps are derived from it
    #[serde(default = "default_radius")]
    pub radius: f32,
    #[serde(default)]
    pub shadow: ShadowPreset,
}

fn default_radius() -> f32 {
    8.0
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            radius: default_radius(),
            shadow: ShadowPreset::default(),
        }
    }
}

impl UiSettings {
    pub fn radius_sm(&self) -> f32 {
        (self.radius - 4.0).max(0.0)
    }

    pub fn radius_lg(&self) -> f32 {
        self.radius + 4.0
    }
}

/// Colors for special surfaces (calendar, leaderboard)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SurfaceSettings {
    /// Highlight for today's calendar cell; `var(--primary)` when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calendar_today: Option<String>,
    #[serde(default = "default_gold")]
    pub leaderboard_gold: String,
    #[serde(default = "default_silver")]
    pub leaderboard_silver: String,
    #[serde(default = "default_bronze")]
    pub leaderboard_bronze: String,
}

fn default_gold() -> String {
    "#f5b301".to_string()
}

fn default_silver() -> String {
    "#a8b0bb".to_string()
}

fn default_bronze() -> String {
    "#c47a3a".to_string()
}

impl Default for SurfaceSettings {
    fn default() -> Self {
        Self {
            calendar_today: None,
            leaderboard_gold: default_gold(),
            leaderboard_silver: default_silver(),
            leaderboard_bronze: default_bronze(),
        }
    }
}

// ========== Configuration ==========

/// The full set of user-editable styling choices for one theme
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ThemeConfiguration {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub light: PaletteColors,
    pub dark: PaletteColors,
    pub layout: LayoutSettings,
    pub typography: TypographySettings,
    pub ui: UiSettings,
    pub surfaces: SurfaceSettings,
    /// Per-element overrides, keyed by element identifier
    #[serde(rename = "elements", skip_serializing_if = "BTreeMap::is_empty")]
    pub element_styles: BTreeMap<ElementId, ElementStyle>,
}

impl Default for ThemeConfiguration {
    fn default() -> Self {
        Self::from_preset(ThemePreset::Hearth)
    }
}

impl ThemeConfiguration {
    /// A configuration using a built-in preset's palettes and default settings
    pub fn from_preset(preset: ThemePreset) -> Self {
        Self {
            name: preset.display_name().to_string(),
            description: None,
            light: preset.palette(ColorMode::Light),
            dark: preset.palette(ColorMode::Dark),
            layout: LayoutSettings::default(),
            typography: TypographySettings::default(),
            ui: UiSettings::default(),
            surfaces: SurfaceSettings::default(),
            element_styles: BTreeMap::new(),
        }
    }

    /// The palette for the given mode
    pub fn palette(&self, mode: ColorMode) -> &PaletteColors {
        match mode {
            ColorMode::Light => &self.light,
            ColorMode::Dark => &self.dark,
        }
    }

    /// The override for `id`, if one is configured
    pub fn element_style(&self, id: ElementId) -> Option<&ElementStyle> {
        self.element_styles.get(&id)
    }

    /// Mutable access to the override for `id`, creating an empty one
    pub fn element_style_mut(&mut self, id: ElementId) -> &mut ElementStyle {
        self.element_styles.entry(id).or_default()
    }

    /// Builder method: set the override for `id`
    pub fn with_element(mut self, id: ElementId, style: ElementStyle) -> Self {
        self.element_styles.insert(id, style);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_mode_parse() {
        assert_eq!("dark".parse::<ColorMode>().unwrap(), ColorMode::Dark);
        assert_eq!(" Light ".parse::<ColorMode>().unwrap(), ColorMode::Light);
        assert!("dim".parse::<ColorMode>().is_err());
        assert_eq!(ColorMode::Light.toggle(), ColorMode::Dark);
    }

    #[test]
    fn test_palette_slot_names_are_unique() {
        let mut names: Vec<&str> = PaletteSlot::ALL.iter().map(|s| s.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), PaletteSlot::ALL.len());
    }

    #[test]
    fn test_derived_radius_steps() {
        let ui = UiSettings {
            radius: 2.0,
            shadow: ShadowPreset::Sm,
        };
        assert_eq!(ui.radius_sm(), 0.0);
        assert_eq!(ui.radius_lg(), 6.0);
    }

    #[test]
    fn test_heading_family_falls_back() {
        let mut typography = TypographySettings::default();
        assert_eq!(typography.heading_family(), typography.font_family);
        typography.heading_font_family = Some("Georgia, serif".to_string());
        assert_eq!(typography.heading_family(), "Georgia, serif");
    }
}
