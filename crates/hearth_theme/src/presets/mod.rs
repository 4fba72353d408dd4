//! Built-in palette presets inspired by shadcn base color presets.

use std::fmt::{Display, Formatter};

use crate::model::{ColorMode, PaletteColors};

/// Built-in theme preset catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ThemePreset {
    /// Warm household default.
    Hearth,
    /// shadcn-inspired slate preset.
    Slate,
    /// shadcn-inspired zinc preset.
    Zinc,
}

impl ThemePreset {
    /// Stable preset id for config/serialization.
    pub fn id(self) -> &'static str {
        match self {
            Self::Hearth => "hearth",
            Self::Slate => "slate",
            Self::Zinc => "zinc",
        }
    }

    /// User-facing display name.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Hearth => "Hearth",
            Self::Slate => "Slate",
            Self::Zinc => "Zinc",
        }
    }

    /// Full preset list.
    pub fn all() -> &'static [ThemePreset] {
        const PRESETS: [ThemePreset; 3] =
            [ThemePreset::Hearth, ThemePreset::Slate, ThemePreset::Zinc];
        &PRESETS
    }

    /// Look up a preset by id.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::all().iter().copied().find(|p| p.id() == id)
    }

    /// Build the full palette for one mode.
    pub fn palette(self, mode: ColorMode) -> PaletteColors {
        let base = match (self, mode) {
            (Self::Hearth, ColorMode::Light) => hearth_light(),
            (Self::Hearth, ColorMode::Dark) => hearth_dark(),
            (Self::Slate, ColorMode::Light) => slate_light(),
            (Self::Slate, ColorMode::Dark) => slate_dark(),
            (Self::Zinc, ColorMode::Light) => zinc_light(),
            (Self::Zinc, ColorMode::Dark) => zinc_dark(),
        };
        build_palette(base, mode)
    }
}

impl Display for ThemePreset {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Clone, Copy)]
struct BasePalette {
    background: &'static str,
    foreground: &'static str,
    card: &'static str,
    primary: &'static str,
    primary_foreground: &'static str,
    secondary: &'static str,
    secondary_foreground: &'static str,
    muted: &'static str,
    muted_foreground: &'static str,
    accent: &'static str,
    accent_foreground: &'static str,
    destructive: &'static str,
    border: &'static str,
}

fn build_palette(base: BasePalette, mode: ColorMode) -> PaletteColors {
    let (success, warning) = match mode {
        ColorMode::Light => ("#16a34a", "#d97706"),
        ColorMode::Dark => ("#22c55e", "#f59e0b"),
    };
    let on_status = match mode {
        ColorMode::Light => "#ffffff",
        ColorMode::Dark => "#0a0a0a",
    };

    PaletteColors {
        primary: base.primary.into(),
        primary_foreground: base.primary_foreground.into(),
        secondary: base.secondary.into(),
        secondary_foreground: base.secondary_foreground.into(),
        accent: base.accent.into(),
        accent_foreground: base.accent_foreground.into(),
        background: base.background.into(),
        foreground: base.foreground.into(),
        card: base.card.into(),
        card_foreground: base.foreground.into(),
        muted: base.muted.into(),
        muted_foreground: base.muted_foreground.into(),
        border: base.border.into(),
        destructive: base.destructive.into(),
        destructive_foreground: "#fafafa".into(),
        success: success.into(),
        success_foreground: on_status.into(),
        warning: warning.into(),
        warning_foreground: on_status.into(),
    }
}

fn hearth_light() -> BasePalette {
    BasePalette {
        background: "#fdfaf6",
        foreground: "#2b2118",
        card: "#ffffff",
        primary: "#c2410c",
        primary_foreground: "#fff7ed",
        secondary: "#f5ede4",
        secondary_foreground: "#3f2d1f",
        muted: "#f1e9df",
        muted_foreground: "#7c6a5a",
        accent: "#3cb371",
        accent_foreground: "#ffffff",
        destructive: "#dc2626",
        border: "#e7dccf",
    }
}

fn hearth_dark() -> BasePalette {
    BasePalette {
        background: "#17120e",
        foreground: "#f5ede4",
        card: "#211a14",
        primary: "#fb923c",
        primary_foreground: "#1c1008",
        secondary: "#2e251d",
        secondary_foreground: "#f5ede4",
        muted: "#2a221b",
        muted_foreground: "#b3a291",
        accent: "#4ade80",
        accent_foreground: "#0b1f13",
        destructive: "#ef4444",
        border: "#3a2f25",
    }
}

fn slate_light() -> BasePalette {
    BasePalette {
        background: "#ffffff",
        foreground: "#020817",
        card: "#ffffff",
        primary: "#0f172a",
        primary_foreground: "#f8fafc",
        secondary: "#f1f5f9",
        secondary_foreground: "#0f172a",
        muted: "#f1f5f9",
        muted_foreground: "#64748b",
        accent: "#f1f5f9",
        accent_foreground: "#0f172a",
        destructive: "#ef4444",
        border: "#e2e8f0",
    }
}

fn slate_dark() -> BasePalette {
    BasePalette {
        background: "#020817",
        foreground: "#f8fafc",
        card: "#020817",
        primary: "#f8fafc",
        primary_foreground: "#0f172a",
        secondary: "#1e293b",
        secondary_foreground: "#f8fafc",
        muted: "#1e293b",
        muted_foreground: "#94a3b8",
        accent: "#1e293b",
        accent_foreground: "#f8fafc",
        destructive: "#7f1d1d",
        border: "#1e293b",
    }
}

fn zinc_light() -> BasePalette {
    BasePalette {
        background: "#ffffff",
        foreground: "#09090b",
        card: "#ffffff",
        primary: "#18181b",
        primary_foreground: "#fafafa",
        secondary: "#f4f4f5",
        secondary_foreground: "#18181b",
        muted: "#f4f4f5",
        muted_foreground: "#71717a",
        accent: "#f4f4f5",
        accent_foreground: "#18181b",
        destructive: "#ef4444",
        border: "#e4e4e7",
    }
}

fn zinc_dark() -> BasePalette {
    BasePalette {
        background: "#09090b",
        foreground: "#fafafa",
        card: "#09090b",
        primary: "#fafafa",
        primary_foreground: "#18181b",
        secondary: "#27272a",
        secondary_foreground: "#fafafa",
        muted: "#27272a",
        muted_foreground: "#a1a1aa",
        accent: "#27272a",
        accent_foreground: "#fafafa",
        destructive: "#7f1d1d",
        border: "#27272a",
    }
}
