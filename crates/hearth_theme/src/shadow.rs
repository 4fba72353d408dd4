//! Shadow presets and their mode-aware expansion
//!
//! A [`ShadowPreset`] names an elevation step. [`ShadowTokens`] holds the
//! concrete geometry for one color mode; dark mode uses a stronger alpha so
//! elevation stays visible against dark surfaces.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::color::format_number;
use crate::model::ColorMode;

/// Named shadow elevation
#[derive(Clone, Copy, Debug, Default, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShadowPreset {
    None,
    Sm,
    #[default]
    Md,
    Lg,
    Xl,
    #[serde(rename = "2xl")]
    Xxl,
    Inner,
}

impl ShadowPreset {
    /// Stable preset key
    pub fn key(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Sm => "sm",
            Self::Md => "md",
            Self::Lg => "lg",
            Self::Xl => "xl",
            Self::Xxl => "2xl",
            Self::Inner => "inner",
        }
    }
}

impl fmt::Display for ShadowPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A box shadow definition (black, with the given alpha)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shadow {
    pub offset_x: f32,
    pub offset_y: f32,
    pub blur: f32,
    pub spread: f32,
    pub alpha: f32,
    pub inset: bool,
}

impl Shadow {
    pub const fn new(offset_x: f32, offset_y: f32, blur: f32, spread: f32, alpha: f32) -> Self {
        Self {
            offset_x,
            offset_y,
            blur,
            spread,
            alpha,
            inset: false,
        }
    }

    pub const fn inset(self) -> Self {
        Self {
            inset: true,
            ..self
        }
    }

    pub const fn none() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0, 0.0)
    }

    pub fn is_none(&self) -> bool {
        self.alpha <= 0.0 || (self.blur == 0.0 && self.offset_x == 0.0 && self.offset_y == 0.0)
    }

    /// Render as a `box-shadow` value
    pub fn to_css(&self) -> String {
        if self.is_none() {
            return "none".to_string();
        }
        format!(
            "{}{} {} {} {} rgba(0, 0, 0, {})",
            if self.inset { "inset " } else { "" },
            length(self.offset_x),
            length(self.offset_y),
            length(self.blur),
            length(self.spread),
            format_number(self.alpha)
        )
    }
}

fn length(value: f32) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        format!("{}px", format_number(value))
    }
}

/// Shadow geometry for every preset in one color mode
#[derive(Clone, Debug, PartialEq)]
pub struct ShadowTokens {
    pub shadow_sm: Shadow,
    pub shadow_md: Shadow,
    pub shadow_lg: Shadow,
    pub shadow_xl: Shadow,
    pub shadow_2xl: Shadow,
    pub shadow_inner: Shadow,
}

impl ShadowTokens {
    /// Get shadow by preset
    pub fn get(&self, preset: ShadowPreset) -> Shadow {
        match preset {
            ShadowPreset::None => Shadow::none(),
            ShadowPreset::Sm => self.shadow_sm,
            ShadowPreset::Md => self.shadow_md,
            ShadowPreset::Lg => self.shadow_lg,
            ShadowPreset::Xl => self.shadow_xl,
            ShadowPreset::Xxl => self.shadow_2xl,
            ShadowPreset::Inner => self.shadow_inner,
        }
    }

    pub fn for_mode(mode: ColorMode) -> Self {
        match mode {
            ColorMode::Light => Self::light(),
            ColorMode::Dark => Self::dark(),
        }
    }

    /// Shadow tokens for a light color mode
    pub fn light() -> Self {
        Self {
            shadow_sm: Shadow::new(0.0, 1.0, 2.0, 0.0, 0.05),
            shadow_md: Shadow::new(0.0, 4.0, 6.0, -1.0, 0.1),
            shadow_lg: Shadow::new(0.0, 10.0, 15.0, -3.0, 0.1),
            shadow_xl: Shadow::new(0.0, 20.0, 25.0, -5.0, 0.1),
            shadow_2xl: Shadow::new(0.0, 25.0, 50.0, -12.0, 0.25),
            shadow_inner: Shadow::new(0.0, 2.0, 4.0, 0.0, 0.05).inset(),
        }
    }

    /// Shadow tokens for a dark color mode
    pub fn dark() -> Self {
        Self {
            shadow_sm: Shadow::new(0.0, 1.0, 2.0, 0.0, 0.2),
            shadow_md: Shadow::new(0.0, 4.0, 6.0, -1.0, 0.3),
            shadow_lg: Shadow::new(0.0, 10.0, 15.0, -3.0, 0.3),
            shadow_xl: Shadow::new(0.0, 20.0, 25.0, -5.0, 0.3),
            shadow_2xl: Shadow::new(0.0, 25.0, 50.0, -12.0, 0.5),
            shadow_inner: Shadow::new(0.0, 2.0, 4.0, 0.0, 0.15).inset(),
        }
    }
}

/// Expand a preset into a `box-shadow` value for the given mode
pub fn shadow_css(preset: ShadowPreset, mode: ColorMode) -> String {
    ShadowTokens::for_mode(mode).get(preset).to_css()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shadow_css() {
        assert_eq!(
            shadow_css(ShadowPreset::Md, ColorMode::Light),
            "0 4px 6px -1px rgba(0, 0, 0, 0.1)"
        );
        assert_eq!(
            shadow_css(ShadowPreset::Inner, ColorMode::Dark),
            "inset 0 2px 4px 0 rgba(0, 0, 0, 0.15)"
        );
        assert_eq!(shadow_css(ShadowPreset::None, ColorMode::Dark), "none");
    }

    #[test]
    fn test_dark_mode_is_stronger() {
        let light = ShadowTokens::light();
        let dark = ShadowTokens::dark();
        for preset in [
            ShadowPreset::Sm,
            ShadowPreset::Md,
            ShadowPreset::Lg,
            ShadowPreset::Xl,
            ShadowPreset::Xxl,
            ShadowPreset::Inner,
        ] {
            assert!(dark.get(preset).alpha > light.get(preset).alpha, "{preset}");
        }
    }
}
