//! Themeable element identifiers and per-element style overrides
//!
//! # Identifiers
//!
//! An [`ElementId`] names one themeable surface. Global identifiers apply
//! everywhere; page-specific identifiers apply within one page and declare a
//! global fallback of the same kind:
//!
//! | Key                          | Falls back to      |
//! |------------------------------|--------------------|
//! | `card`, `sidebar`, ...       | (palette)          |
//! | `<page>-background`          | `page-background`  |
//! | `<page>-card`                | `card`             |
//! | `<page>-widget-<widget>`     | `widget`           |
//!
//! # Styles
//!
//! [`ElementStyle`] is sparse: every facet is optional and an unset facet
//! inherits from the next cascade step rather than resetting to empty.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::effects::EffectFlags;
use crate::error::ThemeError;
use crate::model::PaletteSlot;
use crate::shadow::ShadowPreset;

// ========== Identifiers ==========

/// Global element kinds
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub enum GlobalElement {
    Card,
    Sidebar,
    Header,
    Button,
    Input,
    Badge,
    Modal,
    Widget,
    PageBackground,
}

impl GlobalElement {
    pub const ALL: [GlobalElement; 9] = [
        Self::Card,
        Self::Sidebar,
        Self::Header,
        Self::Button,
        Self::Input,
        Self::Badge,
        Self::Modal,
        Self::Widget,
        Self::PageBackground,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::Card => "card",
            Self::Sidebar => "sidebar",
            Self::Header => "header",
            Self::Button => "button",
            Self::Input => "input",
            Self::Badge => "badge",
            Self::Modal => "modal",
            Self::Widget => "widget",
            Self::PageBackground => "page-background",
        }
    }

    /// Palette slots this kind semantically maps to
    pub fn palette_role(self) -> PaletteRole {
        match self {
            Self::Button => PaletteRole::new(PaletteSlot::Primary, PaletteSlot::PrimaryForeground),
            Self::Input | Self::PageBackground => {
                PaletteRole::new(PaletteSlot::Background, PaletteSlot::Foreground)
            }
            Self::Badge => PaletteRole::new(PaletteSlot::Accent, PaletteSlot::AccentForeground),
            Self::Card | Self::Sidebar | Self::Header | Self::Modal | Self::Widget => {
                PaletteRole::new(PaletteSlot::Card, PaletteSlot::CardForeground)
            }
        }
    }
}

/// Pages that carry page-specific element identifiers
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub enum Page {
    Dashboard,
    Chores,
    Shopping,
    PaidChores,
    Calendar,
    Budget,
    Messages,
}

impl Page {
    pub const ALL: [Page; 7] = [
        Self::Dashboard,
        Self::Chores,
        Self::Shopping,
        Self::PaidChores,
        Self::Calendar,
        Self::Budget,
        Self::Messages,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Chores => "chores",
            Self::Shopping => "shopping",
            Self::PaidChores => "paid-chores",
            Self::Calendar => "calendar",
            Self::Budget => "budget",
            Self::Messages => "messages",
        }
    }
}

/// Widgets that can be placed on a page
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub enum WidgetKind {
    Stats,
    Leaderboard,
    ChoreList,
    ShoppingList,
    Calendar,
    BudgetSummary,
    Messages,
}

impl WidgetKind {
    pub const ALL: [WidgetKind; 7] = [
        Self::Stats,
        Self::Leaderboard,
        Self::ChoreList,
        Self::ShoppingList,
        Self::Calendar,
        Self::BudgetSummary,
        Self::Messages,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::Stats => "stats",
            Self::Leaderboard => "leaderboard",
            Self::ChoreList => "chore-list",
            Self::ShoppingList => "shopping-list",
            Self::Calendar => "calendar",
            Self::BudgetSummary => "budget-summary",
            Self::Messages => "messages",
        }
    }
}

/// Background/foreground palette slots for an element
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PaletteRole {
    pub background: PaletteSlot,
    pub foreground: PaletteSlot,
}

impl PaletteRole {
    pub const fn new(background: PaletteSlot, foreground: PaletteSlot) -> Self {
        Self {
            background,
            foreground,
        }
    }
}

/// A themeable surface
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ElementId {
    Global(GlobalElement),
    PageBackground(Page),
    PageCard(Page),
    PageWidget(Page, WidgetKind),
}

impl ElementId {
    /// Every identifier: globals first, then per page its background, card
    /// and widgets
    pub fn all() -> Vec<ElementId> {
        let mut ids: Vec<ElementId> = GlobalElement::ALL.into_iter().map(Self::Global).collect();
        for page in Page::ALL {
            ids.push(Self::PageBackground(page));
            ids.push(Self::PageCard(page));
            ids.extend(
                WidgetKind::ALL
                    .into_iter()
                    .map(|widget| Self::PageWidget(page, widget)),
            );
        }
        ids
    }

    /// Stable string key, e.g. `dashboard-widget-stats`
    pub fn key(&self) -> String {
        match self {
            Self::Global(kind) => kind.key().to_string(),
            Self::PageBackground(page) => format!("{}-background", page.key()),
            Self::PageCard(page) => format!("{}-card", page.key()),
            Self::PageWidget(page, widget) => {
                format!("{}-widget-{}", page.key(), widget.key())
            }
        }
    }

    pub fn is_global(&self) -> bool {
        matches!(self, Self::Global(_))
    }

    /// The page this identifier is scoped to
    pub fn page(&self) -> Option<Page> {
        match self {
            Self::Global(_) => None,
            Self::PageBackground(page) | Self::PageCard(page) | Self::PageWidget(page, _) => {
                Some(*page)
            }
        }
    }

    /// The global kind this identifier belongs to
    pub fn kind(&self) -> GlobalElement {
        match self {
            Self::Global(kind) => *kind,
            Self::PageBackground(_) => GlobalElement::PageBackground,
            Self::PageCard(_) => GlobalElement::Card,
            Self::PageWidget(..) => GlobalElement::Widget,
        }
    }

    /// Declared global fallback for page-specific identifiers
    pub fn fallback(&self) -> Option<ElementId> {
        match self {
            Self::Global(_) => None,
            _ => Some(Self::Global(self.kind())),
        }
    }

    pub fn palette_role(&self) -> PaletteRole {
        self.kind().palette_role()
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

impl FromStr for ElementId {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        if let Some(kind) = GlobalElement::ALL.into_iter().find(|k| k.key() == key) {
            return Ok(Self::Global(kind));
        }

        for page in Page::ALL {
            let Some(rest) = key
                .strip_prefix(page.key())
                .and_then(|rest| rest.strip_prefix('-'))
            else {
                continue;
            };
            match rest {
                "background" => return Ok(Self::PageBackground(page)),
                "card" => return Ok(Self::PageCard(page)),
                _ => {}
            }
            if let Some(widget) = rest
                .strip_prefix("widget-")
                .and_then(|w| WidgetKind::ALL.into_iter().find(|k| k.key() == w))
            {
                return Ok(Self::PageWidget(page, widget));
            }
        }

        Err(ThemeError::UnknownElement(s.to_string()))
    }
}

impl TryFrom<String> for ElementId {
    type Error = ThemeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ElementId> for String {
    fn from(id: ElementId) -> Self {
        id.key()
    }
}

// ========== Style Facets ==========

/// Gradient background
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Gradient {
    pub from: String,
    pub to: String,
    /// Direction keyword (`to right`) or angle (`135deg`)
    #[serde(default = "default_gradient_direction")]
    pub direction: String,
}

fn default_gradient_direction() -> String {
    "to bottom".to_string()
}

/// A resolved background fill
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundFill {
    Solid(String),
    Gradient(Gradient),
    Image(String),
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BackgroundStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gradient: Option<Gradient>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Opacity in [0, 1], applied to whatever background resolves
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f32>,
}

impl BackgroundStyle {
    /// The fill this step supplies: image > gradient > solid
    pub fn fill(&self) -> Option<BackgroundFill> {
        if let Some(image) = non_blank(&self.image) {
            return Some(BackgroundFill::Image(image.to_string()));
        }
        if let Some(gradient) = &self.gradient {
            return Some(BackgroundFill::Gradient(gradient.clone()));
        }
        non_blank(&self.color).map(|color| BackgroundFill::Solid(color.to_string()))
    }

    pub fn has_fill(&self) -> bool {
        self.fill().is_some()
    }

    pub fn is_empty(&self) -> bool {
        !self.has_fill() && self.opacity.is_none()
    }

    /// Merge overrides on top of this background
    ///
    /// The fill moves as one unit: if `other` supplies any fill, all of
    /// `self`'s fill fields are dropped. Opacity merges independently.
    pub fn merge(&self, other: &BackgroundStyle) -> BackgroundStyle {
        let fill_source = if other.has_fill() { other } else { self };
        BackgroundStyle {
            color: fill_source.color.clone(),
            gradient: fill_source.gradient.clone(),
            image: fill_source.image.clone(),
            opacity: other.opacity.or(self.opacity),
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TextStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Font size (px)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
}

impl TextStyle {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn merge(&self, other: &TextStyle) -> TextStyle {
        TextStyle {
            color: other.color.clone().or_else(|| self.color.clone()),
            size: other.size.or(self.size),
            weight: other.weight.or(self.weight),
            family: other.family.clone().or_else(|| self.family.clone()),
        }
    }
}

/// Border line style
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderLineStyle {
    Solid,
    Dashed,
    Dotted,
    Double,
    None,
}

impl BorderLineStyle {
    pub fn key(self) -> &'static str {
        match self {
            Self::Solid => "solid",
            Self::Dashed => "dashed",
            Self::Dotted => "dotted",
            Self::Double => "double",
            Self::None => "none",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BorderStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Border width (px)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    /// Corner radius (px)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<BorderLineStyle>,
}

impl BorderStyle {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn merge(&self, other: &BorderStyle) -> BorderStyle {
        BorderStyle {
            color: other.color.clone().or_else(|| self.color.clone()),
            width: other.width.or(self.width),
            radius: other.radius.or(self.radius),
            style: other.style.or(self.style),
        }
    }
}

/// Visual effects: shadow, filters, 2D transform, glow, hover state
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct EffectStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shadow: Option<ShadowPreset>,
    /// Backdrop blur radius (px)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blur: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f32>,
    /// Rotation (deg)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotate: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skew_x: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skew_y: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glow_color: Option<String>,
    /// Glow spread (px)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glow_size: Option<f32>,
    /// Saturation (%)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saturation: Option<f32>,
    /// Grayscale (%)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grayscale: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hover_scale: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hover_opacity: Option<f32>,
}

impl EffectStyle {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn has_transform(&self) -> bool {
        self.scale.is_some() || self.rotate.is_some() || self.skew_x.is_some() || self.skew_y.is_some()
    }

    pub fn has_filter(&self) -> bool {
        self.blur.is_some() || self.saturation.is_some() || self.grayscale.is_some()
    }

    pub fn merge(&self, other: &EffectStyle) -> EffectStyle {
        EffectStyle {
            shadow: other.shadow.or(self.shadow),
            blur: other.blur.or(self.blur),
            opacity: other.opacity.or(self.opacity),
            scale: other.scale.or(self.scale),
            rotate: other.rotate.or(self.rotate),
            skew_x: other.skew_x.or(self.skew_x),
            skew_y: other.skew_y.or(self.skew_y),
            glow_color: other.glow_color.clone().or_else(|| self.glow_color.clone()),
            glow_size: other.glow_size.or(self.glow_size),
            saturation: other.saturation.or(self.saturation),
            grayscale: other.grayscale.or(self.grayscale),
            hover_scale: other.hover_scale.or(self.hover_scale),
            hover_opacity: other.hover_opacity.or(self.hover_opacity),
        }
    }
}

/// Padding and margin (px)
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SpacingStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin: Option<f32>,
}

impl SpacingStyle {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn merge(&self, other: &SpacingStyle) -> SpacingStyle {
        SpacingStyle {
            padding: other.padding.or(self.padding),
            margin: other.margin.or(self.margin),
        }
    }
}

// ========== Element Style ==========

/// Sparse style override for one element
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ElementStyle {
    #[serde(skip_serializing_if = "BackgroundStyle::is_empty")]
    pub background: BackgroundStyle,
    #[serde(skip_serializing_if = "TextStyle::is_empty")]
    pub text: TextStyle,
    #[serde(skip_serializing_if = "BorderStyle::is_empty")]
    pub border: BorderStyle,
    #[serde(skip_serializing_if = "EffectStyle::is_empty")]
    pub effects: EffectStyle,
    #[serde(skip_serializing_if = "SpacingStyle::is_empty")]
    pub spacing: SpacingStyle,
    /// Raw style text for properties with no structured facet
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_css: Option<String>,
    #[serde(skip_serializing_if = "EffectFlags::is_empty")]
    pub animations: EffectFlags,
}

impl ElementStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if no facet is set
    pub fn is_empty(&self) -> bool {
        self.background.is_empty()
            && self.text.is_empty()
            && self.border.is_empty()
            && self.effects.is_empty()
            && self.spacing.is_empty()
            && non_blank(&self.custom_css).is_none()
            && self.animations.is_empty()
    }

    /// Merge another style on top of this one
    ///
    /// Facets set in `other` take precedence over facets in `self`.
    pub fn merge(&self, other: &ElementStyle) -> ElementStyle {
        ElementStyle {
            background: self.background.merge(&other.background),
            text: self.text.merge(&other.text),
            border: self.border.merge(&other.border),
            effects: self.effects.merge(&other.effects),
            spacing: self.spacing.merge(&other.spacing),
            custom_css: non_blank(&other.custom_css)
                .or_else(|| non_blank(&self.custom_css))
                .map(str::to_string),
            animations: self.animations.merge(&other.animations),
        }
    }

    // ========== Builder methods ==========

    pub fn bg(mut self, color: impl Into<String>) -> Self {
        self.background.color = Some(color.into());
        self
    }

    pub fn bg_gradient(
        mut self,
        from: impl Into<String>,
        to: impl Into<String>,
        direction: impl Into<String>,
    ) -> Self {
        self.background.gradient = Some(Gradient {
            from: from.into(),
            to: to.into(),
            direction: direction.into(),
        });
        self
    }

    pub fn bg_image(mut self, url: impl Into<String>) -> Self {
        self.background.image = Some(url.into());
        self
    }

    pub fn bg_opacity(mut self, opacity: f32) -> Self {
        self.background.opacity = Some(opacity);
        self
    }

    pub fn text_color(mut self, color: impl Into<String>) -> Self {
        self.text.color = Some(color.into());
        self
    }

    pub fn font_size(mut self, size: f32) -> Self {
        self.text.size = Some(size);
        self
    }

    pub fn border_color(mut self, color: impl Into<String>) -> Self {
        self.border.color = Some(color.into());
        self
    }

    pub fn border_width(mut self, width: f32) -> Self {
        self.border.width = Some(width);
        self
    }

    pub fn radius(mut self, radius: f32) -> Self {
        self.border.radius = Some(radius);
        self
    }

    pub fn shadow(mut self, shadow: ShadowPreset) -> Self {
        self.effects.shadow = Some(shadow);
        self
    }

    pub fn scale(mut self, scale: f32) -> Self {
        self.effects.scale = Some(scale);
        self
    }

    pub fn rotate(mut self, degrees: f32) -> Self {
        self.effects.rotate = Some(degrees);
        self
    }

    pub fn blur(mut self, radius: f32) -> Self {
        self.effects.blur = Some(radius);
        self
    }

    pub fn glow(mut self, color: impl Into<String>, size: f32) -> Self {
        self.effects.glow_color = Some(color.into());
        self.effects.glow_size = Some(size);
        self
    }

    pub fn padding(mut self, padding: f32) -> Self {
        self.spacing.padding = Some(padding);
        self
    }

    pub fn custom_css(mut self, css: impl Into<String>) -> Self {
        self.custom_css = Some(css.into());
        self
    }

    pub fn animations(mut self, flags: EffectFlags) -> Self {
        self.animations = flags;
        self
    }
}
