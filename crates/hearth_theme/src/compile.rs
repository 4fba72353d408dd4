//! Variable Compiler
//!
//! Turns a [`ThemeConfiguration`] into a flat, insertion-ordered map of style
//! variables plus a list of raw style rules:
//!
//! - Base variables are always emitted: every palette slot, the user accent,
//!   layout, typography and UI settings, and special-surface colors.
//! - Every element whose resolved style is non-empty gets variables under
//!   `--el-<key>-`, one per set facet, with units appended.
//! - Raw `custom_css` is collected per element under the selector
//!   `[data-theme-element="<key>"]`.
//!
//! Compilation is pure: the same configuration, mode and accent always
//! produce identical output.

use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

use crate::cascade::{ResolvedStyle, ResolvedStyles};
use crate::color::{apply_opacity, format_number};
use crate::element::{BackgroundFill, ElementId};
use crate::model::{ColorMode, PaletteSlot, ThemeConfiguration};
use crate::shadow::shadow_css;

/// Prefix shared by every element-scoped variable
pub const ELEMENT_PREFIX: &str = "--el-";

/// Border color given to page cards and widgets on a filled page background
pub const FRAMED_BORDER_COLOR: &str = "rgba(255, 255, 255, 0.12)";

const DEFAULT_GLOW_SIZE: f32 = 12.0;

/// Blended by an opacity-only background
const CARD_BACKGROUND: &str = "var(--card)";

/// A side-channel rule carrying raw style text for one element
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RawStyleRule {
    pub selector: String,
    pub css: String,
}

/// Output of one compilation
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CompiledVariables {
    variables: IndexMap<String, String>,
    rules: Vec<RawStyleRule>,
}

impl CompiledVariables {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.variables.contains_key(key)
    }

    pub fn variables(&self) -> &IndexMap<String, String> {
        &self.variables
    }

    pub fn rules(&self) -> &[RawStyleRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Iterate `(key, value)` pairs in emission order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.variables.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Keys scoped to an element (`--el-` prefix)
    pub fn element_keys(&self) -> impl Iterator<Item = &str> {
        self.variables
            .keys()
            .map(String::as_str)
            .filter(|key| is_element_key(key))
    }

    /// Render as a stylesheet: a `:root` block followed by the raw rules
    pub fn to_css(&self) -> String {
        render_stylesheet(self.iter(), &self.rules)
    }
}

/// Check if a variable key is element-scoped
pub fn is_element_key(key: &str) -> bool {
    key.starts_with(ELEMENT_PREFIX)
}

/// Variable name for one element facet, e.g. `--el-card-bg`
pub fn element_variable(id: ElementId, property: &str) -> String {
    format!("{ELEMENT_PREFIX}{}-{property}", id.key())
}

/// Attribute selector addressing one element
pub fn element_selector(id: ElementId) -> String {
    format!("[data-theme-element=\"{}\"]", id.key())
}

/// Render variables and raw rules as stylesheet text
pub fn render_stylesheet<'a>(
    variables: impl IntoIterator<Item = (&'a str, &'a str)>,
    rules: &[RawStyleRule],
) -> String {
    let mut css = String::from(":root {\n");
    for (key, value) in variables {
        css.push_str(&format!("  {key}: {value};\n"));
    }
    css.push_str("}\n");
    for rule in rules {
        css.push_str(&format!("\n{} {{\n  {}\n}}\n", rule.selector, rule.css.trim()));
    }
    css
}

fn px(value: f32) -> String {
    format!("{}px", format_number(value))
}

fn deg(value: f32) -> String {
    format!("{}deg", format_number(value))
}

fn percent(value: f32) -> String {
    format!("{}%", format_number(value))
}

// ========== Compilation ==========

/// Compile a configuration for one color mode
///
/// A blank `accent` falls back to the palette's accent slot.
pub fn compile(config: &ThemeConfiguration, mode: ColorMode, accent: &str) -> CompiledVariables {
    let mut variables = IndexMap::new();
    let mut rules = Vec::new();

    emit_base(&mut variables, config, mode, accent);
    let base_count = variables.len();

    let styles = ResolvedStyles::resolve_all(config, mode);
    for id in ElementId::all() {
        let Some(style) = styles.get(id) else {
            continue;
        };
        let framed = is_framed(id, &styles);
        if style.is_empty() && !framed {
            continue;
        }

        emit_element(&mut variables, id, style, mode, framed);

        if let Some(css) = &style.custom_css {
            rules.push(RawStyleRule {
                selector: element_selector(id),
                css: css.clone(),
            });
        }
    }

    debug!(
        "compiled {} variables ({} base, {} element) and {} raw rules for {} mode",
        variables.len(),
        base_count,
        variables.len() - base_count,
        rules.len(),
        mode
    );

    CompiledVariables { variables, rules }
}

fn emit_base(
    vars: &mut IndexMap<String, String>,
    config: &ThemeConfiguration,
    mode: ColorMode,
    accent: &str,
) {
    let palette = config.palette(mode);
    for (slot, color) in palette.iter() {
        vars.insert(slot.variable(), color.to_string());
    }

    let accent = match accent.trim() {
        "" => palette.get(PaletteSlot::Accent),
        accent => accent,
    };
    vars.insert("--user-accent".into(), accent.to_string());

    // Layout
    let layout = &config.layout;
    vars.insert("--sidebar-width".into(), px(layout.sidebar_width));
    vars.insert("--header-height".into(), px(layout.header_height));
    vars.insert("--content-padding".into(), px(layout.content_padding));
    vars.insert("--card-gap".into(), px(layout.card_gap));

    // Typography
    let typography = &config.typography;
    vars.insert("--font-family".into(), typography.font_family.clone());
    vars.insert(
        "--heading-font-family".into(),
        typography.heading_family().to_string(),
    );
    vars.insert("--font-size".into(), px(typography.font_size));
    vars.insert(
        "--line-height".into(),
        format_number(typography.line_height),
    );
    vars.insert("--font-weight".into(), typography.font_weight.to_string());

    // UI
    let ui = &config.ui;
    vars.insert("--radius".into(), px(ui.radius));
    vars.insert("--radius-sm".into(), px(ui.radius_sm()));
    vars.insert("--radius-lg".into(), px(ui.radius_lg()));
    vars.insert("--shadow".into(), shadow_css(ui.shadow, mode));

    // Special surfaces
    let surfaces = &config.surfaces;
    let calendar_today = surfaces
        .calendar_today
        .clone()
        .filter(|c| !c.trim().is_empty())
        .unwrap_or_else(|| "var(--primary)".to_string());
    vars.insert("--calendar-today".into(), calendar_today);
    vars.insert(
        "--leaderboard-gold".into(),
        surfaces.leaderboard_gold.clone(),
    );
    vars.insert(
        "--leaderboard-silver".into(),
        surfaces.leaderboard_silver.clone(),
    );
    vars.insert(
        "--leaderboard-bronze".into(),
        surfaces.leaderboard_bronze.clone(),
    );
}

/// Cards and widgets sitting on a page whose background resolves a fill
fn is_framed(id: ElementId, styles: &ResolvedStyles) -> bool {
    match id {
        ElementId::PageCard(page) | ElementId::PageWidget(page, _) => {
            styles.has_background_fill(ElementId::PageBackground(page))
        }
        _ => false,
    }
}

fn background_value(style: &ResolvedStyle) -> Option<String> {
    let opacity = style.background_opacity.unwrap_or(1.0);
    match &style.background {
        Some(BackgroundFill::Solid(color)) => Some(apply_opacity(color, opacity)),
        Some(BackgroundFill::Gradient(gradient)) => {
            let direction = match gradient.direction.trim() {
                "" => "to bottom",
                direction => direction,
            };
            Some(format!(
                "linear-gradient({}, {}, {})",
                direction,
                apply_opacity(&gradient.from, opacity),
                apply_opacity(&gradient.to, opacity)
            ))
        }
        Some(BackgroundFill::Image(src)) => {
            Some(format!("url(\"{}\")", src.trim().replace('"', "\\\"")))
        }
        // Opacity alone fades the card background
        None => style
            .background_opacity
            .filter(|opacity| *opacity < 1.0)
            .map(|opacity| apply_opacity(CARD_BACKGROUND, opacity)),
    }
}

/// Opacity that cannot be baked into the fill itself
///
/// An image has no color to composite, so its opacity travels in a separate
/// `bg-opacity` variable.
fn background_opacity_value(style: &ResolvedStyle) -> Option<String> {
    match (&style.background, style.background_opacity) {
        (Some(BackgroundFill::Image(_)), Some(opacity)) if opacity < 1.0 => {
            Some(format_number(opacity.max(0.0)))
        }
        _ => None,
    }
}

fn emit_element(
    vars: &mut IndexMap<String, String>,
    id: ElementId,
    style: &ResolvedStyle,
    mode: ColorMode,
    framed: bool,
) {
    let mut set = |property: &str, value: String| {
        vars.insert(element_variable(id, property), value);
    };

    if let Some(bg) = background_value(style) {
        set("bg", bg);
    }
    if let Some(opacity) = background_opacity_value(style) {
        set("bg-opacity", opacity);
    }

    // Text
    let text = &style.text;
    if let Some(color) = &text.color {
        set("color", color.clone());
    }
    if let Some(size) = text.size {
        set("font-size", px(size));
    }
    if let Some(weight) = text.weight {
        set("font-weight", weight.to_string());
    }
    if let Some(family) = &text.family {
        set("font-family", family.clone());
    }

    // Border
    let border = &style.border;
    match &border.color {
        Some(color) => set("border-color", color.clone()),
        None if framed => set("border-color", FRAMED_BORDER_COLOR.to_string()),
        None => {}
    }
    if let Some(width) = border.width {
        set("border-width", px(width));
    }
    if let Some(line) = border.style {
        set("border-style", line.key().to_string());
    }
    if let Some(radius) = border.radius {
        set("radius", px(radius));
    }

    // Effects
    let effects = &style.effects;
    if let Some(shadow) = effects.shadow {
        set("shadow", shadow_css(shadow, mode));
    }
    if let Some(blur) = effects.blur {
        set("blur", px(blur));
    }
    if let Some(opacity) = effects.opacity {
        set("opacity", format_number(opacity));
    }
    if let Some(scale) = effects.scale {
        set("scale", format_number(scale));
    }
    if let Some(rotate) = effects.rotate {
        set("rotate", deg(rotate));
    }
    if let Some(skew) = effects.skew_x {
        set("skew-x", deg(skew));
    }
    if let Some(skew) = effects.skew_y {
        set("skew-y", deg(skew));
    }
    if effects.has_transform() {
        let mut parts = Vec::new();
        if let Some(scale) = effects.scale {
            parts.push(format!("scale({})", format_number(scale)));
        }
        if let Some(rotate) = effects.rotate {
            parts.push(format!("rotate({})", deg(rotate)));
        }
        if let Some(skew) = effects.skew_x {
            parts.push(format!("skewX({})", deg(skew)));
        }
        if let Some(skew) = effects.skew_y {
            parts.push(format!("skewY({})", deg(skew)));
        }
        set("transform", parts.join(" "));
    }
    if let Some(saturation) = effects.saturation {
        set("saturation", percent(saturation));
    }
    if let Some(grayscale) = effects.grayscale {
        set("grayscale", percent(grayscale));
    }
    if effects.has_filter() {
        let mut parts = Vec::new();
        if let Some(blur) = effects.blur {
            parts.push(format!("blur({})", px(blur)));
        }
        if let Some(saturation) = effects.saturation {
            parts.push(format!("saturate({})", percent(saturation)));
        }
        if let Some(grayscale) = effects.grayscale {
            parts.push(format!("grayscale({})", percent(grayscale)));
        }
        set("filter", parts.join(" "));
    }
    if effects.glow_color.is_some() || effects.glow_size.is_some() {
        let color = effects
            .glow_color
            .clone()
            .unwrap_or_else(|| "var(--primary)".to_string());
        let size = effects.glow_size.unwrap_or(DEFAULT_GLOW_SIZE);
        set("glow", format!("0 0 {} {}", px(size), color));
    }
    if let Some(scale) = effects.hover_scale {
        set("hover-scale", format_number(scale));
    }
    if let Some(opacity) = effects.hover_opacity {
        set("hover-opacity", format_number(opacity));
    }

    // Spacing
    if let Some(padding) = style.spacing.padding {
        set("padding", px(padding));
    }
    if let Some(margin) = style.spacing.margin {
        set("margin", px(margin));
    }
}
