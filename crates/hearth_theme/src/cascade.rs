//! Style Cascade Resolver
//!
//! Resolves the effective style of one element:
//!
//! 1. The override configured for the element itself
//! 2. For page-specific elements, unset facets come from the declared global
//!    fallback (`dashboard-card` → `card`)
//! 3. Anything still unset is reported absent
//!
//! The palette is the implicit last step. The resolver never writes palette
//! colors into its output; the compiler consults the palette for absent
//! facets, so "the theme wants nothing here" stays distinguishable from
//! "the theme wants the ordinary default".

use rustc_hash::FxHashMap;
use serde::Serialize;
use tracing::trace;

use crate::effects::EffectFlags;
use crate::element::{
    BackgroundFill, BorderStyle, EffectStyle, ElementId, ElementStyle, SpacingStyle, TextStyle,
};
use crate::model::{ColorMode, ThemeConfiguration};

/// The effective style of one element after the cascade
///
/// Every facet is either explicitly set or absent.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ResolvedStyle {
    /// Background fill (image > gradient > solid, already decided)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<BackgroundFill>,
    /// Background opacity, applied to whichever background resolves
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_opacity: Option<f32>,
    #[serde(skip_serializing_if = "TextStyle::is_empty")]
    pub text: TextStyle,
    #[serde(skip_serializing_if = "BorderStyle::is_empty")]
    pub border: BorderStyle,
    #[serde(skip_serializing_if = "EffectStyle::is_empty")]
    pub effects: EffectStyle,
    #[serde(skip_serializing_if = "SpacingStyle::is_empty")]
    pub spacing: SpacingStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_css: Option<String>,
    #[serde(skip_serializing_if = "EffectFlags::is_empty")]
    pub animations: EffectFlags,
}

impl ResolvedStyle {
    /// Check if every facet is absent
    pub fn is_empty(&self) -> bool {
        self.background.is_none()
            && self.background_opacity.is_none()
            && self.text.is_empty()
            && self.border.is_empty()
            && self.effects.is_empty()
            && self.spacing.is_empty()
            && self.custom_css.is_none()
            && self.animations.is_empty()
    }
}

impl From<ElementStyle> for ResolvedStyle {
    fn from(style: ElementStyle) -> Self {
        Self {
            background: style.background.fill(),
            background_opacity: style.background.opacity,
            text: style.text,
            border: style.border,
            effects: style.effects,
            spacing: style.spacing,
            custom_css: style.custom_css.filter(|css| !css.trim().is_empty()),
            animations: style.animations,
        }
    }
}

/// Merge the cascade steps for `id` without flattening
fn cascaded_style(id: ElementId, config: &ThemeConfiguration) -> ElementStyle {
    let own = config.element_style(id);
    let inherited = id.fallback().and_then(|fallback| config.element_style(fallback));

    match (inherited, own) {
        (Some(inherited), Some(own)) => inherited.merge(own),
        (Some(only), None) | (None, Some(only)) => only.clone(),
        (None, None) => ElementStyle::default(),
    }
}

/// Resolve the effective style of `id`
///
/// Overrides are mode-independent, so the result does not vary with `mode`;
/// it is accepted so mode-sensitive callers share one entry point.
pub fn resolve(id: ElementId, config: &ThemeConfiguration, mode: ColorMode) -> ResolvedStyle {
    trace!("resolve {} ({})", id, mode);
    ResolvedStyle::from(cascaded_style(id, config))
}

/// Resolved styles for every element identifier
#[derive(Debug, Default)]
pub struct ResolvedStyles {
    styles: FxHashMap<ElementId, ResolvedStyle>,
}

impl ResolvedStyles {
    /// Resolve every known element once
    pub fn resolve_all(config: &ThemeConfiguration, mode: ColorMode) -> Self {
        let styles = ElementId::all()
            .into_iter()
            .map(|id| (id, resolve(id, config, mode)))
            .collect();
        Self { styles }
    }

    /// The resolved style of `id` (empty if unknown)
    pub fn get(&self, id: ElementId) -> Option<&ResolvedStyle> {
        self.styles.get(&id)
    }

    /// Whether the element resolves to a background fill
    pub fn has_background_fill(&self, id: ElementId) -> bool {
        self.get(id).is_some_and(|style| style.background.is_some())
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{GlobalElement, Page, WidgetKind};

    const CARD: ElementId = ElementId::Global(GlobalElement::Card);
    const DASHBOARD_CARD: ElementId = ElementId::PageCard(Page::Dashboard);

    #[test]
    fn test_unconfigured_resolves_empty() {
        let config = ThemeConfiguration::default();
        for id in ElementId::all() {
            assert!(resolve(id, &config, ColorMode::Dark).is_empty(), "{id}");
        }
    }

    #[test]
    fn test_page_specific_falls_back_to_global() {
        let config = ThemeConfiguration::default()
            .with_element(CARD, ElementStyle::new().bg("#ffeedd").radius(6.0))
            .with_element(DASHBOARD_CARD, ElementStyle::new().radius(20.0));

        let resolved = resolve(DASHBOARD_CARD, &config, ColorMode::Light);
        assert_eq!(
            resolved.background,
            Some(BackgroundFill::Solid("#ffeedd".to_string()))
        );
        assert_eq!(resolved.border.radius, Some(20.0));

        // Other pages inherit only the global
        let chores = resolve(ElementId::PageCard(Page::Chores), &config, ColorMode::Light);
        assert_eq!(chores.border.radius, Some(6.0));
    }

    #[test]
    fn test_unset_page_ids_resolve_like_their_fallback() {
        let mut config = ThemeConfiguration::default();
        for (index, kind) in GlobalElement::ALL.into_iter().enumerate() {
            let step = index as f32;
            config = config.with_element(
                ElementId::Global(kind),
                ElementStyle::new()
                    .bg_image(format!("/img/{}.png", kind.key()))
                    .bg_opacity(0.5)
                    .text_color("#102030")
                    .radius(2.0 + step)
                    .padding(4.0 * step)
                    .custom_css("snowfall: on;"),
            );
        }

        for id in ElementId::all() {
            let Some(fallback) = id.fallback() else {
                continue;
            };
            for mode in [ColorMode::Light, ColorMode::Dark] {
                assert_eq!(
                    resolve(id, &config, mode),
                    resolve(fallback, &config, mode),
                    "{id}"
                );
            }
        }
    }

    #[test]
    fn test_opacity_applies_to_inherited_image() {
        let config = ThemeConfiguration::default()
            .with_element(CARD, ElementStyle::new().bg_image("/img/wood.jpg"))
            .with_element(DASHBOARD_CARD, ElementStyle::new().bg_opacity(0.5));

        let resolved = resolve(DASHBOARD_CARD, &config, ColorMode::Light);
        assert_eq!(
            resolved.background,
            Some(BackgroundFill::Image("/img/wood.jpg".to_string()))
        );
        assert_eq!(resolved.background_opacity, Some(0.5));
    }

    #[test]
    fn test_fallback_is_same_kind_only() {
        let config = ThemeConfiguration::default()
            .with_element(CARD, ElementStyle::new().bg("#ffeedd"));

        let widget = ElementId::PageWidget(Page::Dashboard, WidgetKind::Stats);
        assert!(resolve(widget, &config, ColorMode::Light).is_empty());
    }

    #[test]
    fn test_opacity_without_fill_survives() {
        let config = ThemeConfiguration::default()
            .with_element(CARD, ElementStyle::new().bg("#000000"))
            .with_element(DASHBOARD_CARD, ElementStyle::new().bg_opacity(0.5));

        let resolved = resolve(DASHBOARD_CARD, &config, ColorMode::Light);
        assert_eq!(
            resolved.background,
            Some(BackgroundFill::Solid("#000000".to_string()))
        );
        assert_eq!(resolved.background_opacity, Some(0.5));
    }

    #[test]
    fn test_resolution_is_mode_independent() {
        let config = ThemeConfiguration::default()
            .with_element(DASHBOARD_CARD, ElementStyle::new().bg("#3cb371").bg_opacity(0.5));
        assert_eq!(
            resolve(DASHBOARD_CARD, &config, ColorMode::Light),
            resolve(DASHBOARD_CARD, &config, ColorMode::Dark)
        );
    }

    #[test]
    fn test_resolve_all() {
        let config = ThemeConfiguration::default().with_element(
            ElementId::PageBackground(Page::Budget),
            ElementStyle::new().bg_image("/img/budget.jpg"),
        );
        let styles = ResolvedStyles::resolve_all(&config, ColorMode::Light);

        assert_eq!(styles.len(), ElementId::all().len());
        assert!(styles.has_background_fill(ElementId::PageBackground(Page::Budget)));
        assert!(!styles.has_background_fill(ElementId::PageBackground(Page::Chores)));
    }
}
