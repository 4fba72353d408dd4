//! End-to-end tests for compile → apply → effects
//!
//! These tests verify that:
//! - An unstyled theme compiles to the palette and nothing else
//! - Opacity is baked into element backgrounds losslessly
//! - Legacy effect flags in raw style text become presentation classes
//! - Compilation is idempotent and application never leaks stale keys

use hearth_theme::{
    apply, compile, effect_classes_for, ApplicationRecord, ColorMode, EffectFlags,
    ElementId, ElementStyle, GlobalElement, InMemoryTarget, Page, PaletteSlot, RainSpeed,
    ThemeConfiguration, WidgetKind,
};
use pretty_assertions::assert_eq;

#[test]
fn test_no_overrides_in_dark_mode() {
    let config = ThemeConfiguration::default();
    let compiled = compile(&config, ColorMode::Dark, "");

    for slot in PaletteSlot::ALL {
        assert_eq!(compiled.get(&slot.variable()), Some(config.dark.get(slot)));
    }
    assert_eq!(compiled.element_keys().count(), 0);
    assert!(compiled.rules().is_empty());
    for id in ElementId::all() {
        assert_eq!(effect_classes_for(id, &config, ColorMode::Dark), "", "{id}");
    }
}

#[test]
fn test_dashboard_card_with_half_opacity() {
    let config = ThemeConfiguration::default().with_element(
        ElementId::PageCard(Page::Dashboard),
        ElementStyle::new().bg("#3cb371").bg_opacity(0.5),
    );

    for mode in [ColorMode::Light, ColorMode::Dark] {
        let compiled = compile(&config, mode, "");
        assert_eq!(
            compiled.get("--el-dashboard-card-bg"),
            Some("rgba(60, 179, 113, 0.5)")
        );
    }
}

#[test]
fn test_matrix_rain_from_raw_style_text() {
    let raw = "background-size: cover;\nmatrix-rain: true;\nmatrix-rain-speed: fast;";
    let config = ThemeConfiguration::default().with_element(
        ElementId::Global(GlobalElement::PageBackground),
        ElementStyle::new().custom_css(raw),
    );

    // Page backgrounds inherit the global page background's raw text
    let dashboard = ElementId::PageBackground(Page::Dashboard);
    assert_eq!(
        effect_classes_for(dashboard, &config, ColorMode::Light),
        "effect-matrix-rain effect-matrix-rain-fast"
    );

    // The raw text itself is passed through untouched
    let compiled = compile(&config, ColorMode::Light, "");
    let rule = compiled
        .rules()
        .iter()
        .find(|rule| rule.selector == "[data-theme-element=\"page-background\"]")
        .unwrap();
    assert_eq!(rule.css, raw);
}

#[test]
fn test_typed_flags_override_raw_flags() {
    let id = ElementId::PageBackground(Page::Chores);
    let config = ThemeConfiguration::default().with_element(
        id,
        ElementStyle::new()
            .custom_css("snowfall: on; matrix-rain: on")
            .animations(EffectFlags {
                matrix_rain_speed: Some(RainSpeed::Slow),
                snowfall: Some(false),
                aurora: Some(true),
                ..Default::default()
            }),
    );

    assert_eq!(
        effect_classes_for(id, &config, ColorMode::Dark),
        "effect-matrix-rain effect-aurora effect-matrix-rain-slow"
    );
}

#[test]
fn test_fallback_chain_reaches_widgets() {
    let config = ThemeConfiguration::default()
        .with_element(
            ElementId::Global(GlobalElement::Widget),
            ElementStyle::new().radius(16.0).text_color("#222222"),
        )
        .with_element(
            ElementId::PageWidget(Page::Shopping, WidgetKind::ShoppingList),
            ElementStyle::new().text_color("#0000ff"),
        );
    let compiled = compile(&config, ColorMode::Light, "");

    assert_eq!(
        compiled.get("--el-shopping-widget-shopping-list-color"),
        Some("#0000ff")
    );
    assert_eq!(
        compiled.get("--el-shopping-widget-shopping-list-radius"),
        Some("16px")
    );
    assert_eq!(compiled.get("--el-budget-widget-stats-color"), Some("#222222"));
    // Cards are a different kind
    assert_eq!(compiled.get("--el-budget-card-radius"), None);
}

#[test]
fn test_compilation_is_idempotent() {
    let config = ThemeConfiguration::default()
        .with_element(
            ElementId::Global(GlobalElement::Sidebar),
            ElementStyle::new().bg_gradient("#111", "#333", "to right").blur(4.0),
        )
        .with_element(
            ElementId::PageBackground(Page::Messages),
            ElementStyle::new().bg_image("/img/stars.png"),
        );

    let first = compile(&config, ColorMode::Dark, "#ff8800");
    let second = compile(&config, ColorMode::Dark, "#ff8800");
    assert_eq!(first, second);
    assert_eq!(
        first.iter().collect::<Vec<_>>(),
        second.iter().collect::<Vec<_>>()
    );

    let mut target = InMemoryTarget::new();
    let record = apply(&first, &ApplicationRecord::default(), &mut target);
    let before = target.variables().clone();
    let record_again = apply(&second, &record, &mut target);
    assert_eq!(target.variables(), &before);
    assert_eq!(record_again, record);
}

#[test]
fn test_cleanup_across_a_sequence_of_themes() {
    let themes = [
        ThemeConfiguration::default()
            .with_element(
                ElementId::PageBackground(Page::Dashboard),
                ElementStyle::new().bg_image("/img/cabin.jpg"),
            )
            .with_element(
                ElementId::Global(GlobalElement::Button),
                ElementStyle::new().bg("#c2410c").custom_css("letter-spacing: 1px;"),
            ),
        ThemeConfiguration::default().with_element(
            ElementId::Global(GlobalElement::Badge),
            ElementStyle::new().bg_opacity(0.5),
        ),
        ThemeConfiguration::default(),
    ];

    let mut target = InMemoryTarget::new();
    let mut record = ApplicationRecord::default();
    for theme in &themes {
        let compiled = compile(theme, ColorMode::Light, "");
        record = apply(&compiled, &record, &mut target);

        let mut applied: Vec<&str> = target.element_keys().collect();
        let mut expected: Vec<&str> = compiled.element_keys().collect();
        applied.sort_unstable();
        expected.sort_unstable();
        assert_eq!(applied, expected);
        assert_eq!(target.rules(), compiled.rules());
    }

    assert_eq!(target.element_keys().count(), 0);
    assert_eq!(target.batch_count(), themes.len());
    assert!(record.is_empty());
}
