//! Hearth Theme Engine
//!
//! Turns a declarative, per-element theme configuration into concrete style
//! variables, keeps them consistent across light/dark switches, and supports
//! reversible editing.
//!
//! # Overview
//!
//! - **Color compositing** ([`color`]): combine any color notation with an
//!   opacity fraction
//! - **Cascade** ([`cascade`]): element override → global fallback of the same
//!   kind → palette
//! - **Compilation** ([`compile`]): configuration → flat variable map plus raw
//!   style rules
//! - **Effects** ([`effects`]): typed effect toggles and legacy flags in raw
//!   style text → presentation classes
//! - **Application** ([`apply`]): write a compilation to a live target and
//!   remove element variables the new compilation no longer backs
//! - **Sessions** ([`session`]): compile/apply on every edit with coalesced
//!   undo/redo history
//!
//! # Quick Start
//!
//! ```rust
//! use hearth_theme::{
//!     apply, compile, ApplicationRecord, ColorMode, ElementId, ElementStyle, InMemoryTarget,
//!     ThemeConfiguration,
//! };
//!
//! let card: ElementId = "dashboard-card".parse().unwrap();
//! let config = ThemeConfiguration::default()
//!     .with_element(card, ElementStyle::new().bg("#3cb371").bg_opacity(0.5));
//!
//! let compiled = compile(&config, ColorMode::Dark, "");
//! assert_eq!(compiled.get("--el-dashboard-card-bg"), Some("rgba(60, 179, 113, 0.5)"));
//!
//! let mut target = InMemoryTarget::new();
//! let record = apply(&compiled, &ApplicationRecord::default(), &mut target);
//! assert_eq!(record.len(), 1);
//! ```
//!
//! # Error Handling
//!
//! The engine itself never fails: malformed colors pass through, unconfigured
//! elements resolve to palette defaults, unknown effect flags are ignored.
//! [`ThemeError`] only covers the edges: loading files and parsing
//! identifiers.

pub mod apply;
pub mod cascade;
pub mod color;
pub mod compile;
pub mod config;
pub mod effects;
pub mod element;
pub mod error;
pub mod model;
pub mod presets;
pub mod session;
pub mod shadow;
pub mod snapshot;

// Re-export commonly used types
pub use apply::{apply, ApplicationRecord, InMemoryTarget, StyleBatch, StyleTarget};
pub use cascade::{resolve, ResolvedStyle, ResolvedStyles};
pub use color::apply_opacity;
pub use compile::{compile, CompiledVariables, RawStyleRule, ELEMENT_PREFIX};
pub use config::{load_theme, EngineSettings};
pub use effects::{effect_classes_for, extract_effect_classes, EffectFlags, RainSpeed};
pub use element::{
    BackgroundFill, BorderLineStyle, ElementId, ElementStyle, GlobalElement, Gradient, Page,
    PaletteRole, WidgetKind,
};
pub use error::{Result, ThemeError};
pub use model::{
    ColorMode, LayoutSettings, PaletteColors, PaletteSlot, SurfaceSettings, ThemeConfiguration,
    TypographySettings, UiSettings,
};
pub use presets::ThemePreset;
pub use session::ThemeSession;
pub use shadow::{ShadowPreset, ShadowTokens};
pub use snapshot::ThemeSnapshot;
