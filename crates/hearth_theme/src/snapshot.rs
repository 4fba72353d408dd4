//! History snapshots of the editable configuration

use std::collections::BTreeMap;

use crate::element::{ElementId, ElementStyle};
use crate::model::{
    LayoutSettings, PaletteColors, SurfaceSettings, ThemeConfiguration, TypographySettings,
    UiSettings,
};

/// Immutable copy of the editable subset of a [`ThemeConfiguration`]
///
/// Metadata (name, description) is not part of a snapshot, so renaming a
/// theme never creates an undo step and undo never reverts a rename.
#[derive(Clone, Debug, PartialEq)]
pub struct ThemeSnapshot {
    pub light: PaletteColors,
    pub dark: PaletteColors,
    pub layout: LayoutSettings,
    pub typography: TypographySettings,
    pub ui: UiSettings,
    pub surfaces: SurfaceSettings,
    pub element_styles: BTreeMap<ElementId, ElementStyle>,
}

impl ThemeSnapshot {
    pub fn capture(config: &ThemeConfiguration) -> Self {
        Self {
            light: config.light.clone(),
            dark: config.dark.clone(),
            layout: config.layout.clone(),
            typography: config.typography.clone(),
            ui: config.ui.clone(),
            surfaces: config.surfaces.clone(),
            element_styles: config.element_styles.clone(),
        }
    }

    /// Write the snapshot back, leaving metadata untouched
    pub fn restore_into(&self, config: &mut ThemeConfiguration) {
        config.light = self.light.clone();
        config.dark = self.dark.clone();
        config.layout = self.layout.clone();
        config.typography = self.typography.clone();
        config.ui = self.ui.clone();
        config.surfaces = self.surfaces.clone();
        config.element_styles = self.element_styles.clone();
    }
}

impl From<&ThemeConfiguration> for ThemeSnapshot {
    fn from(config: &ThemeConfiguration) -> Self {
        Self::capture(config)
    }
}
