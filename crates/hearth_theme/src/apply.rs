//! Variable Application & Cleanup
//!
//! Applies a [`CompiledVariables`] to a live style target and removes
//! element-scoped variables left over from the previous application. The
//! previous application is threaded through explicitly as an
//! [`ApplicationRecord`], so nothing is read back from the target.
//!
//! Each compilation is handed to the target as a single [`StyleBatch`]:
//! every compiled key is set, stale element keys are removed, and the raw
//! rules replace whatever was injected before.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use tracing::debug;

use crate::compile::{is_element_key, render_stylesheet, CompiledVariables, RawStyleRule};

/// The host's style primitive
pub trait StyleTarget {
    /// Apply one batch as a unit
    fn apply_batch(&mut self, batch: &StyleBatch);
}

/// Everything one compilation changes on the target
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StyleBatch {
    /// Variables to set, in compiled order
    pub set: Vec<(String, String)>,
    /// Element-scoped variables no longer backed by configuration
    pub remove: Vec<String>,
    /// Raw rules replacing all previously injected rules
    pub rules: Vec<RawStyleRule>,
}

/// The element-scoped keys written by one application
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ApplicationRecord {
    element_keys: BTreeSet<String>,
}

impl ApplicationRecord {
    pub fn element_keys(&self) -> impl Iterator<Item = &str> {
        self.element_keys.iter().map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.element_keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.element_keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.element_keys.is_empty()
    }
}

/// Plan the batch that moves the target from `previous` to `compiled`
pub fn plan(compiled: &CompiledVariables, previous: &ApplicationRecord) -> StyleBatch {
    let current: BTreeSet<&str> = compiled.element_keys().collect();
    let remove = previous
        .element_keys()
        .filter(|key| !current.contains(key))
        .map(str::to_string)
        .collect();

    StyleBatch {
        set: compiled
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect(),
        remove,
        rules: compiled.rules().to_vec(),
    }
}

/// Apply `compiled` to `target`, cleaning up after `previous`
///
/// Returns the record to pass as `previous` next time.
pub fn apply<T: StyleTarget + ?Sized>(
    compiled: &CompiledVariables,
    previous: &ApplicationRecord,
    target: &mut T,
) -> ApplicationRecord {
    let batch = plan(compiled, previous);
    debug!(
        "applying {} variables, removing {} stale, {} raw rules",
        batch.set.len(),
        batch.remove.len(),
        batch.rules.len()
    );
    target.apply_batch(&batch);

    ApplicationRecord {
        element_keys: compiled.element_keys().map(str::to_string).collect(),
    }
}

// ========== In-memory target ==========

/// A [`StyleTarget`] that keeps the applied state in memory
#[derive(Clone, Debug, Default)]
pub struct InMemoryTarget {
    variables: IndexMap<String, String>,
    rules: Vec<RawStyleRule>,
    batches: usize,
}

impl InMemoryTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    pub fn variables(&self) -> &IndexMap<String, String> {
        &self.variables
    }

    /// Element-scoped keys currently present
    pub fn element_keys(&self) -> impl Iterator<Item = &str> {
        self.variables
            .keys()
            .map(String::as_str)
            .filter(|key| is_element_key(key))
    }

    pub fn rules(&self) -> &[RawStyleRule] {
        &self.rules
    }

    /// Number of batches applied so far
    pub fn batch_count(&self) -> usize {
        self.batches
    }

    /// Render the current state as stylesheet text
    pub fn render(&self) -> String {
        render_stylesheet(
            self.variables.iter().map(|(k, v)| (k.as_str(), v.as_str())),
            &self.rules,
        )
    }
}

impl StyleTarget for InMemoryTarget {
    fn apply_batch(&mut self, batch: &StyleBatch) {
        for key in &batch.remove {
            self.variables.shift_remove(key);
        }
        for (key, value) in &batch.set {
            self.variables.insert(key.clone(), value.clone());
        }
        self.rules = batch.rules.clone();
        self.batches += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile::compile;
    use crate::element::{ElementId, ElementStyle, GlobalElement, Page};
    use crate::model::{ColorMode, ThemeConfiguration};

    const CARD: ElementId = ElementId::Global(GlobalElement::Card);

    fn styled() -> ThemeConfiguration {
        ThemeConfiguration::default()
            .with_element(
                CARD,
                ElementStyle::new()
                    .bg("#3cb371")
                    .radius(12.0)
                    .custom_css("outline: 1px solid red;"),
            )
            .with_element(
                ElementId::PageCard(Page::Dashboard),
                ElementStyle::new().padding(20.0),
            )
    }

    #[test]
    fn test_first_application_sets_everything() {
        let compiled = compile(&styled(), ColorMode::Light, "");
        let mut target = InMemoryTarget::new();
        let record = apply(&compiled, &ApplicationRecord::default(), &mut target);

        assert_eq!(target.variables(), compiled.variables());
        assert_eq!(target.rules(), compiled.rules());
        assert_eq!(record.len(), compiled.element_keys().count());
        assert_eq!(target.batch_count(), 1);
    }

    #[test]
    fn test_stale_element_keys_removed() {
        let mut target = InMemoryTarget::new();
        let first = compile(&styled(), ColorMode::Light, "");
        let record = apply(&first, &ApplicationRecord::default(), &mut target);

        let second = compile(&ThemeConfiguration::default(), ColorMode::Light, "");
        let record = apply(&second, &record, &mut target);

        assert_eq!(target.element_keys().count(), 0);
        assert!(target.rules().is_empty());
        assert!(record.is_empty());
        // Base keys stay
        assert!(target.get("--primary").is_some());
    }

    #[test]
    fn test_plan_removes_only_missing_keys() {
        let first = compile(&styled(), ColorMode::Light, "");
        let record = ApplicationRecord {
            element_keys: first.element_keys().map(str::to_string).collect(),
        };

        let config = ThemeConfiguration::default()
            .with_element(CARD, ElementStyle::new().bg("#000000"));
        let second = compile(&config, ColorMode::Light, "");
        let batch = plan(&second, &record);

        let mut removed = batch.remove.clone();
        removed.sort();
        // Every page card inherited the global radius
        let mut expected = vec![
            "--el-card-radius".to_string(),
            "--el-dashboard-card-padding".to_string(),
        ];
        expected.extend(
            Page::ALL
                .iter()
                .map(|page| format!("--el-{}-card-radius", page.key())),
        );
        expected.sort();
        assert_eq!(removed, expected);
        assert!(batch.set.iter().any(|(k, v)| k == "--el-card-bg" && v == "#000000"));
    }

    #[test]
    fn test_render_reflects_applied_state() {
        let compiled = compile(&styled(), ColorMode::Dark, "");
        let mut target = InMemoryTarget::new();
        apply(&compiled, &ApplicationRecord::default(), &mut target);
        assert_eq!(target.render(), compiled.to_css());
    }
}
