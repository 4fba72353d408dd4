//! Theme editing session
//!
//! [`ThemeSession`] wires the engine together for one interactive editor:
//!
//! ```text
//! edit ──► compile ──► apply (diff vs previous record) ──► history.notify_changed
//!                                                            │ quiet period
//! tick ──────────────────────────────────────────────────────┴► history entry
//! undo/redo ──► restore snapshot ──► compile ──► apply ──► (echo suppressed)
//! ```
//!
//! The session owns the configuration, the live target and the history.
//! It is single-threaded; the host drives the quiet-period timer by calling
//! [`ThemeSession::tick`] from its event loop.

use std::time::Instant;

use hearth_core::history::{EditHistory, HistoryState};
use tracing::debug;

use crate::apply::{apply, ApplicationRecord, StyleTarget};
use crate::compile::{compile, CompiledVariables};
use crate::config::EngineSettings;
use crate::effects::effect_classes_for;
use crate::element::ElementId;
use crate::model::{ColorMode, ThemeConfiguration};
use crate::snapshot::ThemeSnapshot;

/// One interactive theme editing session
pub struct ThemeSession<T: StyleTarget> {
    config: ThemeConfiguration,
    mode: ColorMode,
    accent: String,
    compiled: CompiledVariables,
    record: ApplicationRecord,
    target: T,
    history: EditHistory<ThemeSnapshot>,
}

impl<T: StyleTarget> ThemeSession<T> {
    /// Start a session and apply the initial configuration
    pub fn new(config: ThemeConfiguration, settings: &EngineSettings, target: T) -> Self {
        let history = EditHistory::with_capacity(
            ThemeSnapshot::capture(&config),
            settings.quiet_period(),
            settings.history_limit,
        );
        let mut session = Self {
            config,
            mode: settings.default_mode,
            accent: String::new(),
            compiled: CompiledVariables::default(),
            record: ApplicationRecord::default(),
            target,
            history,
        };
        session.refresh();
        session
    }

    // ========== Accessors ==========

    pub fn config(&self) -> &ThemeConfiguration {
        &self.config
    }

    pub fn mode(&self) -> ColorMode {
        self.mode
    }

    pub fn accent(&self) -> &str {
        &self.accent
    }

    /// The most recent compilation
    pub fn compiled(&self) -> &CompiledVariables {
        &self.compiled
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn history(&self) -> &EditHistory<ThemeSnapshot> {
        &self.history
    }

    pub fn history_state(&self) -> HistoryState {
        self.history.state()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Presentation classes for one element
    pub fn effect_classes(&self, id: ElementId) -> String {
        effect_classes_for(id, &self.config, self.mode)
    }

    // ========== Editing ==========

    /// Edit the configuration in place
    ///
    /// The result is compiled and applied immediately; history records it
    /// once edits stop for the quiet period.
    pub fn update(&mut self, edit: impl FnOnce(&mut ThemeConfiguration), now: Instant) {
        edit(&mut self.config);
        self.refresh();
        self.history
            .notify_changed(ThemeSnapshot::capture(&self.config), now);
    }

    /// Replace the whole configuration (e.g. after loading a saved theme)
    pub fn replace(&mut self, config: ThemeConfiguration, now: Instant) {
        self.update(|current| *current = config, now);
    }

    /// Switch light/dark mode; not an undoable edit
    pub fn set_mode(&mut self, mode: ColorMode) {
        if self.mode != mode {
            self.mode = mode;
            self.refresh();
        }
    }

    /// Change the user accent; not an undoable edit
    pub fn set_accent(&mut self, accent: impl Into<String>) {
        self.accent = accent.into();
        self.refresh();
    }

    /// Drive the quiet-period timer. Returns true if a history entry was
    /// recorded.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.history.poll(now)
    }

    /// Step back one history entry. Returns false at the oldest entry.
    pub fn undo(&mut self, now: Instant) -> bool {
        match self.history.undo().cloned() {
            Some(snapshot) => {
                self.restore(&snapshot, now);
                true
            }
            None => false,
        }
    }

    /// Step forward one history entry. Returns false at the newest entry.
    pub fn redo(&mut self, now: Instant) -> bool {
        match self.history.redo().cloned() {
            Some(snapshot) => {
                self.restore(&snapshot, now);
                true
            }
            None => false,
        }
    }

    /// End the session, dropping any pending history push
    pub fn close(mut self) -> T {
        self.history.cancel_pending();
        debug!("theme session closed with {} history entries", self.history.len());
        self.target
    }

    // ========== Internals ==========

    fn restore(&mut self, snapshot: &ThemeSnapshot, now: Instant) {
        snapshot.restore_into(&mut self.config);
        self.refresh();
        // The restored state reaches history like any other change; the
        // history ignores this echo.
        self.history
            .notify_changed(ThemeSnapshot::capture(&self.config), now);
    }

    fn refresh(&mut self) {
        self.compiled = compile(&self.config, self.mode, &self.accent);
        self.record = apply(&self.compiled, &self.record, &mut self.target);
    }
}
