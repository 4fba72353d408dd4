//! Hearth Core Runtime
//!
//! This crate provides the content-agnostic primitives the theme engine
//! builds on:
//!
//! - **Quiet-period timers**: cancelable single-shot deadlines, re-armed on
//!   every change and driven by the host's tick loop
//! - **Edit history**: a bounded, linear undo/redo stack of opaque snapshots
//!   that coalesces bursts of edits into one entry
//!
//! # Example
//!
//! ```rust
//! use std::time::{Duration, Instant};
//! use hearth_core::history::EditHistory;
//!
//! let start = Instant::now();
//! let mut history = EditHistory::new(0u32, Duration::from_millis(500));
//!
//! // Three quick edits...
//! history.notify_changed(1, start);
//! history.notify_changed(2, start + Duration::from_millis(100));
//! history.notify_changed(3, start + Duration::from_millis(200));
//!
//! // ...become one entry once the quiet period has passed.
//! assert!(history.poll(start + Duration::from_millis(800)));
//! assert_eq!(history.len(), 2);
//! assert_eq!(history.undo(), Some(&0));
//! ```

pub mod history;
pub mod timer;

pub use history::{EditHistory, HistoryState, DEFAULT_HISTORY_LIMIT};
pub use timer::{QuietTimer, TimerGeneration};
