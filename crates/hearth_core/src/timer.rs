//! Quiet-period timer
//!
//! A cancelable, single-shot deadline. Every call to [`QuietTimer::arm`]
//! replaces the pending deadline and bumps the generation, so at most one
//! deadline is ever outstanding. The host drives the timer from its tick loop
//! via [`QuietTimer::fire_if_due`]; no thread or task is spawned.

use std::time::{Duration, Instant};

/// Generation of an armed deadline
///
/// Each re-arm produces a new generation; a fired generation identifies which
/// arm call it belongs to.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimerGeneration(u64);

impl TimerGeneration {
    /// Raw counter value
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Debounce deadline keyed by a generation counter
#[derive(Clone, Debug)]
pub struct QuietTimer {
    period: Duration,
    generation: u64,
    deadline: Option<Instant>,
}

impl QuietTimer {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            generation: 0,
            deadline: None,
        }
    }

    /// The quiet period between the last arm and expiry
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Arm (or re-arm) the timer relative to `now`
    pub fn arm(&mut self, now: Instant) -> TimerGeneration {
        self.generation = self.generation.wrapping_add(1);
        self.deadline = Some(now.checked_add(self.period).unwrap_or(now));
        TimerGeneration(self.generation)
    }

    /// Cancel the pending deadline. Returns true if one was pending.
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    /// Check if a deadline is outstanding
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Generation of the most recent arm call
    pub fn generation(&self) -> TimerGeneration {
        TimerGeneration(self.generation)
    }

    /// Fire the timer if its deadline has passed
    ///
    /// Firing disarms the timer; a second call with the same `now` returns
    /// `None`.
    pub fn fire_if_due(&mut self, now: Instant) -> Option<TimerGeneration> {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                Some(TimerGeneration(self.generation))
            }
            _ => None,
        }
    }
}
