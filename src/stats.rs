//! Producer utilization metrics.
//!
//! Exponentially smoothed, updated once per tick.
//!
//! # Metrics
//!
//! | Metric | Sample | Window |
//! |--------|--------|--------|
//! | `utilization` | Fraction of producers busy | short |
//! | `overload` | 1.0 if a request was lost to budget, else 0.0 | short |
//! | `long_utilization` | Fraction of producers busy | long |
//!
//! Update rule: `new = old + (sample - old) / window`.

use serde::{Deserialize, Serialize};

use crate::config::SchedulerConfig;

/// Smoothed metrics persisted across ticks.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StatsState {
    /// Fraction of producers busy, short window (0.0..1.0).
    pub utilization: f64,
    /// Rate of budget-limited ticks, short window (0.0..1.0).
    pub overload: f64,
    /// Fraction of producers busy, long window (0.0..1.0).
    pub long_utilization: f64,
}

/// Maintains [`StatsState`] from per-tick samples.
#[derive(Debug, Clone)]
pub struct StatsTracker {
    state: StatsState,
    short_window: f64,
    long_window: f64,
    samples: u64,
}

impl StatsTracker {
    /// Creates a tracker with explicit windows (both clamped to at least 1).
    pub fn new(short_window: f64, long_window: f64) -> Self {
        Self {
            state: StatsState::default(),
            short_window: short_window.max(1.0),
            long_window: long_window.max(1.0),
            samples: 0,
        }
    }

    /// Creates a tracker with the configured windows.
    pub fn from_config(config: &SchedulerConfig) -> Self {
        Self::new(config.short_window(), config.long_window())
    }

    /// Resumes from a previously persisted state.
    pub fn with_state(mut self, state: StatsState) -> Self {
        self.state = state;
        self
    }

    /// Folds one tick's sample into the averages.
    pub fn record_cycle(&mut self, busy_fraction: f64, overloaded: bool) {
        let busy = if busy_fraction.is_nan() {
            0.0
        } else {
            busy_fraction.clamp(0.0, 1.0)
        };
        let overload = if overloaded { 1.0 } else { 0.0 };

        self.state.utilization = ema(self.state.utilization, busy, self.short_window);
        self.state.overload = ema(self.state.overload, overload, self.short_window);
        self.state.long_utilization = ema(self.state.long_utilization, busy, self.long_window);
        self.samples += 1;
    }

    /// Current smoothed values.
    pub fn state(&self) -> StatsState {
        self.state
    }

    /// Number of recorded ticks.
    pub fn samples(&self) -> u64 {
        self.samples
    }
}

fn ema(old: f64, sample: f64, window: f64) -> f64 {
    old + (sample - old) / window
}
