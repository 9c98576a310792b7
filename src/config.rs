//! Scheduler configuration.
//!
//! All values are in ticks. Missing fields fall back to their defaults
//! when deserialized.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// What happens to a request whose pinned producer is busy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PinnedBusyPolicy {
    /// The request is discarded.
    #[default]
    Drop,
    /// The request is set aside and restored to the front of its bucket
    /// once the tick's allocation loop finishes.
    Defer,
}

/// Tunables for [`ProductionScheduler`](crate::scheduler::ProductionScheduler).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Build time of one part, in ticks.
    pub build_ticks_per_unit: u32,
    /// Typical lifetime of a produced unit. Short EMA window.
    pub unit_lifetime_ticks: u32,
    /// Long EMA window as a multiple of the short one.
    pub long_window_factor: u32,
    /// Handling of requests whose pinned producer is busy.
    pub pinned_busy: PinnedBusyPolicy,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            build_ticks_per_unit: 3,
            unit_lifetime_ticks: 1500,
            long_window_factor: 3,
            pinned_busy: PinnedBusyPolicy::Drop,
        }
    }
}

impl SchedulerConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the per-part build time.
    pub fn with_build_ticks_per_unit(mut self, ticks: u32) -> Self {
        self.build_ticks_per_unit = ticks;
        self
    }

    /// Sets the unit lifetime (short smoothing window).
    pub fn with_unit_lifetime(mut self, ticks: u32) -> Self {
        self.unit_lifetime_ticks = ticks;
        self
    }

    /// Sets the long window multiplier.
    pub fn with_long_window_factor(mut self, factor: u32) -> Self {
        self.long_window_factor = factor;
        self
    }

    /// Sets the pinned-busy policy.
    pub fn with_pinned_busy(mut self, policy: PinnedBusyPolicy) -> Self {
        self.pinned_busy = policy;
        self
    }

    /// Short smoothing window.
    pub fn short_window(&self) -> f64 {
        f64::from(self.unit_lifetime_ticks)
    }

    /// Long smoothing window.
    pub fn long_window(&self) -> f64 {
        f64::from(self.unit_lifetime_ticks) * f64::from(self.long_window_factor)
    }

    /// Checks that every tunable is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.build_ticks_per_unit == 0 {
            return Err(ConfigError::Zero {
                field: "build_ticks_per_unit",
            });
        }
        if self.unit_lifetime_ticks == 0 {
            return Err(ConfigError::Zero {
                field: "unit_lifetime_ticks",
            });
        }
        if self.long_window_factor == 0 {
            return Err(ConfigError::Zero {
                field: "long_window_factor",
            });
        }
        Ok(())
    }
}
