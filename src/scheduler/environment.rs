//! Producer environment seam.
//!
//! The scheduler never owns producers. It reads their state and issues
//! start commands through [`ProducerEnvironment`]. [`ProducerPool`] is a
//! self-contained in-memory implementation for hosts that simulate their
//! producers directly.

use serde::{Deserialize, Serialize};

use crate::config::SchedulerConfig;
use crate::models::{Placement, ProducerId, ProducerUnit, ProductionSpec};

/// Result of a start command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StartOutcome {
    /// Production began.
    Started,
    /// The producer is occupied.
    ProducerBusy,
    /// The environment could not pay for the spec.
    BudgetInsufficient,
    /// Any other refusal. Treated as transient.
    OtherFailure,
}

/// Producers as seen by the scheduler.
pub trait ProducerEnvironment {
    /// Every producer, busy or idle.
    fn producers(&self) -> &[ProducerUnit];

    /// Producers free to start work this tick, in preference order.
    fn idle_producers(&self) -> Vec<ProducerId> {
        self.producers()
            .iter()
            .filter(|p| !p.is_busy())
            .map(|p| p.id)
            .collect()
    }

    /// Begins building `spec` on `producer`.
    fn start_production(
        &mut self,
        producer: ProducerId,
        spec: &ProductionSpec,
        placement: &Placement,
    ) -> StartOutcome;
}

/// In-memory producer table.
///
/// A started producer stays busy for `spec.size * ticks_per_unit` ticks,
/// counted down by [`ProducerPool::tick`]. The wait-time estimator projects
/// with [`SchedulerConfig::build_ticks_per_unit`], so a pool driven by a
/// scheduler should be built with [`ProducerPool::from_config`].
#[derive(Debug, Clone)]
pub struct ProducerPool {
    producers: Vec<ProducerUnit>,
    ticks_per_unit: u32,
}

impl ProducerPool {
    /// Creates `count` idle producers with ids `0..count`.
    pub fn new(count: u32, ticks_per_unit: u32) -> Self {
        Self {
            producers: (0..count).map(|i| ProducerUnit::idle(ProducerId(i))).collect(),
            ticks_per_unit,
        }
    }

    /// Creates `count` idle producers building at the configured rate.
    pub fn from_config(count: u32, config: &SchedulerConfig) -> Self {
        Self::new(count, config.build_ticks_per_unit)
    }

    /// Creates a pool from explicit producer states.
    pub fn from_units(producers: Vec<ProducerUnit>, ticks_per_unit: u32) -> Self {
        Self {
            producers,
            ticks_per_unit,
        }
    }

    /// Build ticks per unit of spec size.
    pub fn ticks_per_unit(&self) -> u32 {
        self.ticks_per_unit
    }

    /// Looks up a producer.
    pub fn get(&self, id: ProducerId) -> Option<&ProducerUnit> {
        self.producers.iter().find(|p| p.id == id)
    }

    /// Advances every producer by one tick. Returns the producers that
    /// became idle.
    pub fn tick(&mut self) -> Vec<ProducerId> {
        self.producers
            .iter_mut()
            .filter_map(|p| p.tick().then_some(p.id))
            .collect()
    }

    /// Number of busy producers.
    pub fn busy_count(&self) -> usize {
        self.producers.iter().filter(|p| p.is_busy()).count()
    }
}

impl ProducerEnvironment for ProducerPool {
    fn producers(&self) -> &[ProducerUnit] {
        &self.producers
    }

    fn start_production(
        &mut self,
        producer: ProducerId,
        spec: &ProductionSpec,
        placement: &Placement,
    ) -> StartOutcome {
        let ticks = spec.build_ticks(self.ticks_per_unit);
        let Some(unit) = self.producers.iter_mut().find(|p| p.id == producer) else {
            return StartOutcome::OtherFailure;
        };
        if unit.is_busy() {
            return StartOutcome::ProducerBusy;
        }
        if ticks == 0 {
            return StartOutcome::OtherFailure;
        }
        unit.remaining_ticks = ticks;
        unit.directions = placement.directions.clone();
        StartOutcome::Started
    }
}
