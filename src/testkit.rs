//! Test doubles for the producer environment.

use std::collections::VecDeque;

use crate::config::SchedulerConfig;
use crate::models::{Placement, ProducerId, ProducerUnit, ProductionSpec};
use crate::scheduler::{ProducerEnvironment, ProducerPool, StartOutcome};

/// A [`ProducerPool`] whose next start commands can be forced to fail.
#[derive(Debug, Clone)]
pub struct ScriptedEnvironment {
    pub pool: ProducerPool,
    forced: VecDeque<StartOutcome>,
    pub attempts: Vec<(ProducerId, ProductionSpec, Placement)>,
}

impl ScriptedEnvironment {
    pub fn new(count: u32) -> Self {
        Self::from_pool(ProducerPool::from_config(count, &SchedulerConfig::default()))
    }

    pub fn from_pool(pool: ProducerPool) -> Self {
        Self {
            pool,
            forced: VecDeque::new(),
            attempts: Vec::new(),
        }
    }

    /// The next start command answers `outcome` without touching the pool.
    pub fn force(mut self, outcome: StartOutcome) -> Self {
        self.forced.push_back(outcome);
        self
    }
}

impl ProducerEnvironment for ScriptedEnvironment {
    fn producers(&self) -> &[ProducerUnit] {
        self.pool.producers()
    }

    fn start_production(
        &mut self,
        producer: ProducerId,
        spec: &ProductionSpec,
        placement: &Placement,
    ) -> StartOutcome {
        self.attempts.push((producer, *spec, placement.clone()));
        match self.forced.pop_front() {
            Some(outcome) if outcome != StartOutcome::Started => outcome,
            _ => self.pool.start_production(producer, spec, placement),
        }
    }
}
