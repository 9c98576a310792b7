//! Producer model.
//!
//! Producers are owned by the environment. The scheduler only observes
//! their state and issues start commands; a producer returns to idle purely
//! by tick progression.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Direction;

/// Handle of a producer in the environment's producer table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProducerId(pub u32);

/// Observed state of one producer unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProducerUnit {
    /// Producer identity.
    pub id: ProducerId,
    /// Ticks until the producer becomes idle (0 = idle).
    pub remaining_ticks: u32,
    /// Exit directions the current production was started with.
    pub directions: Option<Vec<Direction>>,
}

impl ProducerUnit {
    /// Creates an idle producer.
    pub fn idle(id: ProducerId) -> Self {
        Self {
            id,
            remaining_ticks: 0,
            directions: None,
        }
    }

    /// Creates a producer busy for `remaining_ticks` more ticks.
    pub fn busy(id: ProducerId, remaining_ticks: u32) -> Self {
        Self {
            id,
            remaining_ticks,
            directions: None,
        }
    }

    /// Whether the producer is currently occupied.
    pub fn is_busy(&self) -> bool {
        self.remaining_ticks > 0
    }

    /// Advances one tick. Returns `true` if the producer just became idle.
    pub fn tick(&mut self) -> bool {
        if self.remaining_ticks == 0 {
            return false;
        }
        self.remaining_ticks -= 1;
        if self.remaining_ticks == 0 {
            self.directions = None;
            true
        } else {
            false
        }
    }
}

/// Total resource budget available for starting production this tick.
///
/// Shared across all producers, not per producer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct CapacityBudget(pub u64);

impl CapacityBudget {
    /// Raw budget value.
    pub fn get(self) -> u64 {
        self.0
    }

    /// Deducts a started production's cost, saturating at zero.
    pub fn spend(&mut self, cost: u64) {
        self.0 = self.0.saturating_sub(cost);
    }
}

impl fmt::Display for CapacityBudget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
