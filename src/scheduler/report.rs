//! Per-tick allocation report.
//!
//! Every request popped during a tick ends up in exactly one place here:
//! `started`, `dropped`, `deferred`, or `requeued`.
//!
//! | Field | Meaning |
//! |-------|---------|
//! | `started` | Productions begun this tick |
//! | `dropped` | Requests removed without being produced |
//! | `deferred` | Pinned requests set aside and restored after the tick |
//! | `requeued` | Request restored after a transient start failure |
//! | `halted` | The tick stopped early on a transient failure |

use serde::{Deserialize, Serialize};

use crate::error::AdmissionError;
use crate::models::{CapacityBudget, ProducerId, RequestId, RequesterId};

/// A production begun this tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartedProduction {
    /// Request that was started.
    pub request: RequestId,
    /// Producer now building it.
    pub producer: ProducerId,
    /// Requester charged for it.
    pub requester: RequesterId,
    /// Priority bucket it was taken from.
    pub priority: i32,
    /// Cost drawn from the tick's budget.
    pub cost: u64,
    /// Size of the resolved unit.
    pub size: u32,
}

/// Why a request left the queue unproduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DropReason {
    /// Resolved cost exceeded the tick's budget.
    BudgetExceeded {
        /// Cost the resolver asked for.
        cost: u64,
    },
    /// Recipe resolved to nothing.
    DegenerateSize,
    /// The environment refused the start for lack of budget.
    BudgetInsufficient,
    /// Pinned producer was busy and the request was discarded.
    PinnedProducerBusy(ProducerId),
}

impl DropReason {
    /// Whether the drop was caused by budget rather than by the request.
    pub fn is_budget(&self) -> bool {
        matches!(
            self,
            DropReason::BudgetExceeded { .. } | DropReason::BudgetInsufficient
        )
    }
}

impl From<AdmissionError> for DropReason {
    fn from(err: AdmissionError) -> Self {
        match err {
            AdmissionError::BudgetExceeded { cost, .. } => DropReason::BudgetExceeded { cost },
            AdmissionError::DegenerateSize => DropReason::DegenerateSize,
        }
    }
}

/// A request removed without being produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DroppedRequest {
    /// Request that was removed.
    pub request: RequestId,
    /// Requester that asked for it.
    pub requester: RequesterId,
    /// Priority bucket it was taken from.
    pub priority: i32,
    /// Why it was removed.
    pub reason: DropReason,
}

/// Outcome of one [`run`](super::ProductionScheduler::run).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleReport {
    /// Budget the tick ran with.
    pub budget: CapacityBudget,
    /// Budget left after every start was paid for.
    pub remaining: CapacityBudget,
    /// Productions begun, in start order.
    pub started: Vec<StartedProduction>,
    /// Requests removed unproduced, in scan order.
    pub dropped: Vec<DroppedRequest>,
    /// Pinned requests set aside and restored to the front of their bucket.
    pub deferred: Vec<RequestId>,
    /// Request put back after a transient start failure.
    pub requeued: Option<RequestId>,
    /// Whether a transient failure ended the tick early.
    pub halted: bool,
    /// Fraction of producers busy once allocation finished (0.0..1.0).
    pub busy_fraction: f64,
    /// Whether any request was lost to budget.
    pub overloaded: bool,
}

impl CycleReport {
    /// Creates an empty report.
    pub fn new(budget: CapacityBudget) -> Self {
        Self {
            budget,
            remaining: budget,
            started: Vec::new(),
            dropped: Vec::new(),
            deferred: Vec::new(),
            requeued: None,
            halted: false,
            busy_fraction: 0.0,
            overloaded: false,
        }
    }

    /// Total cost of everything started.
    pub fn spent(&self) -> u64 {
        self.started.iter().map(|s| s.cost).sum()
    }

    /// Ids of started requests, in start order.
    pub fn started_ids(&self) -> Vec<RequestId> {
        self.started.iter().map(|s| s.request).collect()
    }

    /// Ids of dropped requests, in drop order.
    pub fn dropped_ids(&self) -> Vec<RequestId> {
        self.dropped.iter().map(|d| d.request).collect()
    }

    pub(crate) fn finish(&mut self, producers: usize, still_idle: usize) {
        self.busy_fraction = if producers == 0 {
            0.0
        } else {
            producers.saturating_sub(still_idle) as f64 / producers as f64
        };
        self.overloaded = self.dropped.iter().any(|d| d.reason.is_budget());
    }
}
