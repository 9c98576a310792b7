//! Error types.
//!
//! None of these escape the tick loop as a fault: admission errors drop the
//! request, estimator faults fail safe to a zero wait. They exist so the
//! conditions can be matched on, logged, and reported.

use thiserror::Error;

use crate::models::CapacityBudget;

/// Why a request was refused before reaching a producer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AdmissionError {
    /// The resolved cost is more than the tick has left.
    #[error("cost {cost} exceeds budget {budget}")]
    BudgetExceeded {
        /// Cost the resolver asked for.
        cost: u64,
        /// Budget remaining when the request was checked.
        budget: CapacityBudget,
    },

    /// The resolver could not produce anything for the recipe.
    #[error("recipe resolved to a zero-sized unit")]
    DegenerateSize,
}

/// Internal inconsistency in the wait-time cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no cached wait time at or below priority {priority} ({cached} cached levels)")]
pub struct EstimatorFault {
    /// Priority that was queried.
    pub priority: i32,
    /// Number of priority levels in the cache at the time.
    pub cached: usize,
}

/// Invalid scheduler configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A count or window was set to zero.
    #[error("{field} must be greater than zero")]
    Zero {
        /// Name of the offending field.
        field: &'static str,
    },
}

/// Requester registration failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Every `u32` handle is already assigned.
    #[error("registry full: {len} requesters already registered")]
    Full {
        /// Number of requesters in the registry.
        len: usize,
    },
}
