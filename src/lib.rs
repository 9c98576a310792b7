//! Production scheduling for the U-Engine ecosystem.
//!
//! Decides, once per tick, which queued production requests a small pool of
//! identical producers should start, under a shared capacity budget. Also
//! projects how long a not-yet-serviced request will wait and keeps smoothed
//! utilization statistics.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `ProductionRequest`, `Recipe`,
//!   `ProducerUnit`, `CapacityBudget`, `Registry`
//! - **`queue`**: Priority buckets, FIFO within a priority
//! - **`admission`**: Recipe resolution and budget admission
//! - **`estimator`**: Lazily cached wait-time projection
//! - **`stats`**: Exponentially smoothed utilization and overload
//! - **`scheduler`**: The per-tick allocation loop
//! - **`validation`**: Optional pre-enqueue request checks
//!
//! # Architecture
//!
//! Everything runs synchronously inside one tick. The scheduler owns the
//! queue and derived state; producers, requesters, and the budget are owned
//! by the host and lent to [`scheduler::ProductionScheduler::run`].

pub mod admission;
pub mod config;
pub mod error;
pub mod estimator;
pub mod models;
pub mod queue;
pub mod scheduler;
pub mod stats;
pub mod validation;

#[cfg(test)]
mod testkit;
