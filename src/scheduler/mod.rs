//! Tick-driven production scheduling.
//!
//! Provides the orchestrator that allocates idle producers to queued
//! requests, the environment seam it drives producers through, and the
//! per-tick report.
//!
//! # Example
//!
//! ```
//! use u_production::config::SchedulerConfig;
//! use u_production::models::{CapacityBudget, ProductionRequest, Recipe, Registry};
//! use u_production::scheduler::{ProducerEnvironment, ProducerPool, ProductionScheduler};
//!
//! # fn main() -> Result<(), u_production::error::RegistryError> {
//! let config = SchedulerConfig::default();
//! let mut registry = Registry::new();
//! let miner = registry.register("miner")?;
//! let mut pool = ProducerPool::from_config(1, &config);
//! let mut scheduler = ProductionScheduler::new(config);
//!
//! scheduler.enqueue(ProductionRequest::new(1, miner, Recipe::fixed(2, 50)));
//! scheduler.enqueue(ProductionRequest::new(0, miner, Recipe::fixed(1, 50)));
//!
//! let report = scheduler.run(&mut pool, &mut registry, CapacityBudget(300));
//! assert_eq!(report.started.len(), 1);
//! assert_eq!(report.started[0].priority, 0);
//! assert_eq!(scheduler.queue().len(), 1);
//!
//! // One part at 3 ticks/part spread over one producer, plus the two parts queued.
//! let wait = scheduler.wait_time(1, pool.producers());
//! assert!((wait - 9.0).abs() < 1e-10);
//!
//! // Next tick: the producer has finished, only the queued parts remain.
//! for _ in 0..3 {
//!     pool.tick();
//! }
//! scheduler.begin_tick(CapacityBudget(300));
//! assert!((scheduler.wait_time(1, pool.producers()) - 6.0).abs() < 1e-10);
//! # Ok(())
//! # }
//! ```

mod environment;
mod production;
mod report;

pub use environment::{ProducerEnvironment, ProducerPool, StartOutcome};
pub use production::ProductionScheduler;
pub use report::{CycleReport, DropReason, DroppedRequest, StartedProduction};
