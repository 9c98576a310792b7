//! Queueing-delay estimation.
//!
//! Projects how long a request at a given priority will wait before a
//! producer picks it up. The projection is memoized per priority level and
//! rebuilt lazily on the first query after the cache is marked dirty.
//!
//! # Model
//!
//! ```text
//! base      = Σ remaining_ticks(p) / |producers|
//! wait(k)   = base + Σ_{priority ≤ k} Σ_{r in bucket} ticks_per_unit * size(r) / |producers|
//! ```
//!
//! Queued work is spread evenly across all producers, so this is an
//! average-case figure, not a simulation.

use std::collections::BTreeMap;

use tracing::{error, trace};

use crate::error::EstimatorFault;
use crate::models::{ProducerUnit, ProductionRequest};
use crate::queue::ProductionQueue;

/// Lazily rebuilt map from priority level to projected wait (ticks).
#[derive(Debug, Clone)]
pub struct WaitTimeEstimator {
    cache: BTreeMap<i32, f64>,
    dirty: bool,
    rebuilds: u64,
}

impl WaitTimeEstimator {
    /// Creates an estimator with an empty, dirty cache.
    pub fn new() -> Self {
        Self {
            cache: BTreeMap::new(),
            dirty: true,
            rebuilds: 0,
        }
    }

    /// Marks the cache stale.
    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    /// Whether the next query will rebuild.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Number of rebuilds performed so far.
    pub fn rebuild_count(&self) -> u64 {
        self.rebuilds
    }

    /// Projected wait for `priority`, rebuilding first if stale.
    ///
    /// `size_of` returns the resolved size of a queued request.
    pub fn wait_time<F>(
        &mut self,
        priority: i32,
        queue: &ProductionQueue,
        producers: &[ProducerUnit],
        ticks_per_unit: u32,
        size_of: F,
    ) -> f64
    where
        F: Fn(&ProductionRequest) -> u32,
    {
        if self.dirty {
            self.rebuild(queue, producers, ticks_per_unit, size_of);
        }
        self.lookup(priority)
    }

    /// Recomputes the cumulative wait for every queued priority level.
    ///
    /// An empty producer pool counts as a single slot.
    pub fn rebuild<F>(
        &mut self,
        queue: &ProductionQueue,
        producers: &[ProducerUnit],
        ticks_per_unit: u32,
        size_of: F,
    ) where
        F: Fn(&ProductionRequest) -> u32,
    {
        let slots = producers.len().max(1) as f64;
        let busy: f64 = producers.iter().map(|p| f64::from(p.remaining_ticks)).sum();

        let mut total = busy / slots;
        self.cache.clear();
        for (priority, bucket) in queue.buckets() {
            for entry in bucket {
                let build = f64::from(ticks_per_unit) * f64::from(size_of(&entry.request));
                total += build / slots;
            }
            self.cache.insert(priority, total);
        }

        self.dirty = false;
        self.rebuilds += 1;
        trace!(levels = self.cache.len(), base = busy / slots, "rebuilt wait-time cache");
    }

    /// Reads the cache without rebuilding.
    ///
    /// Priorities with no queued work borrow the value of the nearest more
    /// urgent level; anything more urgent than all queued work waits 0.
    pub fn lookup(&self, priority: i32) -> f64 {
        if let Some(&wait) = self.cache.get(&priority) {
            return wait;
        }
        let Some((&first, _)) = self.cache.first_key_value() else {
            return 0.0;
        };
        if priority < first {
            return 0.0;
        }
        match self.cache.range(..=priority).next_back() {
            Some((_, &wait)) => wait,
            None => {
                let fault = EstimatorFault {
                    priority,
                    cached: self.cache.len(),
                };
                error!(%fault, "wait-time cache inconsistent, reporting zero wait");
                0.0
            }
        }
    }
}

impl Default for WaitTimeEstimator {
    fn default() -> Self {
        Self::new()
    }
}
