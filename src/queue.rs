//! Priority production queue.
//!
//! A map from priority level to a FIFO bucket of requests. Priorities are
//! kept in a `BTreeMap`, so iteration is always ascending (most urgent
//! first), and a bucket is removed the moment it becomes empty so no stale
//! level is ever visited.
//!
//! # Operations
//!
//! | Operation | Effect |
//! |-----------|--------|
//! | `push_back` | Enqueue at the tail of the priority's bucket |
//! | `pop_front` | Take the head of one bucket |
//! | `push_front` | Restore a request ahead of its bucket |

use std::collections::{BTreeMap, VecDeque};

use crate::models::{ProductionRequest, RequestId};

/// A request together with the id it was enqueued under.
#[derive(Debug, Clone, PartialEq)]
pub struct QueuedRequest {
    /// Enqueue sequence number.
    pub id: RequestId,
    /// The request itself.
    pub request: ProductionRequest,
}

impl QueuedRequest {
    /// Priority of the wrapped request.
    pub fn priority(&self) -> i32 {
        self.request.priority
    }
}

/// Requests bucketed by priority, FIFO within a bucket.
#[derive(Debug, Clone, Default)]
pub struct ProductionQueue {
    buckets: BTreeMap<i32, VecDeque<QueuedRequest>>,
    len: usize,
}

impl ProductionQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a request to the tail of its priority bucket.
    pub fn push_back(&mut self, entry: QueuedRequest) {
        self.buckets
            .entry(entry.priority())
            .or_default()
            .push_back(entry);
        self.len += 1;
    }

    /// Restores a request to the head of its priority bucket.
    pub fn push_front(&mut self, entry: QueuedRequest) {
        self.buckets
            .entry(entry.priority())
            .or_default()
            .push_front(entry);
        self.len += 1;
    }

    /// Removes the head of the bucket at `priority`.
    pub fn pop_front(&mut self, priority: i32) -> Option<QueuedRequest> {
        let bucket = self.buckets.get_mut(&priority)?;
        let entry = bucket.pop_front();
        if bucket.is_empty() {
            self.buckets.remove(&priority);
        }
        if entry.is_some() {
            self.len -= 1;
        }
        entry
    }

    /// Known priority levels, ascending.
    pub fn priorities(&self) -> Vec<i32> {
        self.buckets.keys().copied().collect()
    }

    /// Most urgent queued priority.
    pub fn first_priority(&self) -> Option<i32> {
        self.buckets.keys().next().copied()
    }

    /// Iterates buckets in ascending priority order.
    pub fn buckets(&self) -> impl Iterator<Item = (i32, &VecDeque<QueuedRequest>)> {
        self.buckets.iter().map(|(&p, b)| (p, b))
    }

    /// Iterates every queued request in service order.
    pub fn iter(&self) -> impl Iterator<Item = &QueuedRequest> {
        self.buckets.values().flat_map(|b| b.iter())
    }

    /// Number of requests waiting at `priority`.
    pub fn bucket_len(&self, priority: i32) -> usize {
        self.buckets.get(&priority).map_or(0, |b| b.len())
    }

    /// Total number of queued requests.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
