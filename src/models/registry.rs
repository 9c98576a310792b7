//! Requester registry.
//!
//! An explicit table of requesters, passed by reference into the scheduler
//! instead of living in a process-wide map. The host populates it before a
//! tick; during the tick only the scheduler mutates it, to attribute the
//! cost of each started production to its requester.

use serde::{Deserialize, Serialize};

use crate::error::RegistryError;

/// Handle of a requester in a [`Registry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RequesterId(pub u32);

/// Bookkeeping kept for one requester.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequesterRecord {
    /// Human-readable name.
    pub name: String,
    /// Total cost of productions started on this requester's behalf.
    pub spent: u64,
    /// Number of productions started on this requester's behalf.
    pub produced: u32,
}

/// Arena of requesters addressed by [`RequesterId`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Registry {
    requesters: Vec<RequesterRecord>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a requester and returns its handle.
    ///
    /// # Errors
    /// [`RegistryError::Full`] once every `u32` handle is taken.
    pub fn register(&mut self, name: impl Into<String>) -> Result<RequesterId, RegistryError> {
        let id = handle_for(self.requesters.len())?;
        self.requesters.push(RequesterRecord {
            name: name.into(),
            ..Default::default()
        });
        Ok(id)
    }

    /// Whether the handle refers to a registered requester.
    pub fn contains(&self, id: RequesterId) -> bool {
        (id.0 as usize) < self.requesters.len()
    }

    /// Looks up a requester.
    pub fn get(&self, id: RequesterId) -> Option<&RequesterRecord> {
        self.requesters.get(id.0 as usize)
    }

    /// Attributes a started production to its requester.
    ///
    /// Returns `false` if the requester is unknown; the charge is then
    /// discarded.
    pub fn charge(&mut self, id: RequesterId, cost: u64) -> bool {
        match self.requesters.get_mut(id.0 as usize) {
            Some(record) => {
                record.spent = record.spent.saturating_add(cost);
                record.produced += 1;
                true
            }
            None => false,
        }
    }

    /// Number of registered requesters.
    pub fn len(&self) -> usize {
        self.requesters.len()
    }

    /// Whether no requester is registered.
    pub fn is_empty(&self) -> bool {
        self.requesters.is_empty()
    }
}

/// Handle for the entry at `index`.
fn handle_for(index: usize) -> Result<RequesterId, RegistryError> {
    u32::try_from(index)
        .map(RequesterId)
        .map_err(|_| RegistryError::Full { len: index })
}
