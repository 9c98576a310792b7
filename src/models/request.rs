//! Production request model.
//!
//! A request is a queued demand for one unit of output. It carries a
//! priority (lower value = serviced first), the requester handle used for
//! cost attribution, the recipe the unit is built from, and optional
//! placement constraints.

use serde::{Deserialize, Serialize};

use super::{ProducerId, Recipe, RequesterId};

/// Sequence number assigned by the scheduler when a request is enqueued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RequestId(pub u64);

/// Exit direction around a producer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
    TopLeft,
}

impl Direction {
    /// All eight directions, clockwise from `Top`.
    pub const ALL: [Direction; 8] = [
        Direction::Top,
        Direction::TopRight,
        Direction::Right,
        Direction::BottomRight,
        Direction::Bottom,
        Direction::BottomLeft,
        Direction::Left,
        Direction::TopLeft,
    ];
}

/// Where a request may be produced.
///
/// The default placement accepts any idle producer and any exit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    /// Producer this request must be built on.
    pub producer: Option<ProducerId>,
    /// Allowed exit directions, in preference order. `None` = unconstrained.
    pub directions: Option<Vec<Direction>>,
}

impl Placement {
    /// Pins the request to one producer.
    pub fn on(producer: ProducerId) -> Self {
        Self {
            producer: Some(producer),
            directions: None,
        }
    }

    /// Restricts the exit directions.
    pub fn with_directions(mut self, directions: Vec<Direction>) -> Self {
        self.directions = Some(directions);
        self
    }

    /// Whether the request is pinned to a specific producer.
    pub fn is_pinned(&self) -> bool {
        self.producer.is_some()
    }
}

/// A queued demand for one produced unit.
///
/// Immutable once enqueued; only its position in the queue changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionRequest {
    /// Queue priority. Lower values are serviced first; any `i32` is valid.
    pub priority: i32,
    /// Requester the produced unit is attributed to.
    pub requester: RequesterId,
    /// Recipe the concrete unit is resolved from.
    pub recipe: Recipe,
    /// Producer/exit constraints.
    pub placement: Placement,
}

impl ProductionRequest {
    /// Creates an unconstrained request.
    pub fn new(priority: i32, requester: RequesterId, recipe: Recipe) -> Self {
        Self {
            priority,
            requester,
            recipe,
            placement: Placement::default(),
        }
    }

    /// Sets the placement constraints.
    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    /// Pins the request to a producer.
    pub fn pinned_to(mut self, producer: ProducerId) -> Self {
        self.placement.producer = Some(producer);
        self
    }

    /// Restricts the exit directions.
    pub fn with_directions(mut self, directions: Vec<Direction>) -> Self {
        self.placement.directions = Some(directions);
        self
    }
}
