//! Production domain models.
//!
//! Plain data types shared by the queue, the admission controller, the
//! wait-time estimator, and the scheduler. Cross references use integer
//! handles (`ProducerId`, `RequesterId`, `RequestId`) rather than owning
//! pointers, so a request never holds its producer or requester alive.
//!
//! | Type | Role |
//! |------|------|
//! | `ProductionRequest` | Queued demand for one unit of output |
//! | `Recipe` | Closed set of buildable shapes, costed by a resolver |
//! | `ProducerUnit` | Observed state of one producer |
//! | `CapacityBudget` | Per-tick resource ceiling |
//! | `Registry` | Requester table for cost attribution |

mod producer;
mod recipe;
mod registry;
mod request;

pub use producer::{CapacityBudget, ProducerId, ProducerUnit};
pub use recipe::{ProductionSpec, Recipe, Resolved};
pub use registry::{Registry, RequesterId, RequesterRecord};
pub use request::{Direction, Placement, ProductionRequest, RequestId};
