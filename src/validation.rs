//! Request validation.
//!
//! Optional checks a requester can run before enqueueing. `enqueue` itself
//! never fails; a request that would fail here is still accepted and
//! simply dropped or lost at run time. Detects:
//! - Unregistered requesters
//! - Pins to producers outside the pool
//! - Empty or repeated exit directions
//! - Recipes that can never produce anything
//! - Duplicate producer IDs in a pool

use std::collections::HashSet;

use crate::admission::RecipeResolver;
use crate::models::{CapacityBudget, ProducerUnit, ProductionRequest, Registry};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two producers share the same ID.
    DuplicateId,
    /// The requester handle is not in the registry.
    UnknownRequester,
    /// The pinned producer is not in the pool.
    UnknownProducer,
    /// A direction constraint allows no direction at all.
    EmptyDirections,
    /// A direction is listed twice.
    DuplicateDirection,
    /// The recipe resolves to a zero-sized unit under any budget.
    DegenerateRecipe,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a request against the registry and the producer pool.
///
/// The recipe is resolved through `resolver` with an unbounded budget; a
/// recipe that still resolves to a zero-sized unit can never be produced.
/// Pass the scheduler's own resolver
/// ([`ProductionScheduler::resolver`](crate::scheduler::ProductionScheduler::resolver))
/// so the check agrees with admission.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_request<R: RecipeResolver + ?Sized>(
    request: &ProductionRequest,
    registry: &Registry,
    producers: &[ProducerUnit],
    resolver: &R,
) -> ValidationResult {
    let mut errors = Vec::new();

    if !registry.contains(request.requester) {
        errors.push(ValidationError::new(
            ValidationErrorKind::UnknownRequester,
            format!("Unknown requester {}", request.requester.0),
        ));
    }

    if let Some(pinned) = request.placement.producer {
        if !producers.iter().any(|p| p.id == pinned) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownProducer,
                format!("Request pinned to unknown producer {}", pinned.0),
            ));
        }
    }

    if let Some(directions) = &request.placement.directions {
        if directions.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyDirections,
                "Direction constraint allows no exit",
            ));
        }
        let mut seen = HashSet::new();
        for d in directions {
            if !seen.insert(*d) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DuplicateDirection,
                    format!("Direction {d:?} listed more than once"),
                ));
            }
        }
    }

    let resolved = resolver.resolve(&request.recipe, CapacityBudget(u64::MAX));
    if resolved.spec.is_degenerate() {
        errors.push(ValidationError::new(
            ValidationErrorKind::DegenerateRecipe,
            "Recipe produces a zero-sized unit",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Checks a producer pool for duplicate IDs.
pub fn validate_pool(producers: &[ProducerUnit]) -> ValidationResult {
    let mut seen = HashSet::new();
    let errors: Vec<_> = producers
        .iter()
        .filter(|p| !seen.insert(p.id))
        .map(|p| {
            ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate producer ID: {}", p.id.0),
            )
        })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
