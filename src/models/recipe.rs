//! Recipe model.
//!
//! A recipe describes what to build; a resolver turns it into a concrete
//! `ProductionSpec` and its cost under the current budget.
//!
//! # Variants
//!
//! | Variant | Resolution |
//! |---------|-----------|
//! | `Fixed` | Always the full size; cost is `size * unit_cost` |
//! | `Pattern` | Repeats a pattern as often as the budget allows, within bounds |

use serde::{Deserialize, Serialize};

/// Buildable shape of a production request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recipe {
    /// A fixed-size unit that is never scaled down.
    Fixed {
        /// Number of parts.
        size: u32,
        /// Cost per part.
        unit_cost: u64,
    },
    /// A repeated pattern that degrades under a tight budget.
    Pattern {
        /// Parts per repetition.
        pattern_size: u32,
        /// Cost per repetition.
        pattern_cost: u64,
        /// Smallest useful repetition count.
        min_repeats: u32,
        /// Largest repetition count.
        max_repeats: u32,
    },
}

impl Recipe {
    /// Creates a fixed recipe.
    pub fn fixed(size: u32, unit_cost: u64) -> Self {
        Recipe::Fixed { size, unit_cost }
    }

    /// Creates a pattern recipe.
    pub fn pattern(pattern_size: u32, pattern_cost: u64, min_repeats: u32, max_repeats: u32) -> Self {
        Recipe::Pattern {
            pattern_size,
            pattern_cost,
            min_repeats,
            max_repeats,
        }
    }
}

/// Concrete, buildable production.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProductionSpec {
    /// Number of parts in the produced unit.
    pub size: u32,
}

impl ProductionSpec {
    /// Creates a spec of the given size.
    pub fn new(size: u32) -> Self {
        Self { size }
    }

    /// Whether the spec produces nothing.
    pub fn is_degenerate(&self) -> bool {
        self.size == 0
    }

    /// Ticks a producer stays busy building this spec.
    pub fn build_ticks(&self, ticks_per_unit: u32) -> u32 {
        self.size.saturating_mul(ticks_per_unit)
    }
}

/// Output of a recipe resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Resolved {
    /// The concrete spec.
    pub spec: ProductionSpec,
    /// Cost of starting the spec.
    pub cost: u64,
}

impl Resolved {
    /// Creates a resolution result.
    pub fn new(size: u32, cost: u64) -> Self {
        Self {
            spec: ProductionSpec::new(size),
            cost,
        }
    }

    /// The resolution for a recipe that cannot be satisfied at all.
    pub fn unsatisfiable() -> Self {
        Self::default()
    }
}
