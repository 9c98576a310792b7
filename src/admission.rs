//! Admission control.
//!
//! Materializes a request's recipe into a concrete spec and cost through a
//! [`RecipeResolver`], then decides whether it fits the tick's budget.
//! Stateless: every call is a pure function of its inputs.
//!
//! # Rules
//!
//! | Resolution | Decision |
//! |-----------|----------|
//! | size 0 | `DegenerateSize` |
//! | cost > budget | `BudgetExceeded` |
//! | otherwise | admitted |

use crate::error::AdmissionError;
use crate::models::{CapacityBudget, ProductionRequest, Recipe, Resolved};

/// Turns a recipe into a concrete spec under a budget.
///
/// Implementations must be deterministic for equal inputs. They may return
/// a smaller unit when the budget is tight, and must return
/// [`Resolved::unsatisfiable`] when the recipe cannot be built at all.
pub trait RecipeResolver {
    /// Resolves `recipe` against `budget`.
    fn resolve(&self, recipe: &Recipe, budget: CapacityBudget) -> Resolved;
}

/// Resolver for the built-in [`Recipe`] variants.
///
/// `Fixed` recipes are never scaled. `Pattern` recipes repeat as many times
/// as the budget pays for, clamped to `[min_repeats, max_repeats]`; when
/// even the minimum is unaffordable the minimum is returned, so its cost
/// exceeds the budget and admission rejects it.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardResolver;

impl RecipeResolver for StandardResolver {
    fn resolve(&self, recipe: &Recipe, budget: CapacityBudget) -> Resolved {
        match *recipe {
            Recipe::Fixed { size, unit_cost } => {
                if size == 0 {
                    return Resolved::unsatisfiable();
                }
                Resolved::new(size, u64::from(size).saturating_mul(unit_cost))
            }
            Recipe::Pattern {
                pattern_size,
                pattern_cost,
                min_repeats,
                max_repeats,
            } => {
                if pattern_size == 0 || max_repeats == 0 {
                    return Resolved::unsatisfiable();
                }
                let floor = min_repeats.clamp(1, max_repeats);
                let affordable = if pattern_cost == 0 {
                    max_repeats
                } else {
                    u32::try_from(budget.get() / pattern_cost).unwrap_or(u32::MAX)
                };
                let repeats = affordable.clamp(floor, max_repeats);
                Resolved::new(
                    pattern_size.saturating_mul(repeats),
                    pattern_cost.saturating_mul(u64::from(repeats)),
                )
            }
        }
    }
}

/// Budget gate in front of the producers.
#[derive(Debug, Clone, Default)]
pub struct AdmissionController<R> {
    resolver: R,
}

impl<R: RecipeResolver> AdmissionController<R> {
    /// Creates a controller around a resolver.
    pub fn new(resolver: R) -> Self {
        Self { resolver }
    }

    /// The wrapped resolver.
    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Materializes the request's recipe under `budget`.
    pub fn resolve(&self, request: &ProductionRequest, budget: CapacityBudget) -> Resolved {
        self.resolver.resolve(&request.recipe, budget)
    }

    /// Whether `cost` fits in `budget`.
    pub fn admit(cost: u64, budget: CapacityBudget) -> bool {
        cost <= budget.get()
    }

    /// Resolves and admits in one step.
    pub fn check(
        &self,
        request: &ProductionRequest,
        budget: CapacityBudget,
    ) -> Result<Resolved, AdmissionError> {
        let resolved = self.resolve(request, budget);
        if resolved.spec.is_degenerate() {
            return Err(AdmissionError::DegenerateSize);
        }
        if !Self::admit(resolved.cost, budget) {
            return Err(AdmissionError::BudgetExceeded {
                cost: resolved.cost,
                budget,
            });
        }
        Ok(resolved)
    }
}
