//! Representative solution extraction.

use serde::{Deserialize, Serialize};

use crate::ga::{AssignmentChromosome, FitnessVector};
use crate::validation::{ValidationError, ValidationErrorKind};

/// Weights of the scalarized "balanced" objective.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalanceWeights {
    /// Weight on adjusted cost (default: 0.7).
    pub cost: f64,
    /// Weight on adjusted time (default: 0.3).
    pub time: f64,
}

impl Default for BalanceWeights {
    fn default() -> Self {
        Self {
            cost: 0.7,
            time: 0.3,
        }
    }
}

impl BalanceWeights {
    /// Creates balance weights.
    pub fn new(cost: f64, time: f64) -> Self {
        Self { cost, time }
    }

    /// Weighted sum of both objectives.
    #[inline]
    pub fn score(&self, fitness: &FitnessVector) -> f64 {
        self.cost * fitness.cost + self.time * fitness.time
    }

    pub(crate) fn validate(&self, errors: &mut Vec<ValidationError>) {
        for (name, value) in [("balance.cost", self.cost), ("balance.time", self.time)] {
            if !value.is_finite() || value < 0.0 {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidParameter,
                    format!("{name} must be finite and >= 0, got {value}"),
                ));
            }
        }
    }
}

/// The three solutions presented to a decision maker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Representatives {
    /// Minimizes the weighted sum of both objectives.
    pub balanced: AssignmentChromosome,
    /// Minimizes adjusted cost.
    pub min_cost: AssignmentChromosome,
    /// Minimizes adjusted time.
    pub min_time: AssignmentChromosome,
}

/// Picks balanced, min-cost and min-time individuals.
///
/// Unevaluated and infeasible individuals are ignored; the first
/// occurrence wins ties. Returns `None` if no individual qualifies.
pub fn select_representatives(
    population: &[AssignmentChromosome],
    weights: &BalanceWeights,
) -> Option<Representatives> {
    let balanced = arg_min(population, |f| weights.score(f))?;
    let min_cost = arg_min(population, |f| f.cost)?;
    let min_time = arg_min(population, |f| f.time)?;

    Some(Representatives {
        balanced: population[balanced].clone(),
        min_cost: population[min_cost].clone(),
        min_time: population[min_time].clone(),
    })
}

/// Index of the evaluated individual minimizing `key`.
pub(crate) fn arg_min<F>(population: &[AssignmentChromosome], key: F) -> Option<usize>
where
    F: Fn(&FitnessVector) -> f64,
{
    let mut best: Option<(usize, f64)> = None;
    for (i, c) in population.iter().enumerate() {
        let Some(f) = c.fitness.as_ref().filter(|f| f.is_finite()) else {
            continue;
        };
        let k = key(f);
        if best.map_or(true, |(_, bk)| k < bk) {
            best = Some((i, k));
        }
    }
    best.map(|(i, _)| i)
}
