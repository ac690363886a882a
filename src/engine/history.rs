//! Per-generation history.
//!
//! By default only summary statistics are retained, so memory grows with
//! the number of generations but not with the population size.

use serde::Serialize;

use crate::ga::{AssignmentChromosome, FitnessVector};
use crate::pareto::non_dominated_sort;

/// Summary statistics of one generation's population.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationStats {
    /// Zero-based generation index.
    pub generation: usize,
    /// Component-wise minimum fitness.
    pub min: FitnessVector,
    /// Component-wise mean fitness.
    pub mean: FitnessVector,
    /// Component-wise maximum fitness.
    pub max: FitnessVector,
    /// Size of the population's first non-dominated front.
    pub front_size: usize,
    /// Archive size after this generation's update.
    pub archive_size: usize,
}

/// History entry: statistics plus, optionally, every fitness vector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationRecord {
    /// Summary statistics.
    pub stats: GenerationStats,
    /// Full population fitness (only with `keep_full_history`).
    pub fitness: Option<Vec<FitnessVector>>,
}

impl GenerationStats {
    /// Summarizes the evaluated, feasible members of `population`.
    ///
    /// A population without such members yields zeros.
    pub fn from_population(
        generation: usize,
        population: &[AssignmentChromosome],
        archive_size: usize,
    ) -> Self {
        let points: Vec<FitnessVector> = population
            .iter()
            .filter_map(|c| c.fitness)
            .filter(FitnessVector::is_finite)
            .collect();
        let front_size = non_dominated_sort(&points).first().map_or(0, Vec::len);

        if points.is_empty() {
            let zero = FitnessVector::new(0.0, 0.0);
            return Self {
                generation,
                min: zero,
                mean: zero,
                max: zero,
                front_size,
                archive_size,
            };
        }

        let mut min = FitnessVector::new(f64::INFINITY, f64::INFINITY);
        let mut max = FitnessVector::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
        let mut sum = FitnessVector::new(0.0, 0.0);
        for f in &points {
            min.cost = min.cost.min(f.cost);
            min.time = min.time.min(f.time);
            max.cost = max.cost.max(f.cost);
            max.time = max.time.max(f.time);
            sum.cost += f.cost;
            sum.time += f.time;
        }
        let n = points.len() as f64;

        Self {
            generation,
            min,
            mean: FitnessVector::new(sum.cost / n, sum.time / n),
            max,
            front_size,
            archive_size,
        }
    }
}
