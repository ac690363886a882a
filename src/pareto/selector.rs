//! NSGA-II environmental selection.
//!
//! # Algorithm
//!
//! 1. Sort the population into non-dominated fronts.
//! 2. Take whole fronts in rank order while they fit into `n`.
//! 3. From the first front that does not fit, take members by descending
//!    crowding distance until exactly `n` are chosen.
//!
//! Equal crowding distances keep population order, so the result is a
//! pure function of the input.
//!
//! # Reference
//! Deb et al. (2002), "A Fast and Elitist Multiobjective Genetic Algorithm: NSGA-II", §III-C

use super::sort::{crowding_distance, non_dominated_sort};
use crate::ga::{AssignmentChromosome, FitnessVector, Selector};

/// Dominance rank + crowding distance truncation selector.
#[derive(Debug, Clone, Copy, Default)]
pub struct Nsga2Selector;

impl Nsga2Selector {
    /// Indices of the selected individuals, in selection order.
    ///
    /// Unevaluated individuals are treated as worst in both objectives.
    pub fn select_indices(&self, population: &[AssignmentChromosome], n: usize) -> Vec<usize> {
        let points: Vec<FitnessVector> = population
            .iter()
            .map(|c| c.fitness.unwrap_or(FitnessVector::infeasible()))
            .collect();

        let mut chosen = Vec::with_capacity(n.min(points.len()));
        for front in non_dominated_sort(&points) {
            let remaining = n - chosen.len();
            if remaining == 0 {
                break;
            }
            if front.len() <= remaining {
                chosen.extend_from_slice(&front);
                continue;
            }

            let distance = crowding_distance(&points, &front);
            let mut order: Vec<usize> = (0..front.len()).collect();
            order.sort_by(|&a, &b| distance[b].total_cmp(&distance[a]));
            chosen.extend(order.into_iter().take(remaining).map(|slot| front[slot]));
            break;
        }
        chosen
    }
}

impl Selector for Nsga2Selector {
    fn name(&self) -> &'static str {
        "nsga2"
    }

    fn select(&self, population: &[AssignmentChromosome], n: usize) -> Vec<AssignmentChromosome> {
        self.select_indices(population, n)
            .into_iter()
            .map(|i| population[i].clone())
            .collect()
    }
}
