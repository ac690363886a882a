//! Integer assignment chromosome for task allocation.
//!
//! # Encoding
//!
//! Gene *i* holds the index of the professional assigned to task *i*.
//! Length equals the task count and never changes; every gene lies in
//! `[0, num_professionals)`.
//!
//! # Reference
//! Deb et al. (2002), "A Fast and Elitist Multiobjective Genetic Algorithm: NSGA-II"

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Two-objective fitness: adjusted cost and adjusted time, both minimized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitnessVector {
    /// Adjusted cost (total cost plus makespan penalty).
    pub cost: f64,
    /// Adjusted time (makespan plus cost penalty).
    pub time: f64,
}

impl FitnessVector {
    /// Creates a fitness vector.
    pub fn new(cost: f64, time: f64) -> Self {
        Self { cost, time }
    }

    /// Worst possible fitness, given to assignments that do not fit the catalog.
    pub fn infeasible() -> Self {
        Self::new(f64::INFINITY, f64::INFINITY)
    }

    /// Whether both objectives are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.cost.is_finite() && self.time.is_finite()
    }

    /// Objective values in a fixed order (cost, time).
    #[inline]
    pub fn objectives(&self) -> [f64; 2] {
        [self.cost, self.time]
    }

    /// Pareto dominance: no worse in both objectives, strictly better in one.
    #[inline]
    pub fn dominates(&self, other: &FitnessVector) -> bool {
        self.cost <= other.cost
            && self.time <= other.time
            && (self.cost < other.cost || self.time < other.time)
    }
}

/// Task-to-professional assignment chromosome.
///
/// `fitness` is `None` until the individual is evaluated and is reset by
/// every variation operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentChromosome {
    /// Professional index per task.
    pub genes: Vec<usize>,
    /// Cached fitness; `None` = needs evaluation.
    pub fitness: Option<FitnessVector>,
}

impl AssignmentChromosome {
    /// Wraps a gene vector as an unevaluated chromosome.
    pub fn new(genes: Vec<usize>) -> Self {
        Self {
            genes,
            fitness: None,
        }
    }

    /// Creates a chromosome with one uniform draw in `[0, num_professionals)` per task.
    pub fn random<R: Rng + ?Sized>(
        num_tasks: usize,
        num_professionals: usize,
        rng: &mut R,
    ) -> Self {
        let genes = (0..num_tasks)
            .map(|_| rng.random_range(0..num_professionals))
            .collect();
        Self::new(genes)
    }

    /// Whether the chromosome holds an up-to-date fitness.
    #[inline]
    pub fn is_evaluated(&self) -> bool {
        self.fitness.is_some()
    }

    /// Drops the cached fitness.
    #[inline]
    pub fn invalidate(&mut self) {
        self.fitness = None;
    }

    /// Validates length and gene range.
    pub fn is_valid(&self, num_tasks: usize, num_professionals: usize) -> bool {
        self.genes.len() == num_tasks && self.genes.iter().all(|&g| g < num_professionals)
    }
}

// ======================== Crossover operators ========================

/// Two-point crossover.
///
/// Picks cut points `a < b` with `1 <= a` and `b <= len`, then exchanges
/// the `[a, b)` segment between the parents. Both children come back
/// unevaluated; parents shorter than two genes are copied unchanged.
pub fn two_point_crossover<R: Rng + ?Sized>(
    p1: &AssignmentChromosome,
    p2: &AssignmentChromosome,
    rng: &mut R,
) -> (AssignmentChromosome, AssignmentChromosome) {
    let mut c1 = AssignmentChromosome::new(p1.genes.clone());
    let mut c2 = AssignmentChromosome::new(p2.genes.clone());

    let size = c1.genes.len().min(c2.genes.len());
    if size < 2 {
        return (c1, c2);
    }

    let mut a = rng.random_range(1..=size);
    let mut b = rng.random_range(1..size);
    if b >= a {
        b += 1;
    } else {
        std::mem::swap(&mut a, &mut b);
    }

    c1.genes[a..b].swap_with_slice(&mut c2.genes[a..b]);
    (c1, c2)
}

// ======================== Mutation operators ========================

/// Uniform reassignment mutation.
///
/// Each gene is independently redrawn in `[0, num_professionals)` with
/// probability `per_gene_rate`, clamped to `[0, 1]` (NaN counts as 0).
/// The chromosome is always invalidated.
pub fn uniform_mutation<R: Rng + ?Sized>(
    chromosome: &mut AssignmentChromosome,
    num_professionals: usize,
    per_gene_rate: f64,
    rng: &mut R,
) {
    chromosome.invalidate();
    if num_professionals == 0 {
        return;
    }
    let rate = clamp_rate(per_gene_rate);
    for gene in chromosome.genes.iter_mut() {
        if rng.random_bool(rate) {
            *gene = rng.random_range(0..num_professionals);
        }
    }
}

/// Clamps a probability to `[0, 1]`; NaN becomes 0.
pub(crate) fn clamp_rate(rate: f64) -> f64 {
    if rate.is_nan() {
        0.0
    } else {
        rate.clamp(0.0, 1.0)
    }
}
