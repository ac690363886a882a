//! Strategy interfaces for the genetic search.
//!
//! The engine is composed of four explicit strategies:
//!
//! | Trait | Role | Default |
//! |-------|------|---------|
//! | [`Evaluator`] | chromosome → fitness vector | [`AllocationProblem`](super::AllocationProblem) |
//! | [`Crossover`] | two parents → two children | [`TwoPointCrossover`] |
//! | [`Mutator`] | in-place reassignment | [`UniformMutation`] |
//! | [`Selector`] | population → breeding pool | [`Nsga2Selector`] |
//!
//! Operators receive the random source as `&mut dyn RngCore` so they can
//! be stored as trait objects in [`GeneticOperators`]. Gene bounds come
//! from the engine's catalog at call time, never from the operator.
//!
//! # Usage
//!
//! ```
//! use std::sync::Arc;
//! use u_allocate::ga::operators::{GeneticOperators, UniformMutation};
//!
//! let ops = GeneticOperators::new(0.2).with_mutator(Arc::new(UniformMutation::new(0.5)));
//! assert_eq!(ops.mutator.name(), "uniform");
//! ```

use std::fmt::Debug;
use std::sync::Arc;

use rand::RngCore;

use super::chromosome::{
    clamp_rate, two_point_crossover, uniform_mutation, AssignmentChromosome, FitnessVector,
};
use crate::pareto::Nsga2Selector;

/// Maps a gene sequence to its fitness vector.
///
/// Implementations must be pure: evaluation runs concurrently on a
/// worker pool and results must not depend on scheduling.
pub trait Evaluator: Send + Sync {
    /// Evaluates one assignment.
    fn evaluate(&self, genes: &[usize]) -> FitnessVector;
}

/// Recombines two parents into two children of identical length.
pub trait Crossover: Send + Sync + Debug {
    /// Operator name (e.g., "two-point").
    fn name(&self) -> &'static str;

    /// Produces two unevaluated children.
    fn crossover(
        &self,
        p1: &AssignmentChromosome,
        p2: &AssignmentChromosome,
        rng: &mut dyn RngCore,
    ) -> (AssignmentChromosome, AssignmentChromosome);
}

/// Perturbs a chromosome in place, keeping length and gene range.
pub trait Mutator: Send + Sync + Debug {
    /// Operator name (e.g., "uniform").
    fn name(&self) -> &'static str;

    /// Mutates and invalidates `chromosome`.
    ///
    /// New genes must lie in `[0, num_professionals)`.
    fn mutate(
        &self,
        chromosome: &mut AssignmentChromosome,
        num_professionals: usize,
        rng: &mut dyn RngCore,
    );
}

/// Chooses the breeding pool of the next generation.
pub trait Selector: Send + Sync + Debug {
    /// Selector name (e.g., "nsga2").
    fn name(&self) -> &'static str;

    /// Returns `n` individuals (or all of them if fewer are given).
    ///
    /// Every input individual must be evaluated.
    fn select(&self, population: &[AssignmentChromosome], n: usize) -> Vec<AssignmentChromosome>;
}

/// Two-point segment exchange.
#[derive(Debug, Clone, Copy, Default)]
pub struct TwoPointCrossover;

impl Crossover for TwoPointCrossover {
    fn name(&self) -> &'static str {
        "two-point"
    }

    fn crossover(
        &self,
        p1: &AssignmentChromosome,
        p2: &AssignmentChromosome,
        rng: &mut dyn RngCore,
    ) -> (AssignmentChromosome, AssignmentChromosome) {
        two_point_crossover(p1, p2, rng)
    }
}

/// Per-gene uniform reassignment to any professional.
#[derive(Debug, Clone, Copy)]
pub struct UniformMutation {
    per_gene_rate: f64,
}

impl UniformMutation {
    /// Creates a uniform mutation. The rate is clamped to `[0, 1]`.
    pub fn new(per_gene_rate: f64) -> Self {
        Self {
            per_gene_rate: clamp_rate(per_gene_rate),
        }
    }

    /// Probability of redrawing each gene.
    pub fn per_gene_rate(&self) -> f64 {
        self.per_gene_rate
    }
}

impl Mutator for UniformMutation {
    fn name(&self) -> &'static str {
        "uniform"
    }

    fn mutate(
        &self,
        chromosome: &mut AssignmentChromosome,
        num_professionals: usize,
        rng: &mut dyn RngCore,
    ) {
        uniform_mutation(chromosome, num_professionals, self.per_gene_rate, rng);
    }
}

/// Bundle of variation and selection strategies used by the engine.
#[derive(Debug, Clone)]
pub struct GeneticOperators {
    /// Crossover strategy.
    pub crossover: Arc<dyn Crossover>,
    /// Mutation strategy.
    pub mutator: Arc<dyn Mutator>,
    /// Selection strategy.
    pub selector: Arc<dyn Selector>,
}

impl GeneticOperators {
    /// Default operators: two-point crossover, uniform mutation, NSGA-II selection.
    pub fn new(per_gene_rate: f64) -> Self {
        Self {
            crossover: Arc::new(TwoPointCrossover),
            mutator: Arc::new(UniformMutation::new(per_gene_rate)),
            selector: Arc::new(Nsga2Selector),
        }
    }

    /// Replaces the crossover strategy.
    pub fn with_crossover(mut self, crossover: Arc<dyn Crossover>) -> Self {
        self.crossover = crossover;
        self
    }

    /// Replaces the mutation strategy.
    pub fn with_mutator(mut self, mutator: Arc<dyn Mutator>) -> Self {
        self.mutator = mutator;
        self
    }

    /// Replaces the selection strategy.
    pub fn with_selector(mut self, selector: Arc<dyn Selector>) -> Self {
        self.selector = selector;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_default_operators() {
        let ops = GeneticOperators::new(0.2);
        assert_eq!(ops.crossover.name(), "two-point");
        assert_eq!(ops.mutator.name(), "uniform");
        assert_eq!(ops.selector.name(), "nsga2");
    }

    #[test]
    fn test_crossover_through_trait_object() {
        let ops = GeneticOperators::new(0.2);
        let mut rng = SmallRng::seed_from_u64(42);
        let p1 = AssignmentChromosome::random(8, 5, &mut rng);
        let p2 = AssignmentChromosome::random(8, 5, &mut rng);

        let (c1, c2) = ops.crossover.crossover(&p1, &p2, &mut rng);
        assert_eq!(c1.genes.len(), 8);
        assert_eq!(c2.genes.len(), 8);
        assert!(c1.is_valid(8, 5) && c2.is_valid(8, 5));
    }

    #[test]
    fn test_mutation_through_trait_object() {
        let ops = GeneticOperators::new(1.0);
        let mut rng = SmallRng::seed_from_u64(42);
        let mut ch = AssignmentChromosome::random(15, 3, &mut rng);
        ch.fitness = Some(FitnessVector::new(0.0, 0.0));

        ops.mutator.mutate(&mut ch, 3, &mut rng);
        assert!(ch.is_valid(15, 3));
        assert!(!ch.is_evaluated());
    }

    #[test]
    fn test_mutation_rate_clamped() {
        assert_eq!(UniformMutation::new(1.5).per_gene_rate(), 1.0);
        assert_eq!(UniformMutation::new(-0.2).per_gene_rate(), 0.0);
        assert_eq!(UniformMutation::new(f64::NAN).per_gene_rate(), 0.0);
        assert!((UniformMutation::new(0.3).per_gene_rate() - 0.3).abs() < 1e-12);

        let ops = GeneticOperators::new(1.5);
        let mut rng = SmallRng::seed_from_u64(42);
        let mut ch = AssignmentChromosome::new(vec![0; 12]);
        ops.mutator.mutate(&mut ch, 2, &mut rng);
        assert!(ch.is_valid(12, 2));
    }

    #[derive(Debug)]
    struct KeepFirst;

    impl Selector for KeepFirst {
        fn name(&self) -> &'static str {
            "keep-first"
        }

        fn select(
            &self,
            population: &[AssignmentChromosome],
            n: usize,
        ) -> Vec<AssignmentChromosome> {
            population.iter().take(n).cloned().collect()
        }
    }

    #[test]
    fn test_replace_selector() {
        let ops = GeneticOperators::new(0.2).with_selector(Arc::new(KeepFirst));
        assert_eq!(ops.selector.name(), "keep-first");

        let pop = vec![AssignmentChromosome::new(vec![0]); 4];
        assert_eq!(ops.selector.select(&pop, 2).len(), 2);
    }
}
