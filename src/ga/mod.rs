//! GA encoding, cost model and variation operators for task allocation.
//!
//! # Encoding
//!
//! One integer gene per task: the index of the assigned professional.
//! Every chromosome has the same length (the task count) and every gene
//! lies in `[0, num_professionals)`.
//!
//! # Submodules
//!
//! - [`operators`]: Strategy traits (`Evaluator`, `Crossover`, `Mutator`,
//!   `Selector`) and their default implementations
//!
//! # Reference
//! - Deb et al. (2002), "A Fast and Elitist Multiobjective Genetic Algorithm: NSGA-II"

mod chromosome;
pub mod operators;
mod problem;

pub use chromosome::{
    two_point_crossover, uniform_mutation, AssignmentChromosome, FitnessVector,
};
pub use operators::{
    Crossover, Evaluator, GeneticOperators, Mutator, Selector, TwoPointCrossover,
    UniformMutation,
};
pub use problem::{AllocationProblem, CostModel, TaskCost, Workload};
