//! Pareto dominance machinery.
//!
//! Provides non-dominated sorting, crowding distance, NSGA-II truncation
//! selection and a cross-generation archive of non-dominated solutions.
//!
//! # Dominance
//!
//! A dominates B iff A is no worse than B in both objectives and strictly
//! better in at least one (both objectives minimized).
//!
//! # References
//!
//! - Deb et al. (2002), "A Fast and Elitist Multiobjective Genetic Algorithm: NSGA-II"
//! - Zitzler & Thiele (1999), "Multiobjective Evolutionary Algorithms: A Comparative Case Study"

mod archive;
mod selector;
mod sort;

pub use archive::ParetoArchive;
pub use selector::Nsga2Selector;
pub use sort::{crowding_distance, non_dominated_sort};
