//! Multi-objective task allocation for the U-Engine ecosystem.
//!
//! Assigns a catalog of weighted tasks to a roster of professionals,
//! minimizing total cost and makespan simultaneously with an NSGA-II
//! genetic search.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Task`, `Professional`, `Catalog`, random generators
//! - **`validation`**: Input integrity checks (empty inputs, duplicate names, ranges)
//! - **`ga`**: Chromosome encoding, cost model, evaluation and variation operators
//! - **`pareto`**: Non-dominated sorting, crowding distance, selection, archive
//! - **`report`**: Allocation/workload tables and representative solutions
//! - **`engine`**: Configuration, generational loop, progress and cancellation
//!
//! # Quick Start
//!
//! ```
//! use u_allocate::engine::{EngineConfig, EvolutionEngine};
//! use u_allocate::models::{Professional, Task};
//!
//! let tasks = vec![Task::new("Ticket 1", 4.0), Task::new("Ticket 2", 9.0)];
//! let pros = vec![
//!     Professional::new("ana", 4.0, 120.0),
//!     Professional::new("bruno", 6.0, 90.0),
//! ];
//! let engine = EvolutionEngine::new(
//!     tasks,
//!     pros,
//!     EngineConfig::default().with_population_size(30).with_generations(10).with_seed(1),
//! )?;
//!
//! let result = engine.execute();
//! if let Some(reps) = &result.representatives {
//!     let report = engine.analyze(&reps.balanced).expect("genes fit the catalog");
//!     assert_eq!(report.rows.len(), 2);
//! }
//! # Ok::<(), u_allocate::AllocationError>(())
//! ```
//!
//! # References
//!
//! - Deb et al. (2002), "A Fast and Elitist Multiobjective Genetic Algorithm: NSGA-II"
//! - Coello et al. (2007), "Evolutionary Algorithms for Solving Multi-Objective Problems"

pub mod engine;
pub mod error;
pub mod ga;
pub mod models;
pub mod pareto;
pub mod report;
pub mod validation;

pub use error::{AllocationError, Result};
