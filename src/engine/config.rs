//! Engine configuration.

use serde::{Deserialize, Serialize};

use crate::error::{AllocationError, Result};
use crate::ga::CostModel;
use crate::report::BalanceWeights;
use crate::validation::{ValidationError, ValidationErrorKind};

/// Parameters of one evolutionary run.
///
/// Every field has a default, so a partial JSON document deserializes
/// into a complete configuration.
///
/// # Example
///
/// ```
/// use u_allocate::engine::EngineConfig;
///
/// let config = EngineConfig::default()
///     .with_population_size(100)
///     .with_generations(40)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Individuals per generation (default: 1000).
    pub population_size: usize,
    /// Number of generations (default: 100).
    pub generations: usize,
    /// Probability that a consecutive pair is recombined (default: 0.8).
    pub crossover_probability: f64,
    /// Probability that an offspring is mutated at all (default: 0.1).
    pub mutation_probability: f64,
    /// Probability that a mutated offspring's gene is redrawn (default: 0.2).
    pub per_gene_mutation_rate: f64,
    /// Cost model shared by evaluation and reporting.
    pub cost_model: CostModel,
    /// Weights of the balanced representative.
    pub balance: BalanceWeights,
    /// Random seed. `None` draws one from the OS and logs it.
    pub seed: Option<u64>,
    /// Evaluation worker threads (0 = one per core).
    pub worker_threads: usize,
    /// Keep every generation's fitness vectors, not just summaries.
    pub keep_full_history: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            population_size: 1000,
            generations: 100,
            crossover_probability: 0.8,
            mutation_probability: 0.1,
            per_gene_mutation_rate: 0.2,
            cost_model: CostModel::default(),
            balance: BalanceWeights::default(),
            seed: None,
            worker_threads: 0,
            keep_full_history: false,
        }
    }
}

impl EngineConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    /// Sets the number of generations.
    pub fn with_generations(mut self, generations: usize) -> Self {
        self.generations = generations;
        self
    }

    /// Sets the pair crossover probability.
    pub fn with_crossover_probability(mut self, p: f64) -> Self {
        self.crossover_probability = p;
        self
    }

    /// Sets the per-individual mutation probability.
    pub fn with_mutation_probability(mut self, p: f64) -> Self {
        self.mutation_probability = p;
        self
    }

    /// Sets the per-gene mutation rate.
    pub fn with_per_gene_mutation_rate(mut self, rate: f64) -> Self {
        self.per_gene_mutation_rate = rate;
        self
    }

    /// Sets the cost model.
    pub fn with_cost_model(mut self, cost_model: CostModel) -> Self {
        self.cost_model = cost_model;
        self
    }

    /// Sets the balanced-representative weights.
    pub fn with_balance(mut self, balance: BalanceWeights) -> Self {
        self.balance = balance;
        self
    }

    /// Fixes the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the number of evaluation worker threads.
    pub fn with_worker_threads(mut self, threads: usize) -> Self {
        self.worker_threads = threads;
        self
    }

    /// Keeps full per-generation fitness snapshots.
    pub fn with_full_history(mut self, keep: bool) -> Self {
        self.keep_full_history = keep;
        self
    }

    /// Checks every parameter range.
    ///
    /// # Errors
    /// [`AllocationError::InvalidConfig`] listing every out-of-range value.
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();

        if self.population_size == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidParameter,
                "population_size must be > 0",
            ));
        }

        for (name, p) in [
            ("crossover_probability", self.crossover_probability),
            ("mutation_probability", self.mutation_probability),
            ("per_gene_mutation_rate", self.per_gene_mutation_rate),
        ] {
            if !(0.0..=1.0).contains(&p) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidParameter,
                    format!("{name} must be within [0, 1], got {p}"),
                ));
            }
        }

        self.cost_model.validate(&mut errors);
        self.balance.validate(&mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(AllocationError::InvalidConfig(errors))
        }
    }
}
