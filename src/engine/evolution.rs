//! Generational multi-objective search.
//!
//! # Algorithm
//!
//! ```text
//! init → evaluate → { select → vary → evaluate offspring → replace → record → report } × G → extract
//! ```
//!
//! 1. Create `N` random individuals and evaluate them.
//! 2. Each generation: the selector turns the population into a breeding
//!    pool of size `N`; consecutive pairs are recombined with probability
//!    `crossover_probability`; each offspring is mutated with probability
//!    `mutation_probability`; only invalidated offspring are re-evaluated.
//! 3. The offspring replace the population, the archive absorbs new
//!    non-dominated individuals and the observer receives the balanced
//!    individual's allocation table.
//!
//! # Concurrency
//!
//! Evaluation runs on a bounded rayon pool and returns only once the whole
//! batch is done. All random draws happen on the calling thread from one
//! seeded `StdRng` in a fixed order, so results do not depend on the
//! number of workers.
//!
//! # Reference
//! Deb et al. (2002), "A Fast and Elitist Multiobjective Genetic Algorithm: NSGA-II"

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use rayon::ThreadPool;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::config::EngineConfig;
use super::history::{GenerationRecord, GenerationStats};
use super::progress::{CancellationToken, GenerationReport, ProgressObserver};
use crate::error::Result;
use crate::ga::{
    AllocationProblem, AssignmentChromosome, Evaluator, FitnessVector, GeneticOperators,
};
use crate::models::{Catalog, Professional, Task};
use crate::pareto::ParetoArchive;
use crate::report::{
    arg_min, select_representatives, AllocationReport, Representatives, SolutionReporter,
};

/// Outcome of one run.
#[derive(Debug, Clone, Serialize)]
pub struct EvolutionResult {
    /// Balanced, min-cost and min-time individuals of the final population.
    /// `None` only if the final population holds no feasible individual.
    pub representatives: Option<Representatives>,
    /// Non-dominated individuals seen during the whole run.
    pub archive: Vec<AssignmentChromosome>,
    /// One record per completed generation.
    pub history: Vec<GenerationRecord>,
    /// Number of generations actually run.
    pub generations_completed: usize,
    /// Whether the run stopped on a cancellation request.
    pub cancelled: bool,
    /// Seed the run used; replaying it with the same config reproduces the run.
    pub seed: u64,
}

/// Evolutionary task allocation engine.
///
/// Owns the catalog, the strategies and the evaluation pool. Each call to
/// [`execute`](Self::execute) is an independent run.
///
/// # Example
///
/// ```
/// use u_allocate::engine::{EngineConfig, EvolutionEngine};
/// use u_allocate::models::{Professional, Task};
///
/// let tasks = vec![Task::new("Ticket 1", 2.0), Task::new("Ticket 2", 5.0)];
/// let pros = vec![
///     Professional::new("felipe", 2.0, 100.0),
///     Professional::new("pedro", 6.0, 140.0),
/// ];
/// let config = EngineConfig::default()
///     .with_population_size(20)
///     .with_generations(5)
///     .with_seed(42);
///
/// let engine = EvolutionEngine::new(tasks, pros, config).unwrap();
/// let result = engine.execute();
/// assert_eq!(result.generations_completed, 5);
/// assert!(result.representatives.is_some());
/// ```
pub struct EvolutionEngine {
    problem: AllocationProblem,
    evaluator: Arc<dyn Evaluator>,
    operators: GeneticOperators,
    config: EngineConfig,
    pool: ThreadPool,
    cancellation: CancellationToken,
}

impl EvolutionEngine {
    /// Validates inputs and configuration and builds the engine.
    ///
    /// # Errors
    /// - [`InvalidConfig`](crate::AllocationError::InvalidConfig) for out-of-range parameters
    /// - [`InvalidInput`](crate::AllocationError::InvalidInput) for an unusable catalog
    /// - [`ThreadPool`](crate::AllocationError::ThreadPool) if the worker pool cannot start
    pub fn new(
        tasks: Vec<Task>,
        professionals: Vec<Professional>,
        config: EngineConfig,
    ) -> Result<Self> {
        config.validate()?;
        let catalog = Catalog::new(tasks, professionals)?;

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.worker_threads)
            .thread_name(|i| format!("u-allocate-eval-{i}"))
            .build()?;

        let operators = GeneticOperators::new(config.per_gene_mutation_rate);
        let problem = AllocationProblem::new(catalog, config.cost_model);
        let evaluator: Arc<dyn Evaluator> = Arc::new(problem.clone());

        Ok(Self {
            problem,
            evaluator,
            operators,
            config,
            pool,
            cancellation: CancellationToken::new(),
        })
    }

    /// Replaces the variation and selection strategies.
    ///
    /// Mutators receive the catalog's professional count on every call.
    /// Offspring whose genes still do not fit the catalog are scored
    /// [`FitnessVector::infeasible`] instead of being evaluated.
    pub fn with_operators(mut self, operators: GeneticOperators) -> Self {
        self.operators = operators;
        self
    }

    /// Replaces the fitness evaluator.
    ///
    /// Reports still decode chromosomes with the configured cost model.
    pub fn with_evaluator(mut self, evaluator: Arc<dyn Evaluator>) -> Self {
        self.evaluator = evaluator;
        self
    }

    /// Uses an externally owned cancellation token.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// Token that stops the run at the next generation boundary.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancellation.clone()
    }

    /// The allocation problem (catalog + cost model).
    pub fn problem(&self) -> &AllocationProblem {
        &self.problem
    }

    /// The run configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Decodes a chromosome into allocation and workload tables.
    ///
    /// Returns `None` if the chromosome does not fit the catalog.
    pub fn analyze(&self, chromosome: &AssignmentChromosome) -> Option<AllocationReport> {
        SolutionReporter::new(&self.problem).analyze(chromosome)
    }

    /// Runs the search without an observer.
    pub fn execute(&self) -> EvolutionResult {
        self.run(None)
    }

    /// Runs the search, reporting every generation to `observer`.
    pub fn execute_with_observer(&self, observer: &mut dyn ProgressObserver) -> EvolutionResult {
        self.run(Some(observer))
    }

    fn run(&self, mut observer: Option<&mut dyn ProgressObserver>) -> EvolutionResult {
        let n = self.config.population_size;
        let generations = self.config.generations;
        let seed = self.config.seed.unwrap_or_else(|| rand::rng().random());

        info!(
            seed,
            population = n,
            generations,
            tasks = self.problem.catalog().task_count(),
            professionals = self.problem.catalog().professional_count(),
            crossover = self.operators.crossover.name(),
            mutator = self.operators.mutator.name(),
            selector = self.operators.selector.name(),
            "starting allocation search"
        );

        let mut rng = StdRng::seed_from_u64(seed);
        let mut population = self.problem.create_population(n, &mut rng);
        self.evaluate_batch(&mut population);

        let mut archive = ParetoArchive::new();
        archive.update(&population);

        let mut history = Vec::with_capacity(generations);
        let mut cancelled = false;

        for generation in 0..generations {
            if self.cancellation.is_cancelled() {
                warn!(generation, "allocation search cancelled");
                cancelled = true;
                break;
            }

            let mut offspring = self.operators.selector.select(&population, n);
            self.vary(&mut offspring, &mut rng);
            let evaluated = self.evaluate_batch(&mut offspring);
            population = offspring;

            let admitted = archive.update(&population);
            let stats = GenerationStats::from_population(generation, &population, archive.len());
            debug!(
                generation,
                evaluated,
                admitted,
                min_cost = stats.min.cost,
                min_time = stats.min.time,
                mean_cost = stats.mean.cost,
                mean_time = stats.mean.time,
                front = stats.front_size,
                archive = stats.archive_size,
                "generation complete"
            );
            let fitness = self
                .config
                .keep_full_history
                .then(|| population.iter().filter_map(|c| c.fitness).collect());
            history.push(GenerationRecord { stats, fitness });

            if let Some(obs) = observer.as_deref_mut() {
                self.notify(obs, generation, &population);
            }
        }

        let representatives = select_representatives(&population, &self.config.balance);
        match representatives.as_ref().and_then(|r| self.analyze(&r.balanced)) {
            Some(report) => info!(
                generations = history.len(),
                cancelled,
                archive = archive.len(),
                makespan = report.makespan,
                total_cost = report.total_cost,
                "allocation search finished"
            ),
            None => warn!(
                generations = history.len(),
                cancelled,
                archive = archive.len(),
                "allocation search finished without a feasible individual"
            ),
        }

        EvolutionResult {
            representatives,
            archive: archive.into_members(),
            generations_completed: history.len(),
            history,
            cancelled,
            seed,
        }
    }

    /// Crossover over consecutive pairs, then per-individual mutation.
    fn vary(&self, offspring: &mut [AssignmentChromosome], rng: &mut StdRng) {
        let num_professionals = self.problem.catalog().professional_count();
        for pair in offspring.chunks_exact_mut(2) {
            if rng.random_bool(self.config.crossover_probability) {
                let (c1, c2) = self.operators.crossover.crossover(&pair[0], &pair[1], rng);
                pair[0] = c1;
                pair[1] = c2;
            }
        }
        for individual in offspring.iter_mut() {
            if rng.random_bool(self.config.mutation_probability) {
                self.operators.mutator.mutate(individual, num_professionals, rng);
            }
        }
    }

    /// Evaluates every unevaluated individual; returns how many there were.
    ///
    /// Individuals that do not fit the catalog never reach the evaluator.
    fn evaluate_batch(&self, population: &mut [AssignmentChromosome]) -> usize {
        let problem = &self.problem;
        let pending = population.iter().filter(|c| !c.is_evaluated()).count();
        let malformed = population
            .iter()
            .filter(|c| !c.is_evaluated() && !problem.accepts(&c.genes))
            .count();
        if malformed > 0 {
            warn!(malformed, "offspring do not fit the catalog; scored as infeasible");
        }

        let evaluator = &*self.evaluator;
        self.pool.install(|| {
            population
                .par_iter_mut()
                .filter(|c| !c.is_evaluated())
                .for_each(|c| {
                    let fitness = if problem.accepts(&c.genes) {
                        evaluator.evaluate(&c.genes)
                    } else {
                        FitnessVector::infeasible()
                    };
                    c.fitness = Some(fitness);
                });
        });
        pending
    }

    fn notify(
        &self,
        observer: &mut dyn ProgressObserver,
        generation: usize,
        population: &[AssignmentChromosome],
    ) {
        let Some(best) = arg_min(population, |f| self.config.balance.score(f)) else {
            return;
        };
        let Some(allocation) = self.analyze(&population[best]) else {
            return;
        };
        let report = GenerationReport {
            generation,
            makespan: allocation.makespan,
            total_cost: allocation.total_cost,
            allocation,
        };

        match panic::catch_unwind(AssertUnwindSafe(|| observer.on_generation(&report))) {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!(generation, error = %e, "progress observer failed"),
            Err(_) => warn!(generation, "progress observer panicked"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::progress::ObserverError;
    use crate::error::AllocationError;
    use crate::ga::Mutator;
    use rand::RngCore;

    fn sample_tasks() -> Vec<Task> {
        [2.0, 5.0, 3.0, 4.0, 7.0, 6.0, 9.0, 3.0, 4.0, 8.0]
            .iter()
            .enumerate()
            .map(|(i, &w)| Task::new(format!("Ticket {}", i + 1), w))
            .collect()
    }

    fn sample_professionals() -> Vec<Professional> {
        vec![
            Professional::new("felipe", 2.0, 100.0),
            Professional::new("paulo", 3.0, 110.0),
            Professional::new("joao", 4.0, 120.0),
            Professional::new("gabriel", 5.0, 130.0),
            Professional::new("pedro", 6.0, 140.0),
        ]
    }

    fn small_config() -> EngineConfig {
        EngineConfig::default()
            .with_population_size(40)
            .with_generations(15)
            .with_seed(42)
            .with_worker_threads(2)
    }

    fn make_engine(config: EngineConfig) -> EvolutionEngine {
        EvolutionEngine::new(sample_tasks(), sample_professionals(), config).unwrap()
    }

    #[test]
    fn test_empty_roster_rejected() {
        let err = EvolutionEngine::new(sample_tasks(), vec![], small_config())
            .err()
            .unwrap();
        assert!(matches!(err, AllocationError::InvalidInput(_)));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = small_config().with_mutation_probability(2.0);
        let err = EvolutionEngine::new(sample_tasks(), sample_professionals(), config)
            .err()
            .unwrap();
        assert!(matches!(err, AllocationError::InvalidConfig(_)));
    }

    #[test]
    fn test_run_completes() {
        let engine = make_engine(small_config());
        let result = engine.execute();

        assert_eq!(result.generations_completed, 15);
        assert_eq!(result.history.len(), 15);
        assert!(!result.cancelled);
        assert_eq!(result.seed, 42);
        for (i, record) in result.history.iter().enumerate() {
            assert_eq!(record.stats.generation, i);
            assert!(record.fitness.is_none());
        }

        let reps = result.representatives.unwrap();
        for ch in [&reps.balanced, &reps.min_cost, &reps.min_time] {
            assert!(ch.is_valid(10, 5));
            assert!(ch.is_evaluated());
        }
        assert!(reps.min_cost.fitness.unwrap().cost <= reps.balanced.fitness.unwrap().cost);
        assert!(reps.min_time.fitness.unwrap().time <= reps.balanced.fitness.unwrap().time);
    }

    #[test]
    fn test_archive_non_dominated() {
        let result = make_engine(small_config()).execute();
        assert!(!result.archive.is_empty());
        for a in &result.archive {
            assert!(a.is_valid(10, 5));
            for b in &result.archive {
                assert!(!a.fitness.unwrap().dominates(&b.fitness.unwrap()));
            }
        }
    }

    #[test]
    fn test_archive_covers_final_population() {
        let result = make_engine(small_config()).execute();
        let reps = result.representatives.unwrap();
        let best_cost = reps.min_cost.fitness.unwrap();
        // Nothing in the final population escapes the archive's front.
        assert!(result
            .archive
            .iter()
            .any(|a| a.fitness.unwrap() == best_cost || a.fitness.unwrap().dominates(&best_cost)));
    }

    #[test]
    fn test_reproducible_with_seed() {
        let a = make_engine(small_config()).execute();
        let b = make_engine(small_config().with_worker_threads(1)).execute();

        assert_eq!(a.history, b.history);
        assert_eq!(a.archive, b.archive);
        assert_eq!(a.representatives, b.representatives);
    }

    #[test]
    fn test_full_history() {
        let result = make_engine(small_config().with_full_history(true)).execute();
        for record in &result.history {
            assert_eq!(record.fitness.as_ref().unwrap().len(), 40);
        }
    }

    #[test]
    fn test_observer_called_each_generation() {
        let engine = make_engine(small_config());
        let mut seen = Vec::new();
        let mut observer = |r: &GenerationReport| -> std::result::Result<(), ObserverError> {
            assert_eq!(r.allocation.rows.len(), 10);
            assert!((r.makespan - r.allocation.makespan).abs() < 1e-12);
            seen.push(r.generation);
            Ok(())
        };
        let result = engine.execute_with_observer(&mut observer);

        assert_eq!(result.generations_completed, 15);
        assert_eq!(seen, (0..15).collect::<Vec<_>>());
    }

    #[test]
    fn test_failing_observer_does_not_abort() {
        let engine = make_engine(small_config());
        let mut calls = 0;
        let mut observer = |_: &GenerationReport| -> std::result::Result<(), ObserverError> {
            calls += 1;
            Err("chart widget closed".into())
        };
        let result = engine.execute_with_observer(&mut observer);
        assert_eq!(calls, 15);
        assert_eq!(result.generations_completed, 15);
    }

    #[test]
    fn test_panicking_observer_does_not_abort() {
        let engine = make_engine(small_config().with_generations(3));
        let mut observer = |_: &GenerationReport| -> std::result::Result<(), ObserverError> {
            panic!("render failure");
        };
        let result = engine.execute_with_observer(&mut observer);
        assert_eq!(result.generations_completed, 3);
    }

    #[test]
    fn test_cancellation() {
        let engine = make_engine(small_config());
        let token = engine.cancellation_token();
        let mut observer = move |r: &GenerationReport| -> std::result::Result<(), ObserverError> {
            if r.generation == 2 {
                token.cancel();
            }
            Ok(())
        };
        let result = engine.execute_with_observer(&mut observer);

        assert!(result.cancelled);
        assert_eq!(result.generations_completed, 3);
        assert!(result.representatives.is_some());
    }

    #[test]
    fn test_zero_generations() {
        let result = make_engine(small_config().with_generations(0)).execute();
        assert_eq!(result.generations_completed, 0);
        assert!(result.history.is_empty());
        assert!(result.representatives.is_some());
        assert!(!result.archive.is_empty());
    }

    #[test]
    fn test_odd_population_size() {
        let result = make_engine(small_config().with_population_size(7)).execute();
        assert_eq!(result.generations_completed, 15);
        assert!(result.representatives.unwrap().balanced.is_valid(10, 5));
    }

    #[derive(Debug)]
    struct AllToFirst;

    impl Mutator for AllToFirst {
        fn name(&self) -> &'static str {
            "all-to-first"
        }

        fn mutate(
            &self,
            chromosome: &mut AssignmentChromosome,
            _num_professionals: usize,
            _rng: &mut dyn RngCore,
        ) {
            chromosome.genes.iter_mut().for_each(|g| *g = 0);
            chromosome.invalidate();
        }
    }

    #[test]
    fn test_custom_operators() {
        let engine = make_engine(
            small_config()
                .with_crossover_probability(0.0)
                .with_mutation_probability(1.0),
        );
        let ops = GeneticOperators::new(0.2).with_mutator(Arc::new(AllToFirst));
        let result = engine.with_operators(ops).execute();

        let reps = result.representatives.unwrap();
        assert!(reps.balanced.genes.iter().all(|&g| g == 0));
    }

    #[derive(Debug)]
    struct OffRoster;

    impl Mutator for OffRoster {
        fn name(&self) -> &'static str {
            "off-roster"
        }

        fn mutate(
            &self,
            chromosome: &mut AssignmentChromosome,
            num_professionals: usize,
            _rng: &mut dyn RngCore,
        ) {
            chromosome.genes[0] = num_professionals + 4;
            chromosome.invalidate();
        }
    }

    #[test]
    fn test_default_mutator_uses_catalog_roster() {
        let engine = make_engine(
            small_config()
                .with_crossover_probability(0.0)
                .with_mutation_probability(1.0),
        );
        let result = engine.with_operators(GeneticOperators::new(1.0)).execute();

        assert_eq!(result.generations_completed, 15);
        for ch in &result.archive {
            assert!(ch.is_valid(10, 5));
            assert!(ch.fitness.unwrap().is_finite());
        }
        assert!(result.representatives.unwrap().balanced.is_valid(10, 5));
    }

    #[test]
    fn test_out_of_range_mutation_rate() {
        let engine = make_engine(small_config().with_mutation_probability(1.0));
        let result = engine.with_operators(GeneticOperators::new(1.5)).execute();
        assert_eq!(result.generations_completed, 15);

        let engine = make_engine(small_config().with_mutation_probability(1.0));
        let result = engine.with_operators(GeneticOperators::new(f64::NAN)).execute();
        assert_eq!(result.generations_completed, 15);
    }

    #[test]
    fn test_malformed_offspring_scored_infeasible() {
        let engine = make_engine(
            small_config()
                .with_crossover_probability(0.0)
                .with_mutation_probability(0.5),
        );
        let ops = GeneticOperators::new(0.2).with_mutator(Arc::new(OffRoster));
        let result = engine.with_operators(ops).execute();

        assert_eq!(result.generations_completed, 15);
        assert!(!result.archive.is_empty());
        for ch in &result.archive {
            assert!(ch.is_valid(10, 5));
            assert!(ch.fitness.unwrap().is_finite());
        }
        let reps = result.representatives.unwrap();
        for ch in [&reps.balanced, &reps.min_cost, &reps.min_time] {
            assert!(ch.is_valid(10, 5));
        }
        for record in &result.history {
            assert!(record.stats.max.is_finite());
        }
    }

    #[test]
    fn test_analyze_rejects_foreign_chromosomes() {
        let engine = make_engine(small_config());
        assert!(engine.analyze(&AssignmentChromosome::new(vec![0])).is_none());
        assert!(engine.analyze(&AssignmentChromosome::new(vec![5; 10])).is_none());

        let report = engine.analyze(&AssignmentChromosome::new(vec![4; 10])).unwrap();
        assert_eq!(report.rows.len(), 10);
        assert_eq!(report.workload.len(), 1);
    }

    struct ConstantEvaluator;

    impl Evaluator for ConstantEvaluator {
        fn evaluate(&self, _genes: &[usize]) -> FitnessVector {
            FitnessVector::new(1.0, 1.0)
        }
    }

    #[test]
    fn test_custom_evaluator() {
        let engine = make_engine(small_config().with_generations(2))
            .with_evaluator(Arc::new(ConstantEvaluator));
        let result = engine.execute();
        for record in &result.history {
            assert_eq!(record.stats.min, FitnessVector::new(1.0, 1.0));
            assert_eq!(record.stats.front_size, 40);
        }
    }
}
