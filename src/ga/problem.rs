//! Allocation problem definition.
//!
//! Bridges the catalog (tasks, professionals) to the search: creates
//! random individuals and evaluates them into a penalty-shaped
//! `(adjusted cost, adjusted time)` vector.
//!
//! # Cost Model
//!
//! For a task of weight `w` on a professional of capacity `c` and rate `r`:
//!
//! ```text
//! raw_time       = w / c                      if c >= w
//!                = w / c * overtime_multiplier otherwise
//! billable_hours = ceil(raw_time)
//! cost           = billable_hours * r
//! ```
//!
//! Per-professional times accumulate; `makespan` is the maximum and
//! `total_cost` the sum. The objectives are cross-coupled:
//!
//! ```text
//! adjusted_cost = total_cost + makespan * time_penalty
//! adjusted_time = makespan + total_cost * cost_penalty
//! ```

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::chromosome::{AssignmentChromosome, FitnessVector};
use super::operators::Evaluator;
use crate::models::{Catalog, Professional, Task};
use crate::validation::{ValidationError, ValidationErrorKind};

/// Cost/time model parameters shared by evaluation and reporting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostModel {
    /// Time multiplier applied when a task's weight exceeds capacity (default: 2.0).
    pub overtime_multiplier: f64,
    /// Cost added per hour of makespan (default: 50.0).
    pub time_penalty: f64,
    /// Time added per unit of total cost (default: 0.01).
    pub cost_penalty: f64,
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            overtime_multiplier: 2.0,
            time_penalty: 50.0,
            cost_penalty: 0.01,
        }
    }
}

/// Time and cost of a single task on a single professional.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaskCost {
    /// Processing time in hours, overtime included.
    pub raw_time: f64,
    /// Whole hours billed.
    pub billable_hours: f64,
    /// `billable_hours * hourly_rate`.
    pub cost: f64,
}

/// Aggregated totals of one assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct Workload {
    /// Accumulated raw time per professional (roster order).
    pub time_by_professional: Vec<f64>,
    /// Maximum accumulated time.
    pub makespan: f64,
    /// Sum of task costs.
    pub total_cost: f64,
}

impl CostModel {
    /// Sets the overtime multiplier.
    pub fn with_overtime_multiplier(mut self, multiplier: f64) -> Self {
        self.overtime_multiplier = multiplier;
        self
    }

    /// Sets the makespan penalty on the cost objective.
    pub fn with_time_penalty(mut self, penalty: f64) -> Self {
        self.time_penalty = penalty;
        self
    }

    /// Sets the cost penalty on the time objective.
    pub fn with_cost_penalty(mut self, penalty: f64) -> Self {
        self.cost_penalty = penalty;
        self
    }

    /// Computes time and cost of `task` when handled by `professional`.
    pub fn task_cost(&self, task: &Task, professional: &Professional) -> TaskCost {
        let base = professional.base_hours(task.weight);
        let raw_time = if task.fits_capacity(professional.capacity) {
            base
        } else {
            base * self.overtime_multiplier
        };
        let billable_hours = raw_time.ceil();
        TaskCost {
            raw_time,
            billable_hours,
            cost: billable_hours * professional.hourly_rate,
        }
    }

    /// Applies objective shaping to raw totals.
    #[inline]
    pub fn shape(&self, total_cost: f64, makespan: f64) -> FitnessVector {
        FitnessVector::new(
            total_cost + makespan * self.time_penalty,
            makespan + total_cost * self.cost_penalty,
        )
    }

    pub(crate) fn validate(&self, errors: &mut Vec<ValidationError>) {
        if !self.overtime_multiplier.is_finite() || self.overtime_multiplier <= 0.0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidParameter,
                format!(
                    "overtime_multiplier must be finite and > 0, got {}",
                    self.overtime_multiplier
                ),
            ));
        }
        for (name, value) in [
            ("time_penalty", self.time_penalty),
            ("cost_penalty", self.cost_penalty),
        ] {
            if !value.is_finite() || value < 0.0 {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidParameter,
                    format!("{name} must be finite and >= 0, got {value}"),
                ));
            }
        }
    }
}

/// Allocation problem: a validated catalog plus the cost model.
///
/// # Example
/// ```
/// use u_allocate::ga::{AllocationProblem, CostModel, Evaluator};
/// use u_allocate::models::{Catalog, Professional, Task};
///
/// let catalog = Catalog::new(
///     vec![Task::new("T1", 5.0), Task::new("T2", 5.0)],
///     vec![Professional::new("ana", 5.0, 10.0)],
/// ).unwrap();
/// let problem = AllocationProblem::new(catalog, CostModel::default());
/// let fitness = problem.evaluate(&[0, 0]);
/// assert!((fitness.cost - 120.0).abs() < 1e-9);
/// assert!((fitness.time - 2.2).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct AllocationProblem {
    catalog: Catalog,
    cost_model: CostModel,
}

impl AllocationProblem {
    /// Creates a problem from a validated catalog.
    pub fn new(catalog: Catalog, cost_model: CostModel) -> Self {
        Self {
            catalog,
            cost_model,
        }
    }

    /// The catalog this problem is defined over.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The cost model used for evaluation.
    pub fn cost_model(&self) -> &CostModel {
        &self.cost_model
    }

    /// Creates one uniformly random individual.
    pub fn create_individual<R: Rng + ?Sized>(&self, rng: &mut R) -> AssignmentChromosome {
        AssignmentChromosome::random(
            self.catalog.task_count(),
            self.catalog.professional_count(),
            rng,
        )
    }

    /// Creates `size` independent random individuals (unevaluated).
    pub fn create_population<R: Rng + ?Sized>(
        &self,
        size: usize,
        rng: &mut R,
    ) -> Vec<AssignmentChromosome> {
        (0..size).map(|_| self.create_individual(rng)).collect()
    }

    /// Whether `genes` has one in-range professional index per task.
    pub fn accepts(&self, genes: &[usize]) -> bool {
        let p = self.catalog.professional_count();
        genes.len() == self.catalog.task_count() && genes.iter().all(|&g| g < p)
    }

    /// Computes raw per-professional time, makespan and total cost.
    ///
    /// Returns `None` if `genes` does not fit the catalog.
    pub fn workload(&self, genes: &[usize]) -> Option<Workload> {
        if !self.accepts(genes) {
            return None;
        }
        let professionals = self.catalog.professionals();
        let mut time_by_professional = vec![0.0; professionals.len()];
        let mut total_cost = 0.0;

        for (task, &p) in self.catalog.tasks().iter().zip(genes) {
            let tc = self.cost_model.task_cost(task, &professionals[p]);
            time_by_professional[p] += tc.raw_time;
            total_cost += tc.cost;
        }

        let makespan = time_by_professional.iter().copied().fold(0.0, f64::max);
        Some(Workload {
            time_by_professional,
            makespan,
            total_cost,
        })
    }
}

impl Evaluator for AllocationProblem {
    fn evaluate(&self, genes: &[usize]) -> FitnessVector {
        match self.workload(genes) {
            Some(w) => self.cost_model.shape(w.total_cost, w.makespan),
            None => FitnessVector::infeasible(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn make_problem() -> AllocationProblem {
        let tasks = [2.0, 5.0, 3.0, 4.0, 7.0, 6.0, 9.0, 3.0, 4.0, 8.0]
            .iter()
            .enumerate()
            .map(|(i, &w)| Task::new(format!("Ticket {}", i + 1), w))
            .collect();
        let pros = vec![
            Professional::new("felipe", 2.0, 100.0),
            Professional::new("paulo", 3.0, 110.0),
            Professional::new("joao", 4.0, 120.0),
            Professional::new("gabriel", 5.0, 130.0),
            Professional::new("pedro", 6.0, 140.0),
        ];
        AllocationProblem::new(Catalog::new(tasks, pros).unwrap(), CostModel::default())
    }

    #[test]
    fn test_two_tasks_one_professional() {
        let catalog = Catalog::new(
            vec![Task::new("A", 5.0), Task::new("B", 5.0)],
            vec![Professional::new("solo", 5.0, 10.0)],
        )
        .unwrap();
        let problem = AllocationProblem::new(catalog, CostModel::default());

        let w = problem.workload(&[0, 0]).unwrap();
        assert!((w.total_cost - 20.0).abs() < 1e-10);
        assert!((w.makespan - 2.0).abs() < 1e-10);

        let f = problem.evaluate(&[0, 0]);
        assert!((f.cost - 120.0).abs() < 1e-10);
        assert!((f.time - 2.2).abs() < 1e-10);
    }

    #[test]
    fn test_overtime_multiplier() {
        let model = CostModel::default();
        let tc = model.task_cost(&Task::new("big", 10.0), &Professional::new("p", 5.0, 1.0));
        assert!((tc.raw_time - 4.0).abs() < 1e-10);
        assert!((tc.billable_hours - 4.0).abs() < 1e-10);

        let lenient = model.with_overtime_multiplier(1.5);
        let tc = lenient.task_cost(&Task::new("big", 10.0), &Professional::new("p", 5.0, 1.0));
        assert!((tc.raw_time - 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_billable_hours_round_up() {
        let model = CostModel::default();
        let tc = model.task_cost(&Task::new("t", 2.0), &Professional::new("p", 3.0, 100.0));
        assert!((tc.raw_time - 2.0 / 3.0).abs() < 1e-10);
        assert!((tc.billable_hours - 1.0).abs() < 1e-10);
        assert!((tc.cost - 100.0).abs() < 1e-10);
    }

    #[test]
    fn test_evaluation_deterministic() {
        let problem = make_problem();
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..20 {
            let ch = problem.create_individual(&mut rng);
            assert_eq!(problem.evaluate(&ch.genes), problem.evaluate(&ch.genes));
        }
    }

    #[test]
    fn test_raising_rate_never_lowers_cost() {
        let problem = make_problem();
        let mut rng = SmallRng::seed_from_u64(42);

        for p in 0..problem.catalog().professional_count() {
            let mut pros = problem.catalog().professionals().to_vec();
            pros[p].hourly_rate += 25.0;
            let pricier = AllocationProblem::new(
                Catalog::new(problem.catalog().tasks().to_vec(), pros).unwrap(),
                CostModel::default(),
            );
            for _ in 0..20 {
                let ch = problem.create_individual(&mut rng);
                let before = problem.workload(&ch.genes).unwrap().total_cost;
                let after = pricier.workload(&ch.genes).unwrap().total_cost;
                assert!(after >= before);
            }
        }
    }

    #[test]
    fn test_create_population() {
        let problem = make_problem();
        let mut rng = SmallRng::seed_from_u64(42);
        let pop = problem.create_population(30, &mut rng);
        assert_eq!(pop.len(), 30);
        assert!(pop.iter().all(|c| c.is_valid(10, 5) && !c.is_evaluated()));
    }

    #[test]
    fn test_idle_professionals_do_not_count() {
        let problem = make_problem();
        let w = problem.workload(&[4; 10]).unwrap();
        assert!((w.makespan - w.time_by_professional[4]).abs() < 1e-10);
        assert!(w.time_by_professional[..4].iter().all(|&t| t == 0.0));
    }

    #[test]
    fn test_mismatched_genes_are_infeasible() {
        let problem = make_problem();
        assert!(problem.accepts(&[4; 10]));

        for genes in [vec![0; 9], vec![0; 11], vec![5; 10], vec![]] {
            assert!(!problem.accepts(&genes));
            assert!(problem.workload(&genes).is_none());
            assert_eq!(problem.evaluate(&genes), FitnessVector::infeasible());
        }
    }

    #[test]
    fn test_cost_model_validation() {
        let mut errors = Vec::new();
        CostModel::default()
            .with_overtime_multiplier(0.0)
            .with_cost_penalty(-1.0)
            .validate(&mut errors);
        assert_eq!(errors.len(), 2);
    }
}
