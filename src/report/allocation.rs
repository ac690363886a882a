//! Human-readable allocation tables.

use serde::{Deserialize, Serialize};

use crate::ga::{AllocationProblem, AssignmentChromosome};

/// One task's allocation, as shown on an allocation board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationRow {
    /// Task name.
    pub task: String,
    /// Task effort demand.
    pub task_weight: f64,
    /// Assigned professional's name.
    pub professional: String,
    /// Assigned professional's capacity.
    pub capacity: f64,
    /// Processing time in hours, rounded to 2 decimals.
    pub estimated_time: f64,
    /// Whole hours billed.
    pub billable_hours: u64,
    /// Billed amount.
    pub cost: f64,
}

/// Load carried by one professional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkloadRow {
    /// Professional's name.
    pub professional: String,
    /// Accumulated processing time in hours, rounded to 2 decimals.
    pub total_time: f64,
    /// Number of tasks assigned.
    pub task_count: usize,
}

/// Decoded view of one chromosome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationReport {
    /// One row per task, in task order.
    pub rows: Vec<AllocationRow>,
    /// One row per professional with at least one task, in roster order.
    pub workload: Vec<WorkloadRow>,
    /// Largest accumulated time of any professional (hours, unrounded).
    pub makespan: f64,
    /// Sum of billed amounts.
    pub total_cost: f64,
}

/// Decodes chromosomes into allocation tables.
///
/// Uses the problem's own cost model, so reported times and costs are
/// exactly the ones the search optimized.
#[derive(Debug, Clone, Copy)]
pub struct SolutionReporter<'a> {
    problem: &'a AllocationProblem,
}

impl<'a> SolutionReporter<'a> {
    /// Creates a reporter for `problem`.
    pub fn new(problem: &'a AllocationProblem) -> Self {
        Self { problem }
    }

    /// Builds the allocation table, workload table and grand totals.
    ///
    /// Returns `None` if the chromosome's length differs from the task
    /// count or any gene is not a roster index.
    pub fn analyze(&self, chromosome: &AssignmentChromosome) -> Option<AllocationReport> {
        let catalog = self.problem.catalog();
        if !chromosome.is_valid(catalog.task_count(), catalog.professional_count()) {
            return None;
        }
        let model = self.problem.cost_model();
        let professionals = catalog.professionals();

        let mut time_by_professional = vec![0.0; professionals.len()];
        let mut task_count = vec![0usize; professionals.len()];
        let mut total_cost = 0.0;
        let mut rows = Vec::with_capacity(catalog.task_count());

        for (task, &p) in catalog.tasks().iter().zip(&chromosome.genes) {
            let professional = &professionals[p];
            let tc = model.task_cost(task, professional);
            time_by_professional[p] += tc.raw_time;
            task_count[p] += 1;
            total_cost += tc.cost;

            rows.push(AllocationRow {
                task: task.name.clone(),
                task_weight: task.weight,
                professional: professional.name.clone(),
                capacity: professional.capacity,
                estimated_time: round2(tc.raw_time),
                billable_hours: tc.billable_hours as u64,
                cost: tc.cost,
            });
        }

        let workload = professionals
            .iter()
            .enumerate()
            .filter(|&(i, _)| task_count[i] > 0)
            .map(|(i, p)| WorkloadRow {
                professional: p.name.clone(),
                total_time: round2(time_by_professional[i]),
                task_count: task_count[i],
            })
            .collect();

        let makespan = time_by_professional.iter().copied().fold(0.0, f64::max);

        Some(AllocationReport {
            rows,
            workload,
            makespan,
            total_cost,
        })
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
