//! Cross-generation Pareto archive (hall of fame).

use serde::Serialize;

use crate::ga::{AssignmentChromosome, FitnessVector};

/// Non-dominated set of every evaluated individual seen so far.
///
/// # Invariants
/// - No member is dominated by another member.
/// - No two members share the same genes.
/// - Every member is evaluated.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ParetoArchive {
    members: Vec<AssignmentChromosome>,
}

impl ParetoArchive {
    /// Creates an empty archive.
    pub fn new() -> Self {
        Self::default()
    }

    /// Offers one candidate. Returns `true` if it was admitted.
    ///
    /// Unevaluated or infeasible candidates, duplicates and dominated
    /// candidates are rejected. Admission evicts every member the
    /// candidate dominates.
    pub fn insert(&mut self, candidate: &AssignmentChromosome) -> bool {
        let Some(fitness) = candidate.fitness else {
            return false;
        };
        if !fitness.is_finite() {
            return false;
        }

        let rejected = self.members.iter().any(|m| {
            m.genes == candidate.genes || member_fitness(m).dominates(&fitness)
        });
        if rejected {
            return false;
        }

        self.members
            .retain(|m| !fitness.dominates(&member_fitness(m)));
        self.members.push(candidate.clone());
        true
    }

    /// Offers every individual of a population. Returns the number admitted.
    pub fn update(&mut self, population: &[AssignmentChromosome]) -> usize {
        population.iter().filter(|c| self.insert(c)).count()
    }

    /// Current members, in admission order.
    pub fn members(&self) -> &[AssignmentChromosome] {
        &self.members
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the archive is empty.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Consumes the archive, returning its members.
    pub fn into_members(self) -> Vec<AssignmentChromosome> {
        self.members
    }
}

// Members are always evaluated (checked on insert).
fn member_fitness(member: &AssignmentChromosome) -> FitnessVector {
    member.fitness.unwrap_or(FitnessVector::infeasible())
}
