//! Task model.
//!
//! A task is a unit of work with an effort demand (`weight`) in abstract
//! units. It is processed by exactly one professional.

use serde::{Deserialize, Serialize};

/// A task to be allocated.
///
/// The weight is compared against a professional's capacity to decide
/// whether the task runs at normal pace or in overtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Human-readable, unique task name.
    pub name: String,
    /// Effort demand (abstract units, > 0).
    pub weight: f64,
}

impl Task {
    /// Creates a new task.
    pub fn new(name: impl Into<String>, weight: f64) -> Self {
        Self {
            name: name.into(),
            weight,
        }
    }

    /// Sets the effort demand.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Whether a professional with the given capacity can absorb this task
    /// without going into overtime.
    #[inline]
    pub fn fits_capacity(&self, capacity: f64) -> bool {
        capacity >= self.weight
    }
}
