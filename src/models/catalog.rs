//! Validated task/professional catalog.

use serde::Serialize;

use super::{Professional, Task};
use crate::error::{AllocationError, Result};
use crate::validation::validate_catalog;

/// Immutable set of tasks and professionals an allocation is built over.
///
/// Construction validates the inputs, so every capacity is strictly
/// positive and both lists are non-empty for the lifetime of the value.
#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    tasks: Vec<Task>,
    professionals: Vec<Professional>,
}

impl Catalog {
    /// Validates and wraps the given tasks and professionals.
    ///
    /// # Errors
    /// [`AllocationError::InvalidInput`] listing every detected problem.
    pub fn new(tasks: Vec<Task>, professionals: Vec<Professional>) -> Result<Self> {
        validate_catalog(&tasks, &professionals).map_err(AllocationError::InvalidInput)?;
        Ok(Self {
            tasks,
            professionals,
        })
    }

    /// Tasks in chromosome gene order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Professionals; genes are indices into this slice.
    pub fn professionals(&self) -> &[Professional] {
        &self.professionals
    }

    /// Number of tasks (chromosome length).
    #[inline]
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Number of professionals (exclusive upper bound of every gene).
    #[inline]
    pub fn professional_count(&self) -> usize {
        self.professionals.len()
    }
}
