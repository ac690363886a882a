//! Input validation for allocation problems.
//!
//! Checks structural and numeric integrity of tasks and professionals
//! before any search runs. Detects:
//! - Empty task list or empty roster
//! - Non-positive or non-finite task weights
//! - Non-positive capacities (would divide by zero in the cost model)
//! - Negative or non-finite hourly rates
//! - Duplicate names
//!
//! All problems are collected; validation never stops at the first one.

use crate::models::{Professional, Task};
use std::collections::HashSet;
use std::fmt;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// No tasks were supplied.
    NoTasks,
    /// No professionals were supplied.
    NoProfessionals,
    /// Two entities share the same name.
    DuplicateName,
    /// A task weight is zero, negative, or not finite.
    InvalidWeight,
    /// A capacity is zero, negative, or not finite.
    InvalidCapacity,
    /// An hourly rate is negative or not finite.
    InvalidRate,
    /// An engine parameter is out of range.
    InvalidParameter,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Joins error messages for display in a single line.
pub(crate) fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Validates the catalog of an allocation problem.
///
/// Checks:
/// 1. At least one task and one professional
/// 2. Every task weight is finite and > 0
/// 3. Every capacity is finite and > 0
/// 4. Every hourly rate is finite and >= 0
/// 5. No duplicate task names, no duplicate professional names
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_catalog(tasks: &[Task], professionals: &[Professional]) -> ValidationResult {
    let mut errors = Vec::new();

    if tasks.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::NoTasks,
            "Task list is empty",
        ));
    }
    if professionals.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::NoProfessionals,
            "Professional list is empty",
        ));
    }

    let mut task_names = HashSet::new();
    for task in tasks {
        if !task_names.insert(task.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateName,
                format!("Duplicate task name: {}", task.name),
            ));
        }
        if !task.weight.is_finite() || task.weight <= 0.0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidWeight,
                format!("Task '{}' has invalid weight {}", task.name, task.weight),
            ));
        }
    }

    let mut professional_names = HashSet::new();
    for p in professionals {
        if !professional_names.insert(p.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateName,
                format!("Duplicate professional name: {}", p.name),
            ));
        }
        if !p.capacity.is_finite() || p.capacity <= 0.0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidCapacity,
                format!("Professional '{}' has invalid capacity {}", p.name, p.capacity),
            ));
        }
        if !p.hourly_rate.is_finite() || p.hourly_rate < 0.0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidRate,
                format!(
                    "Professional '{}' has invalid hourly rate {}",
                    p.name, p.hourly_rate
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
