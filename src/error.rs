//! Error types for allocation runs.

use thiserror::Error;

use crate::validation::{join_messages, ValidationError};

/// Result type alias using [`AllocationError`].
pub type Result<T> = std::result::Result<T, AllocationError>;

/// Errors raised while constructing an allocation engine.
///
/// A run that has been constructed successfully cannot fail; observer
/// failures are logged and swallowed.
#[derive(Debug, Error)]
pub enum AllocationError {
    /// The task/professional catalog failed validation.
    #[error("invalid catalog: {}", join_messages(.0))]
    InvalidInput(Vec<ValidationError>),

    /// An engine parameter is out of range.
    #[error("invalid engine configuration: {}", join_messages(.0))]
    InvalidConfig(Vec<ValidationError>),

    /// The evaluation worker pool could not be created.
    #[error("failed to build evaluation thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl AllocationError {
    /// Validation errors carried by this error, if any.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            Self::InvalidInput(errors) | Self::InvalidConfig(errors) => errors,
            Self::ThreadPool(_) => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_display_joins_messages() {
        let err = AllocationError::InvalidInput(vec![
            ValidationError::new(ValidationErrorKind::NoTasks, "Task list is empty"),
            ValidationError::new(ValidationErrorKind::NoProfessionals, "Professional list is empty"),
        ]);
        assert_eq!(
            err.to_string(),
            "invalid catalog: Task list is empty; Professional list is empty"
        );
        assert_eq!(err.validation_errors().len(), 2);
    }
}
