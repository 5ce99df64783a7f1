//! Gradebook error types.
//!
//! Every variant is recoverable: callers report it to the user and carry on.
//! Looking up an unknown student id is not an error and has no variant here.

use thiserror::Error;

/// Errors raised by the grading core and the form intake.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GradebookError {
    /// A student has no module marks, so no average exists.
    #[error("student {id} has no module marks to average")]
    EmptyMarks { id: String },

    /// A submitted form failed validation before reaching the repository.
    #[error("invalid input: {0}")]
    Validation(String),

    /// A new record was submitted under an id that is already taken.
    #[error("student ID '{0}' already exists")]
    DuplicateId(String),

    /// The cohort label is not part of the year catalog.
    #[error("unknown year: {0}")]
    UnknownYear(String),
}

impl GradebookError {
    /// Returns `true` for errors caused by bad form input.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            GradebookError::Validation(_) | GradebookError::UnknownYear(_)
        )
    }
}
