//! gradebook-core — Student records, grading rules and the in-memory repository.
//!
//! This crate defines the data model, the grade thresholds, the form intake
//! that guards the repository, and the repository itself. Nothing here
//! touches the terminal or the filesystem except config loading.

pub mod catalog;
pub mod config;
pub mod error;
pub mod grading;
pub mod intake;
pub mod manager;
pub mod model;
pub mod statistics;

pub use error::GradebookError;
pub use grading::Grade;
pub use manager::StudentManager;
pub use model::{ModuleMarks, Student};
