//! Movie record model and its validation rules.
//!
//! Pure logic, no storage or transport. Callers pick a [`ValidationPolicy`]
//! per deployment and validate records at their own boundary.

pub mod config;
pub mod error;
pub mod movie;
pub mod types;
pub mod validation;

pub use error::{CoreError, ValidationFailure};
pub use movie::{MovieField, MovieRecord};
pub use validation::policy::{RuleSet, ValidationPolicy};
