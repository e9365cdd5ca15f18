use serde::Serialize;

use crate::movie::MovieField;
use crate::validation::rules::FieldViolation;

/// A record broke one or more constraints of the active policy.
///
/// Carries every violation found, in field declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("validation failed: {}", join_violations(.violations))]
pub struct ValidationFailure {
    pub violations: Vec<FieldViolation>,
}

impl ValidationFailure {
    pub fn new(violations: Vec<FieldViolation>) -> Self {
        Self { violations }
    }

    /// The offending fields, one entry per violation.
    pub fn fields(&self) -> impl Iterator<Item = MovieField> + '_ {
        self.violations.iter().map(|v| v.field)
    }

    pub fn has_violation(&self, field: MovieField) -> bool {
        self.fields().any(|f| f == field)
    }
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationFailure),

    #[error("Invalid validation policy: '{0}'. Valid policies: strict, permissive")]
    InvalidPolicy(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Malformed movie JSON: {0}")]
    Parse(#[from] serde_json::Error),
}
