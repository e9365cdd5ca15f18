//! `validator` crate interop.
//!
//! Lets code already built around [`validator::Validate`] (request
//! extractors, form handlers) check a [`MovieRecord`] without knowing about
//! [`RuleSet`](super::policy::RuleSet). The trait carries no policy argument,
//! so it always applies the strict policy.

use std::borrow::Cow;

use validator::{Validate, ValidationError, ValidationErrors};

use super::policy::ValidationPolicy;
use super::rules::ViolationKind;
use crate::error::ValidationFailure;
use crate::movie::MovieRecord;

impl Validate for MovieRecord {
    fn validate(&self) -> Result<(), ValidationErrors> {
        ValidationPolicy::Strict
            .rule_set()
            .check(self)
            .map_err(|failure| to_validation_errors(&failure))
    }
}

/// Convert a failure into `validator`'s per-field error map.
///
/// Codes are `required` for title violations and `range` for price
/// violations; range errors carry `min`, `max` and `value` params.
pub fn to_validation_errors(failure: &ValidationFailure) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    for violation in &failure.violations {
        let mut error = ValidationError::new(violation.kind.code());
        error.message = Some(Cow::Owned(violation.to_string()));
        if let ViolationKind::OutOfRange { min, max, actual } = &violation.kind {
            error.add_param(Cow::Borrowed("min"), min);
            error.add_param(Cow::Borrowed("max"), max);
            error.add_param(Cow::Borrowed("value"), actual);
        }
        errors.add(violation.field.as_str(), error);
    }
    errors
}
