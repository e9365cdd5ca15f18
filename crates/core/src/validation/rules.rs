//! Field rules and violation types.

use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::ValidationFailure;
use crate::movie::{MovieField, MovieRecord};

/// Lowest accepted price, inclusive.
pub const PRICE_MIN: Decimal = Decimal::ONE;
/// Highest accepted price, inclusive.
pub const PRICE_MAX: Decimal = Decimal::ONE_HUNDRED;

// ---------------------------------------------------------------------------
// Violations
// ---------------------------------------------------------------------------

/// What went wrong with a single field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum ViolationKind {
    /// The field is absent.
    Missing,
    /// The field is present but empty or whitespace.
    Blank,
    /// The value lies outside `[min, max]`.
    OutOfRange {
        min: Decimal,
        max: Decimal,
        actual: Decimal,
    },
}

impl ViolationKind {
    /// Error code in the vocabulary of the `validator` crate.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Missing | Self::Blank => "required",
            Self::OutOfRange { .. } => "range",
        }
    }
}

/// A single field-level rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: MovieField,
    #[serde(flatten)]
    pub kind: ViolationKind,
}

impl FieldViolation {
    pub fn new(field: MovieField, kind: ViolationKind) -> Self {
        Self { field, kind }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ViolationKind::Missing => write!(f, "{} is required", self.field),
            ViolationKind::Blank => write!(f, "{} must not be blank", self.field),
            ViolationKind::OutOfRange { min, max, actual } => write!(
                f,
                "{} must be between {min} and {max}, got {actual}",
                self.field
            ),
        }
    }
}

/// Aggregated outcome of running a rule set against one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub violations: Vec<FieldViolation>,
}

impl ValidationResult {
    pub fn from_violations(violations: Vec<FieldViolation>) -> Self {
        Self {
            is_valid: violations.is_empty(),
            violations,
        }
    }

    pub fn into_result(self) -> Result<(), ValidationFailure> {
        if self.is_valid {
            Ok(())
        } else {
            Err(ValidationFailure::new(self.violations))
        }
    }
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

/// A constraint on one field of a [`MovieRecord`].
///
/// Implementations must be pure: the same record always yields the same
/// answer.
pub trait FieldRule: fmt::Debug + Send + Sync {
    /// The field this rule inspects.
    fn field(&self) -> MovieField;

    /// Return a violation if `record` breaks the rule.
    fn check(&self, record: &MovieRecord) -> Option<FieldViolation>;
}

/// `title` must be present and contain a non-whitespace character.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TitleRequired;

impl FieldRule for TitleRequired {
    fn field(&self) -> MovieField {
        MovieField::Title
    }

    fn check(&self, record: &MovieRecord) -> Option<FieldViolation> {
        let kind = match record.title.as_deref() {
            None => ViolationKind::Missing,
            Some(title) if title.trim().is_empty() => ViolationKind::Blank,
            Some(_) => return None,
        };
        Some(FieldViolation::new(MovieField::Title, kind))
    }
}

/// `price` must lie within `[min, max]`, compared as exact decimals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceRange {
    pub min: Decimal,
    pub max: Decimal,
}

impl PriceRange {
    /// The catalog range, `[1, 100]`.
    pub const CATALOG: Self = Self::new(PRICE_MIN, PRICE_MAX);

    pub const fn new(min: Decimal, max: Decimal) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, price: Decimal) -> bool {
        (self.min..=self.max).contains(&price)
    }
}

impl FieldRule for PriceRange {
    fn field(&self) -> MovieField {
        MovieField::Price
    }

    fn check(&self, record: &MovieRecord) -> Option<FieldViolation> {
        if self.contains(record.price) {
            return None;
        }
        Some(FieldViolation::new(
            MovieField::Price,
            ViolationKind::OutOfRange {
                min: self.min,
                max: self.max,
                actual: record.price,
            },
        ))
    }
}
