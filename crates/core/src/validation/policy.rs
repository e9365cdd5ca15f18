//! Validation policies and the rule sets they resolve to.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::rules::{FieldRule, PriceRange, TitleRequired, ValidationResult};
use crate::error::{CoreError, ValidationFailure};
use crate::movie::{MovieField, MovieRecord};

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

pub const POLICY_STRICT: &str = "strict";
pub const POLICY_PERMISSIVE: &str = "permissive";

/// Which constraints apply to movie records in a deployment.
///
/// Exactly one policy is active at a time; see
/// [`ValidationConfig`](crate::config::ValidationConfig).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationPolicy {
    /// Title required, price in `[1, 100]`.
    #[default]
    Strict,
    /// No constraints beyond the field types.
    Permissive,
}

impl ValidationPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strict => POLICY_STRICT,
            Self::Permissive => POLICY_PERMISSIVE,
        }
    }

    /// Build the rule set enforced under this policy.
    pub fn rule_set(&self) -> RuleSet {
        match self {
            Self::Strict => RuleSet::empty()
                .with_rule(TitleRequired)
                .with_rule(PriceRange::CATALOG),
            Self::Permissive => RuleSet::empty(),
        }
    }
}

impl FromStr for ValidationPolicy {
    type Err = CoreError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            POLICY_STRICT => Ok(Self::Strict),
            POLICY_PERMISSIVE => Ok(Self::Permissive),
            _ => Err(CoreError::InvalidPolicy(s.to_string())),
        }
    }
}

impl fmt::Display for ValidationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Rule set
// ---------------------------------------------------------------------------

/// An ordered collection of field rules evaluated together.
///
/// Every rule runs; nothing short-circuits. Violations come back sorted by
/// field declaration order, ties keeping rule order.
#[derive(Debug, Default)]
pub struct RuleSet {
    rules: Vec<Box<dyn FieldRule>>,
}

impl RuleSet {
    /// A rule set that accepts every record.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_rule(mut self, rule: impl FieldRule + 'static) -> Self {
        self.push(rule);
        self
    }

    pub fn push(&mut self, rule: impl FieldRule + 'static) {
        self.rules.push(Box::new(rule));
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Fields constrained by at least one rule, in rule order.
    pub fn fields(&self) -> Vec<MovieField> {
        let mut fields: Vec<MovieField> = Vec::with_capacity(self.rules.len());
        for field in self.rules.iter().map(|r| r.field()) {
            if !fields.contains(&field) {
                fields.push(field);
            }
        }
        fields
    }

    pub fn evaluate(&self, record: &MovieRecord) -> ValidationResult {
        let mut violations: Vec<_> = self
            .rules
            .iter()
            .filter_map(|rule| rule.check(record))
            .collect();
        violations.sort_by_key(|v| v.field);
        ValidationResult::from_violations(violations)
    }

    pub fn check(&self, record: &MovieRecord) -> Result<(), ValidationFailure> {
        self.evaluate(record).into_result()
    }
}
