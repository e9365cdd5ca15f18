//! The movie record and its JSON intake.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{CoreError, ValidationFailure};
use crate::types::DbId;
use crate::validation::policy::ValidationPolicy;

// ---------------------------------------------------------------------------
// Fields
// ---------------------------------------------------------------------------

/// Identifies one field of a [`MovieRecord`] by its serialized name.
/// Ordered by declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MovieField {
    Id,
    Title,
    ReleaseDate,
    Genre,
    Price,
}

impl MovieField {
    /// The serialized (JSON) field name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Title => "title",
            Self::ReleaseDate => "releaseDate",
            Self::Genre => "genre",
            Self::Price => "price",
        }
    }
}

impl fmt::Display for MovieField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// A single movie as exchanged with storage or an API.
///
/// A passive value: fields are public and carry no behavior of their own.
/// Constraints are applied separately through a [`ValidationPolicy`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MovieRecord {
    pub id: DbId,
    pub title: Option<String>,
    /// Calendar date only; any time-of-day on input is dropped.
    #[serde(deserialize_with = "deserialize_release_date")]
    pub release_date: Option<NaiveDate>,
    pub genre: Option<String>,
    pub price: Decimal,
}

impl MovieRecord {
    pub fn new(id: DbId) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_release_date(mut self, release_date: NaiveDate) -> Self {
        self.release_date = Some(release_date);
        self
    }

    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    pub fn with_price(mut self, price: Decimal) -> Self {
        self.price = price;
        self
    }

    /// Check this record against the rules of `policy`.
    pub fn validate_with(&self, policy: ValidationPolicy) -> Result<(), ValidationFailure> {
        let result = policy.rule_set().check(self);
        if let Err(failure) = &result {
            tracing::debug!(
                movie_id = self.id,
                policy = %policy,
                fields = ?failure.fields().map(|f| f.as_str()).collect::<Vec<_>>(),
                "Movie record failed validation"
            );
        }
        result
    }

    /// Check this record against the strict policy.
    pub fn validate_strict(&self) -> Result<(), ValidationFailure> {
        self.validate_with(ValidationPolicy::Strict)
    }
}

// ---------------------------------------------------------------------------
// Intake
// ---------------------------------------------------------------------------

/// Parse a release date, accepting a plain date or a full date-time.
///
/// Accepted forms: `2010-07-16`, `2010-07-16T20:30:00`, and RFC 3339 with an
/// offset. For date-times the local calendar date is kept.
pub fn parse_release_date(raw: &str) -> Result<NaiveDate, chrono::ParseError> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.date_naive());
    }
    raw.parse::<NaiveDateTime>().map(|dt| dt.date())
}

fn deserialize_release_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    raw.map(|s| {
        parse_release_date(&s)
            .map_err(|e| serde::de::Error::custom(format!("invalid releaseDate '{s}': {e}")))
    })
    .transpose()
}

/// Parse one movie object or an array of movie objects.
///
/// Records are deserialized straight from the text so numeric prices never
/// pass through `f64`.
pub fn parse_records(input: &str) -> Result<Vec<MovieRecord>, CoreError> {
    match input.trim_start().chars().next() {
        Some('[') => Ok(serde_json::from_str(input)?),
        Some('{') => Ok(vec![serde_json::from_str(input)?]),
        _ => Err(CoreError::Parse(serde::de::Error::custom(
            "expected a movie object or an array of movie objects",
        ))),
    }
}
