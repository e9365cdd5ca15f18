//! Check results and their text / JSON renderings.

use std::io::{self, Write};

use movies_core::types::DbId;
use movies_core::validation::rules::ValidationResult;
use movies_core::{MovieRecord, RuleSet, ValidationPolicy};
use serde::Serialize;

/// Outcome for one record of one input.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordOutcome {
    pub source: String,
    /// Position of the record within its source.
    pub index: usize,
    pub id: DbId,
    #[serde(flatten)]
    pub result: ValidationResult,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub policy: ValidationPolicy,
    pub valid: usize,
    pub invalid: usize,
    pub records: Vec<RecordOutcome>,
}

impl Report {
    pub fn new(policy: ValidationPolicy) -> Self {
        Self {
            policy,
            valid: 0,
            invalid: 0,
            records: Vec::new(),
        }
    }

    /// Evaluate `records` from `source` and append their outcomes.
    pub fn check_all(&mut self, rules: &RuleSet, source: &str, records: &[MovieRecord]) {
        for (index, record) in records.iter().enumerate() {
            let result = rules.evaluate(record);
            if result.is_valid {
                self.valid += 1;
            } else {
                self.invalid += 1;
                tracing::warn!(
                    source,
                    index,
                    movie_id = record.id,
                    violations = result.violations.len(),
                    "Invalid movie record"
                );
            }
            self.records.push(RecordOutcome {
                source: source.to_string(),
                index,
                id: record.id,
                result,
            });
        }
    }

    pub fn all_valid(&self) -> bool {
        self.invalid == 0
    }

    pub fn write_text<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "policy: {}", self.policy)?;
        for outcome in &self.records {
            let status = if outcome.result.is_valid { "ok  " } else { "FAIL" };
            write!(
                out,
                "{status}  {}#{}  id={}",
                outcome.source, outcome.index, outcome.id
            )?;
            for violation in &outcome.result.violations {
                write!(out, "  {violation}")?;
            }
            writeln!(out)?;
        }
        writeln!(
            out,
            "{} records, {} valid, {} invalid",
            self.records.len(),
            self.valid,
            self.invalid
        )
    }

    pub fn write_json<W: Write>(&self, out: &mut W) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut *out, self)?;
        writeln!(out)
    }
}

#[cfg(test)]
mod tests {
    use movies_core::movie::parse_records;
    use serde_json::json;

    use super::*;

    fn sample_report(policy: ValidationPolicy) -> Report {
        let records = parse_records(
            r#"[
                {"id": 1, "title": "Inception", "releaseDate": "2010-07-16", "genre": "Sci-Fi", "price": 45},
                {"id": 2, "title": "", "releaseDate": null, "genre": null, "price": 5}
            ]"#,
        )
        .unwrap();
        let mut report = Report::new(policy);
        report.check_all(&policy.rule_set(), "movies.json", &records);
        report
    }

    #[test]
    fn counts_valid_and_invalid() {
        let report = sample_report(ValidationPolicy::Strict);
        assert_eq!(report.valid, 1);
        assert_eq!(report.invalid, 1);
        assert!(!report.all_valid());

        let report = sample_report(ValidationPolicy::Permissive);
        assert_eq!(report.valid, 2);
        assert!(report.all_valid());
    }

    #[test]
    fn text_report() {
        let mut out = Vec::new();
        sample_report(ValidationPolicy::Strict)
            .write_text(&mut out)
            .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "policy: strict\n\
             ok    movies.json#0  id=1\n\
             FAIL  movies.json#1  id=2  title must not be blank\n\
             2 records, 1 valid, 1 invalid\n"
        );
    }

    #[test]
    fn json_report() {
        let mut out = Vec::new();
        sample_report(ValidationPolicy::Strict)
            .write_json(&mut out)
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["policy"], json!("strict"));
        assert_eq!(value["invalid"], json!(1));
        assert_eq!(value["records"][1]["source"], json!("movies.json"));
        assert!(value["records"][0].get("is_valid").is_none());
        assert_eq!(value["records"][0]["isValid"], json!(true));
        assert_eq!(
            value["records"][1]["violations"],
            json!([{ "field": "title", "rule": "blank" }])
        );
    }
}
