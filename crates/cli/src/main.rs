use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use movies_core::config::ValidationConfig;
use movies_core::movie::parse_records;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod args;
mod report;

use args::{Args, OutputFormat};
use report::Report;

const EXIT_OK: u8 = 0;
const EXIT_INVALID: u8 = 1;
const EXIT_ERROR: u8 = 2;

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_tracing(args.verbose);

    let outcome = run(&args);
    if let Err(err) = &outcome {
        tracing::error!(error = %format!("{err:#}"), "Movie check aborted");
    }
    ExitCode::from(exit_code(&outcome))
}

/// Map a run to the process exit status.
fn exit_code(outcome: &anyhow::Result<Report>) -> u8 {
    match outcome {
        Ok(report) if report.all_valid() => EXIT_OK,
        Ok(_) => EXIT_INVALID,
        Err(_) => EXIT_ERROR,
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "movies_check=debug,movies_core=debug"
    } else {
        "movies_check=info,movies_core=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn run(args: &Args) -> anyhow::Result<Report> {
    let mut config = ValidationConfig::from_env()?;
    if let Some(policy) = args.policy {
        config = config.with_policy(policy);
    }
    tracing::info!(policy = %config.policy, "Validation policy selected");

    let report = check_inputs(&args.files, io::stdin(), config)?;
    tracing::info!(
        valid = report.valid,
        invalid = report.invalid,
        "Movie check finished"
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let written = match args.format {
        OutputFormat::Text => report.write_text(&mut out),
        OutputFormat::Json => report.write_json(&mut out),
    };
    written.context("failed to write report")?;
    out.flush().context("failed to write report")?;

    Ok(report)
}

/// Read, parse and validate every input. `stdin` stands in for an empty
/// file list.
fn check_inputs<R: Read>(
    files: &[PathBuf],
    mut stdin: R,
    config: ValidationConfig,
) -> anyhow::Result<Report> {
    let rules = config.policy.rule_set();
    let mut report = Report::new(config.policy);

    if files.is_empty() {
        let mut input = String::new();
        stdin
            .read_to_string(&mut input)
            .context("failed to read standard input")?;
        let records = parse_records(&input).context("failed to parse standard input")?;
        report.check_all(&rules, "<stdin>", &records);
        return Ok(report);
    }

    for path in files {
        let source = path.display().to_string();
        let input = fs::read_to_string(path)
            .with_context(|| format!("failed to read {source}"))?;
        let records = parse_records(&input).with_context(|| format!("failed to parse {source}"))?;
        tracing::debug!(source = %source, count = records.len(), "Parsed movie records");
        report.check_all(&rules, &source, &records);
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use movies_core::ValidationPolicy;
    use tempfile::NamedTempFile;

    use super::*;

    fn json_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn strict() -> ValidationConfig {
        ValidationConfig::default()
    }

    #[test]
    fn checks_every_file() {
        let a = json_file(r#"{"id": 1, "title": "Inception", "price": 45}"#);
        let b = json_file(r#"[{"id": 2, "title": "", "price": 5}, {"id": 3, "title": "Heat", "price": 101}]"#);

        let files = [a.path().to_path_buf(), b.path().to_path_buf()];
        let report = check_inputs(&files, io::empty(), strict()).unwrap();

        assert_eq!(report.records.len(), 3);
        assert_eq!(report.valid, 1);
        assert_eq!(report.invalid, 2);
        assert_eq!(report.records[2].index, 1);
        assert_eq!(report.records[2].source, b.path().display().to_string());
    }

    #[test]
    fn permissive_override_accepts_all() {
        let file = json_file(r#"[{"id": 2, "title": "", "price": 5}, {"id": 3, "price": 0}]"#);
        let config = strict().with_policy(ValidationPolicy::Permissive);

        let report = check_inputs(&[file.path().to_path_buf()], io::empty(), config).unwrap();

        assert!(report.all_valid());
        assert_eq!(report.policy, ValidationPolicy::Permissive);
    }

    #[test]
    fn missing_file_is_an_error() {
        let files = [PathBuf::from("/nonexistent/movies.json")];
        let err = check_inputs(&files, io::empty(), strict()).unwrap_err();
        assert!(err.to_string().starts_with("failed to read "));
    }

    #[test]
    fn malformed_json_names_the_source() {
        let file = json_file("[{\"id\": 1,");
        let err = check_inputs(&[file.path().to_path_buf()], io::empty(), strict()).unwrap_err();
        assert!(err.to_string().starts_with("failed to parse "));
    }

    #[test]
    fn reads_stdin_when_no_files_given() {
        let input = br#"[{"id": 1, "title": "Inception", "price": 45}, {"id": 2, "price": 5}]"#;
        let report = check_inputs(&[], &input[..], strict()).unwrap();

        assert_eq!(report.records.len(), 2);
        assert_eq!(report.records[0].source, "<stdin>");
        assert_eq!(report.invalid, 1);
    }

    #[test]
    fn stdin_is_ignored_when_files_given() {
        let file = json_file(r#"{"id": 1, "title": "Inception", "price": 45}"#);
        let report =
            check_inputs(&[file.path().to_path_buf()], &b"not json"[..], strict()).unwrap();
        assert_eq!(report.records.len(), 1);
    }

    #[test]
    fn malformed_stdin_is_an_error() {
        let err = check_inputs(&[], &b"[{"[..], strict()).unwrap_err();
        assert_eq!(err.to_string(), "failed to parse standard input");
    }

    // -- exit_code ------------------------------------------------------------

    #[test]
    fn exit_zero_when_all_valid() {
        let outcome = check_inputs(&[], &br#"{"title": "Heat", "price": 20}"#[..], strict());
        assert_eq!(exit_code(&outcome), 0);
    }

    #[test]
    fn exit_one_when_any_invalid() {
        let outcome = check_inputs(
            &[],
            &br#"[{"title": "Heat", "price": 20}, {"title": "", "price": 20}]"#[..],
            strict(),
        );
        assert_eq!(exit_code(&outcome), 1);
    }

    #[test]
    fn exit_two_on_read_or_parse_error() {
        let unreadable = check_inputs(
            &[PathBuf::from("/nonexistent/movies.json")],
            io::empty(),
            strict(),
        );
        assert_eq!(exit_code(&unreadable), 2);

        let unparsable = check_inputs(&[], &b"42"[..], strict());
        assert_eq!(exit_code(&unparsable), 2);
    }
}
