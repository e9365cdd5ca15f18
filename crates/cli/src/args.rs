use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use movies_core::ValidationPolicy;

/// Validate movie records against the deployment's validation policy.
///
/// Exit status is 0 when every record is valid, 1 when any record is
/// invalid, and 2 when input cannot be read or parsed.
#[derive(Debug, Parser)]
#[command(name = "movies-check", version)]
pub struct Args {
    /// JSON files holding one movie object or an array of them.
    /// Standard input is read when no file is given.
    pub files: Vec<PathBuf>,

    /// Override the policy from MOVIES_VALIDATION_POLICY (strict, permissive).
    #[arg(long)]
    pub policy: Option<ValidationPolicy>,

    /// Report format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Enable debug logging.
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
