use crate::error::CoreError;
use crate::validation::policy::ValidationPolicy;

/// Environment variable selecting the active validation policy.
pub const POLICY_ENV_VAR: &str = "MOVIES_VALIDATION_POLICY";

/// Validation settings for one deployment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationConfig {
    /// The single policy applied to every record (default: `strict`).
    pub policy: ValidationPolicy,
}

impl ValidationConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default  |
    /// |----------------------------|----------|
    /// | `MOVIES_VALIDATION_POLICY` | `strict` |
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    ///
    /// An unset or empty variable falls back to the default policy; an
    /// unrecognised value is an error rather than a silent fallback.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let policy = match lookup(POLICY_ENV_VAR) {
            Some(raw) if !raw.trim().is_empty() => raw.parse().map_err(|_| {
                CoreError::Config(format!(
                    "{POLICY_ENV_VAR} must be 'strict' or 'permissive', got '{raw}'"
                ))
            })?,
            _ => ValidationPolicy::default(),
        };
        Ok(Self { policy })
    }

    /// Replace the policy, e.g. from a command-line override.
    pub fn with_policy(mut self, policy: ValidationPolicy) -> Self {
        self.policy = policy;
        self
    }
}
