use thiserror::Error;

/// Errors raised while loading a [`LintConfig`](crate::config::LintConfig).
///
/// Checking a document never fails; malformed LaTeX surfaces as advisories.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed configuration: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
