//! Error types for the `gherkin-tags` tool.

use std::path::PathBuf;

use gherkin_tag_lexer::TagExpressionError;
use thiserror::Error;

/// Errors that can occur while configuring or running the tool.
#[derive(Debug, Error)]
pub enum CliError {
    /// An invalid configuration value was provided.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A `--tags` filter could not be parsed.
    #[error("invalid tag filter: {0}")]
    Expression(#[from] TagExpressionError),

    /// A feature source could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// The source that failed.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// Writing the report failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON record could not be serialised.
    #[error("JSON output failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Process exit code for this error: 2 for bad configuration, 1 otherwise.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidConfig(_) | Self::Expression(_) => 2,
            Self::Read { .. } | Self::Io(_) | Self::Json(_) => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_config_error_displays_message() {
        let error = CliError::InvalidConfig("unknown log level".to_string());
        assert_eq!(
            error.to_string(),
            "invalid configuration: unknown log level"
        );
        assert_eq!(error.exit_code(), 2);
    }

    #[test]
    fn read_error_names_the_path() {
        let error = CliError::Read {
            path: PathBuf::from("missing.feature"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
        };
        assert_eq!(
            error.to_string(),
            "failed to read missing.feature: file not found"
        );
        assert_eq!(error.exit_code(), 1);
    }

    #[test]
    fn io_error_converts_from_std_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let error: CliError = io_err.into();
        assert!(error.to_string().contains("pipe closed"));
    }

    #[test]
    fn expression_errors_are_configuration_failures() {
        let Err(source) = gherkin_tag_lexer::TagExpression::new(["nope"]) else {
            panic!("expected `nope` to be rejected");
        };
        let error = CliError::from(source);
        assert!(error.to_string().starts_with("invalid tag filter: "));
        assert_eq!(error.exit_code(), 2);
    }
}
