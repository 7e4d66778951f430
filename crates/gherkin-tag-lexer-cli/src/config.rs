//! Tool configuration parsed from environment variables.
//!
//! Every setting can be supplied through an environment variable prefixed
//! with `GHERKIN_TAGS_` and overridden on the command line.

use std::env;
use std::str::FromStr;

use gherkin_tag_lexer::{MidWordTags, ScanOptions};

use crate::error::CliError;

/// Environment variable holding the log level.
pub const LOG_LEVEL_VAR: &str = "GHERKIN_TAGS_LOG_LEVEL";
/// Environment variable holding the mid-word tag policy.
pub const MID_WORD_VAR: &str = "GHERKIN_TAGS_MID_WORD";

/// Log level enumeration matching tracing crate levels.
///
/// Defaults to `Warn`, keeping stderr quiet for ordinary runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Per-line routing decisions inside the scanner.
    Trace,
    /// Doc string fences and parsed filters.
    Debug,
    /// One message per processed source.
    Info,
    /// Problems that do not stop the run.
    #[default]
    Warn,
    /// Failures.
    Error,
}

impl FromStr for LogLevel {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(CliError::InvalidConfig(format!(
                "unknown log level '{s}', expected one of: trace, debug, info, warn, error"
            ))),
        }
    }
}

impl LogLevel {
    /// Convert to a tracing filter directive string.
    #[must_use]
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Configuration for a `gherkin-tags` run.
///
/// # Environment Variables
///
/// - `GHERKIN_TAGS_LOG_LEVEL`: log level (trace, debug, info, warn, error)
/// - `GHERKIN_TAGS_MID_WORD`: whether `@` inside a word may start a tag
///   (allow, reject)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CliConfig {
    /// Log level.
    pub log_level: LogLevel,
    /// Policy for markers that follow a non-whitespace character.
    pub mid_word: MidWordTags,
}

impl CliConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults for missing values.
    ///
    /// # Errors
    ///
    /// Returns `CliError::InvalidConfig` if a variable holds an invalid value.
    pub fn from_env() -> Result<Self, CliError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `CliError::InvalidConfig` if a variable holds an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CliError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let log_level = match lookup(LOG_LEVEL_VAR) {
            Some(val) => val.parse()?,
            None => LogLevel::default(),
        };

        let mid_word = match lookup(MID_WORD_VAR) {
            Some(val) => val
                .parse()
                .map_err(|err| CliError::InvalidConfig(format!("{MID_WORD_VAR}: {err}")))?,
            None => MidWordTags::default(),
        };

        Ok(Self {
            log_level,
            mid_word,
        })
    }

    /// Apply command-line overrides on top of environment-based values.
    #[must_use]
    pub fn apply_overrides(
        mut self,
        log_level: Option<LogLevel>,
        mid_word: Option<MidWordTags>,
    ) -> Self {
        if let Some(level) = log_level {
            self.log_level = level;
        }

        if let Some(policy) = mid_word {
            self.mid_word = policy;
        }

        self
    }

    /// Create a new configuration with the specified log level.
    #[must_use]
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }

    /// Scanner options derived from this configuration.
    #[must_use]
    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions::default().with_mid_word(self.mid_word)
    }
}
