//! Scanner configuration.

use std::fmt;
use std::str::FromStr;

/// How a marker glued to preceding text (as in `abc@tag`) is treated.
///
/// Adjacent tags such as `@one@two` are unaffected by this setting: a marker
/// that directly follows the end of a tag always starts a new tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MidWordTags {
    /// Any marker not preceded by another marker may start a tag.
    #[default]
    Allow,
    /// A marker must sit at line start, after whitespace, or directly after
    /// a tag.
    Reject,
}

impl MidWordTags {
    /// Return the setting as a lowercase string slice.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Allow => "allow",
            Self::Reject => "reject",
        }
    }
}

impl fmt::Display for MidWordTags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a [`MidWordTags`] value fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MidWordTagsParseError(pub String);

impl fmt::Display for MidWordTagsParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown mid-word tag policy '{}', expected one of: allow, reject",
            self.0
        )
    }
}

impl std::error::Error for MidWordTagsParseError {}

impl FromStr for MidWordTags {
    type Err = MidWordTagsParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case("allow") {
            Ok(Self::Allow)
        } else if trimmed.eq_ignore_ascii_case("reject") {
            Ok(Self::Reject)
        } else {
            Err(MidWordTagsParseError(trimmed.to_string()))
        }
    }
}

/// Options controlling a scan.
///
/// # Examples
/// ```
/// use gherkin_tag_lexer::{MidWordTags, ScanOptions};
/// let options = ScanOptions::default().with_mid_word(MidWordTags::Reject);
/// assert_eq!(options.mid_word, MidWordTags::Reject);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ScanOptions {
    /// Treatment of markers glued to preceding text.
    pub mid_word: MidWordTags,
}

impl ScanOptions {
    /// Create a copy of the options with the given mid-word policy.
    #[must_use]
    pub const fn with_mid_word(mut self, mid_word: MidWordTags) -> Self {
        self.mid_word = mid_word;
        self
    }
}
