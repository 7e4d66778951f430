//! Error types shared by the owned-tag and tag-expression modules.
//!
//! Scanning itself never fails; these errors only arise when callers ask for
//! text to be promoted into an owned [`Tag`](crate::Tag) or parsed as a
//! [`TagExpression`](crate::TagExpression).

use thiserror::Error;

/// Raised when text is not exactly one tag.
///
/// # Examples
/// ```
/// use gherkin_tag_lexer::{Tag, TagError};
/// let err = "@one@two".parse::<Tag>().unwrap_err();
/// assert_eq!(err, TagError::NotSingleTag("@one@two".into()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagError {
    /// The text was empty.
    #[error("tag text is empty")]
    Empty,
    /// The text did not scan as exactly one tag spanning the whole input.
    #[error("`{0}` is not a single tag")]
    NotSingleTag(String),
}

/// Errors surfaced while building a [`TagExpression`](crate::TagExpression).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagExpressionError {
    /// A comma-separated term was not of the form `[~]@tag[:limit]`.
    #[error("invalid tag expression term `{term}`: {reason}")]
    InvalidTerm {
        /// The offending term after whitespace trimming.
        term: String,
        /// Why the term was rejected.
        reason: &'static str,
    },
    /// The same tag was given two different limits.
    #[error("inconsistent limits for {tag}: {first} and {second}")]
    InconsistentLimit {
        /// Tag carrying the conflicting limits.
        tag: String,
        /// Limit recorded first.
        first: usize,
        /// Limit that conflicted with it.
        second: usize,
    },
}

pub(crate) fn invalid_term(term: &str, reason: &'static str) -> TagExpressionError {
    TagExpressionError::InvalidTerm {
        term: term.to_string(),
        reason,
    }
}
