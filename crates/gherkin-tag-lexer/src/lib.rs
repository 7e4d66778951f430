//! Tag scanning for Gherkin feature files.
//!
//! Tags are the `@`-prefixed markers placed above features, scenarios and
//! examples. This crate recognises them in raw lines of text, reporting each
//! one in order either as an iterator ([`scan_tags`]) or through a listener
//! callback ([`scan_into`]). Helpers route the tag lines of a whole document
//! to the scanner ([`scan_document`]), tally occurrences ([`TagCounter`]) and
//! filter tag sets with command-line style expressions ([`TagExpression`]).
//!
//! A tag is a marker not immediately preceded by another marker, followed by
//! one or more characters that are neither whitespace nor a marker:
//!
//! ```
//! use gherkin_tag_lexer::scan_tags;
//! let tags: Vec<&str> = scan_tags("@BJ-x98.77 @O_o@#not_a_comment @@skip\n")
//!     .map(|tag| tag.as_str())
//!     .collect();
//! assert_eq!(tags, ["@BJ-x98.77", "@O_o", "@#not_a_comment"]);
//! ```

mod counter;
mod document;
mod errors;
mod expression;
mod listener;
mod options;
mod scanner;
mod tag;

pub use counter::{TagCounter, TagLocation};
pub use document::{
    DocumentTags, LocatedTag, LocatedTagListener, is_tag_line, scan_document, scan_document_into,
};
pub use errors::{TagError, TagExpressionError};
pub use expression::TagExpression;
pub use listener::{TagListener, TagRecorder, scan_into};
pub use options::{MidWordTags, MidWordTagsParseError, ScanOptions};
pub use scanner::{TagScanner, scan_tags, scan_tags_with};
pub use tag::{MARKER, Tag, TagSpan};
