//! Borrowed and owned tag values.

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use derive_more::Deref;

use crate::errors::TagError;
use crate::scanner::scan_tags;

/// The character that introduces every tag.
pub const MARKER: char = '@';

/// A tag recognised in a line, borrowing the line's text.
///
/// `start` is the byte offset of the marker within the scanned line. It is
/// carried for diagnostics only; two spans with the same text are the same
/// tag as far as consumers are concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TagSpan<'a> {
    text: &'a str,
    start: usize,
}

impl<'a> TagSpan<'a> {
    pub(crate) const fn new(text: &'a str, start: usize) -> Self {
        Self { text, start }
    }

    /// The tag text, marker included.
    #[must_use]
    pub const fn as_str(&self) -> &'a str {
        self.text
    }

    /// The tag text without its leading marker.
    #[must_use]
    pub fn name(&self) -> &'a str {
        self.text.strip_prefix(MARKER).unwrap_or(self.text)
    }

    /// Byte offset of the marker within the scanned line.
    #[must_use]
    pub const fn start(&self) -> usize {
        self.start
    }

    /// Byte offset one past the last character of the tag.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.start + self.text.len()
    }

    /// Copy the span into an owned [`Tag`].
    #[must_use]
    pub fn to_tag(&self) -> Tag {
        Tag(self.text.to_string())
    }
}

impl fmt::Display for TagSpan<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text)
    }
}

impl PartialEq<str> for TagSpan<'_> {
    fn eq(&self, other: &str) -> bool {
        self.text == other
    }
}

impl PartialEq<&str> for TagSpan<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.text == *other
    }
}

/// An owned tag such as `@wip`.
///
/// Values can only be built from text that scans as exactly one tag, so a
/// `Tag` always starts with [`MARKER`] and never contains whitespace or a
/// second marker.
///
/// # Examples
/// ```
/// use gherkin_tag_lexer::Tag;
/// let tag: Tag = "@Значения".parse().expect("valid tag");
/// assert_eq!(tag.name(), "Значения");
/// assert!("@".parse::<Tag>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deref)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
pub struct Tag(String);

impl Tag {
    /// The tag text, marker included.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The tag text without its leading marker.
    #[must_use]
    pub fn name(&self) -> &str {
        self.0.strip_prefix(MARKER).unwrap_or(&self.0)
    }

    /// Consume the tag, returning its text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl FromStr for Tag {
    type Err = TagError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        if text.is_empty() {
            return Err(TagError::Empty);
        }
        let mut spans = scan_tags(text);
        match (spans.next(), spans.next()) {
            (Some(span), None) if span.as_str() == text => Ok(span.to_tag()),
            _ => Err(TagError::NotSingleTag(text.to_string())),
        }
    }
}

impl From<TagSpan<'_>> for Tag {
    fn from(span: TagSpan<'_>) -> Self {
        span.to_tag()
    }
}

impl AsRef<str> for Tag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Tag {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for Tag {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Tag {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("@dog")]
    #[case("@シナリオテンプレート")]
    #[case("@#not_a_comment")]
    #[case("@BJ-x98.77")]
    fn parses_single_tags(#[case] text: &str) {
        let tag = text
            .parse::<Tag>()
            .unwrap_or_else(|err| panic!("`{text}` should parse: {err}"));
        assert_eq!(tag, text);
    }

    #[rstest]
    #[case("dog")]
    #[case("@")]
    #[case("@@test")]
    #[case("@one@two")]
    #[case("@dog ")]
    #[case(" @dog")]
    fn rejects_text_that_is_not_one_tag(#[case] text: &str) {
        assert_eq!(
            text.parse::<Tag>(),
            Err(TagError::NotSingleTag(text.to_string()))
        );
    }

    #[test]
    fn rejects_empty_text() {
        assert_eq!("".parse::<Tag>(), Err(TagError::Empty));
    }

    #[test]
    fn span_reports_offsets_and_name() {
        let span = TagSpan::new("@cat", 5);
        assert_eq!(span.start(), 5);
        assert_eq!(span.end(), 9);
        assert_eq!(span.name(), "cat");
        assert_eq!(Tag::from(span).into_string(), "@cat");
    }

    #[test]
    fn derefs_to_text() {
        let tag = TagSpan::new("@wip", 0).to_tag();
        assert!(tag.starts_with('@'));
        assert_eq!(tag.len(), 4);
    }
}
