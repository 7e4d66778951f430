//! Line scanner yielding the tags found in a single line.
//!
//! A tag starts at a marker (`@`) that is not immediately preceded by another
//! marker and runs over every following character that is neither whitespace
//! nor a marker. At least one such character is required. The `regex` crate
//! has no lookbehind, so the preceding character is tracked by hand while
//! walking the line.

use std::iter::Peekable;
use std::str::CharIndices;

use crate::options::{MidWordTags, ScanOptions};
use crate::tag::{MARKER, TagSpan};

/// Iterator over the tags of one line, in left-to-right order.
///
/// Created by [`scan_tags`] or [`scan_tags_with`]. The scanner borrows the
/// line and allocates nothing.
#[derive(Debug, Clone)]
pub struct TagScanner<'a> {
    line: &'a str,
    chars: Peekable<CharIndices<'a>>,
    prev: Option<char>,
    last_tag_end: Option<usize>,
    options: ScanOptions,
}

impl<'a> TagScanner<'a> {
    /// Create a scanner over `line` using `options`.
    #[must_use]
    pub fn new(line: &'a str, options: ScanOptions) -> Self {
        Self {
            line,
            chars: line.char_indices().peekable(),
            prev: None,
            last_tag_end: None,
            options,
        }
    }

    /// The line being scanned.
    #[must_use]
    pub const fn line(&self) -> &'a str {
        self.line
    }

    fn may_start_tag(&self, index: usize, prev: Option<char>) -> bool {
        match prev {
            Some(MARKER) => false,
            None => true,
            Some(ch) if ch.is_whitespace() => true,
            Some(_) => match self.options.mid_word {
                MidWordTags::Allow => true,
                MidWordTags::Reject => self.last_tag_end == Some(index),
            },
        }
    }

    /// Consume the body run after a marker, returning its end offset.
    fn consume_body(&mut self, body_start: usize) -> usize {
        let mut end = body_start;
        while let Some(&(index, ch)) = self.chars.peek() {
            if ch == MARKER || ch.is_whitespace() {
                break;
            }
            end = index + ch.len_utf8();
            self.prev = Some(ch);
            self.chars.next();
        }
        end
    }
}

impl<'a> Iterator for TagScanner<'a> {
    type Item = TagSpan<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((index, ch)) = self.chars.next() {
            let prev = self.prev.replace(ch);
            if ch != MARKER || !self.may_start_tag(index, prev) {
                continue;
            }
            let body_start = index + MARKER.len_utf8();
            let end = self.consume_body(body_start);
            if end == body_start {
                continue;
            }
            self.last_tag_end = Some(end);
            let text = self.line.get(index..end)?;
            return Some(TagSpan::new(text, index));
        }
        None
    }
}

impl std::iter::FusedIterator for TagScanner<'_> {}

/// Scan `line` for tags using the default options.
///
/// # Examples
/// ```
/// use gherkin_tag_lexer::scan_tags;
/// let tags: Vec<&str> = scan_tags("@one@two @@skip @\n").map(|t| t.as_str()).collect();
/// assert_eq!(tags, ["@one", "@two"]);
/// ```
#[must_use]
pub fn scan_tags(line: &str) -> TagScanner<'_> {
    TagScanner::new(line, ScanOptions::default())
}

/// Scan `line` for tags using `options`.
///
/// # Examples
/// ```
/// use gherkin_tag_lexer::{MidWordTags, ScanOptions, scan_tags_with};
/// let options = ScanOptions::default().with_mid_word(MidWordTags::Reject);
/// let tags: Vec<&str> = scan_tags_with("me@host @a@b", options).map(|t| t.as_str()).collect();
/// assert_eq!(tags, ["@a", "@b"]);
/// ```
#[must_use]
pub fn scan_tags_with(line: &str, options: ScanOptions) -> TagScanner<'_> {
    TagScanner::new(line, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn texts(line: &str, options: ScanOptions) -> Vec<&str> {
        scan_tags_with(line, options).map(|t| t.as_str()).collect()
    }

    #[rstest]
    #[case("@dog\n", &["@dog"])]
    #[case("@dog @cat\n", &["@dog", "@cat"])]
    #[case("@シナリオテンプレート\n", &["@シナリオテンプレート"])]
    #[case("@wip @Значения\n", &["@wip", "@Значения"])]
    #[case(
        "@BJ-x98.77 @BJ-z12.33 @O_o@#not_a_comment\n",
        &["@BJ-x98.77", "@BJ-z12.33", "@O_o", "@#not_a_comment"]
    )]
    #[case("@one@two\n", &["@one", "@two"])]
    #[case("@@test\n", &[])]
    #[case("@\n", &[])]
    #[case("", &[])]
    #[case("no markers here", &[])]
    #[case("@a\r\n", &["@a"])]
    #[case("\t@a\t@b ", &["@a", "@b"])]
    #[case("@@@x @y", &["@y"])]
    #[case("@a@@b @c", &["@a", "@c"])]
    #[case("@a@", &["@a"])]
    #[case("@ft # comment", &["@ft"])]
    #[case("@#^%&ST6**!", &["@#^%&ST6**!"])]
    fn scans_with_default_options(#[case] line: &str, #[case] expected: &[&str]) {
        assert_eq!(texts(line, ScanOptions::default()), expected);
    }

    #[rstest]
    #[case("abc@tag", MidWordTags::Allow, &["@tag"])]
    #[case("abc@tag", MidWordTags::Reject, &[])]
    #[case("@one@two", MidWordTags::Reject, &["@one", "@two"])]
    #[case("x @a y@b @c", MidWordTags::Reject, &["@a", "@c"])]
    #[case("@a@@b@c", MidWordTags::Reject, &["@a"])]
    fn honours_mid_word_policy(
        #[case] line: &str,
        #[case] policy: MidWordTags,
        #[case] expected: &[&str],
    ) {
        let options = ScanOptions::default().with_mid_word(policy);
        assert_eq!(texts(line, options), expected);
    }

    #[test]
    fn reports_byte_offsets() {
        let starts: Vec<usize> = scan_tags("@wip @Значения @x")
            .map(|t| t.start())
            .collect();
        assert_eq!(starts, [0, 5, 23]);
    }

    #[test]
    fn is_fused_after_exhaustion() {
        let mut scanner = scan_tags("@a");
        assert!(scanner.next().is_some());
        assert!(scanner.next().is_none());
        assert!(scanner.next().is_none());
    }

    #[test]
    fn repeated_scans_agree() {
        let line = "@one@two @Значения @@x";
        assert_eq!(
            texts(line, ScanOptions::default()),
            texts(line, ScanOptions::default())
        );
    }
}
