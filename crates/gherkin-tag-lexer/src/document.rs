//! Route the tag lines of a whole feature source to the line scanner.
//!
//! A line is a tag candidate when, after trimming its indentation, it starts
//! with the marker. Comment lines and the contents of doc strings are never
//! scanned, so example feature text quoted inside a step's doc string does
//! not leak tags into the enclosing document.

use log::{debug, trace};

use crate::options::ScanOptions;
use crate::scanner::{TagScanner, scan_tags_with};
use crate::tag::{MARKER, Tag, TagSpan};

const BYTE_ORDER_MARK: char = '\u{feff}';
const DOC_STRING_FENCES: [&str; 2] = ["\"\"\"", "```"];

/// Whether `line` should be handed to the tag scanner.
///
/// # Examples
/// ```
/// use gherkin_tag_lexer::is_tag_line;
/// assert!(is_tag_line("   @wip @slow"));
/// assert!(!is_tag_line("Scenario: @not a tag line"));
/// ```
#[must_use]
pub fn is_tag_line(line: &str) -> bool {
    line.trim_start().starts_with(MARKER)
}

fn doc_string_fence(line: &str) -> Option<&'static str> {
    let trimmed = line.trim_start();
    DOC_STRING_FENCES
        .into_iter()
        .find(|fence| trimmed.starts_with(fence))
}

/// A tag together with the 1-based number of the line it was found on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocatedTag<'a> {
    /// The recognised tag.
    pub tag: TagSpan<'a>,
    /// 1-based line number within the scanned source.
    pub line: usize,
}

impl<'a> LocatedTag<'a> {
    /// The tag text, marker included.
    #[must_use]
    pub const fn as_str(&self) -> &'a str {
        self.tag.as_str()
    }

    /// Copy the tag into an owned [`Tag`].
    #[must_use]
    pub fn to_tag(&self) -> Tag {
        self.tag.to_tag()
    }
}

/// Iterator over every tag in a feature source, in document order.
///
/// Created by [`scan_document`].
#[derive(Debug, Clone)]
pub struct DocumentTags<'a> {
    lines: std::iter::Enumerate<std::str::Split<'a, char>>,
    current: Option<(usize, TagScanner<'a>)>,
    open_fence: Option<&'static str>,
    options: ScanOptions,
}

impl<'a> DocumentTags<'a> {
    fn new(source: &'a str, options: ScanOptions) -> Self {
        let source = source.strip_prefix(BYTE_ORDER_MARK).unwrap_or(source);
        Self {
            lines: source.split('\n').enumerate(),
            current: None,
            open_fence: None,
            options,
        }
    }

    /// Advance to the next line that should be scanned.
    fn next_tag_line(&mut self) -> Option<(usize, &'a str)> {
        for (index, line) in self.lines.by_ref() {
            let number = index + 1;
            if let Some(open) = self.open_fence {
                if doc_string_fence(line) == Some(open) {
                    debug!("doc string closed at line {number}");
                    self.open_fence = None;
                }
                continue;
            }
            if let Some(fence) = doc_string_fence(line) {
                debug!("doc string opened at line {number}");
                self.open_fence = Some(fence);
                continue;
            }
            if is_tag_line(line) {
                trace!("scanning tag line {number}");
                return Some((number, line));
            }
        }
        None
    }
}

impl<'a> Iterator for DocumentTags<'a> {
    type Item = LocatedTag<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((line, scanner)) = self.current.as_mut() {
                if let Some(tag) = scanner.next() {
                    return Some(LocatedTag { tag, line: *line });
                }
                self.current = None;
            }
            let (number, line) = self.next_tag_line()?;
            self.current = Some((number, scan_tags_with(line, self.options)));
        }
    }
}

impl std::iter::FusedIterator for DocumentTags<'_> {}

/// Scan every tag line of `source`.
///
/// A leading byte-order mark is ignored and `\r\n` line endings are
/// accepted.
///
/// # Examples
/// ```
/// use gherkin_tag_lexer::{ScanOptions, scan_document};
/// let source = "@ft\nFeature: hi\n\n  @st1 @st2\n  Scenario: First\n";
/// let found: Vec<(usize, &str)> = scan_document(source, ScanOptions::default())
///     .map(|located| (located.line, located.as_str()))
///     .collect();
/// assert_eq!(found, [(1, "@ft"), (4, "@st1"), (4, "@st2")]);
/// ```
#[must_use]
pub fn scan_document(source: &str, options: ScanOptions) -> DocumentTags<'_> {
    DocumentTags::new(source, options)
}

/// Receives tags together with the line they occur on.
pub trait LocatedTagListener {
    /// Called once per tag, in document order.
    fn tag(&mut self, tag: &str, line: usize);
}

impl<F> LocatedTagListener for F
where
    F: FnMut(&str, usize),
{
    fn tag(&mut self, tag: &str, line: usize) {
        self(tag, line);
    }
}

/// Scan `source` and notify `listener` of every tag, returning the tag count.
pub fn scan_document_into<L>(source: &str, options: ScanOptions, listener: &mut L) -> usize
where
    L: LocatedTagListener + ?Sized,
{
    let mut count = 0;
    for located in scan_document(source, options) {
        listener.tag(located.as_str(), located.line);
        count += 1;
    }
    count
}
