//! Callback-style delivery of scanned tags.
//!
//! [`scan_into`] drains a [`TagScanner`](crate::TagScanner) into a
//! [`TagListener`], one notification per tag, in order, before returning.

use crate::options::ScanOptions;
use crate::scanner::scan_tags_with;
use crate::tag::{Tag, TagSpan};

/// Receives the tags recognised in a line.
///
/// Closures taking `&str` implement this trait, so ad hoc sinks need no
/// wrapper type.
pub trait TagListener {
    /// Called once per tag, in left-to-right order.
    fn tag(&mut self, tag: &str);
}

impl<F> TagListener for F
where
    F: FnMut(&str),
{
    fn tag(&mut self, tag: &str) {
        self(tag);
    }
}

/// Scan `line` and notify `listener` of every tag, returning the tag count.
///
/// # Examples
/// ```
/// use gherkin_tag_lexer::{ScanOptions, scan_into};
/// let mut seen = Vec::new();
/// let count = scan_into("@wip @Значения\n", ScanOptions::default(), &mut |tag: &str| {
///     seen.push(tag.to_string());
/// });
/// assert_eq!(count, 2);
/// assert_eq!(seen, ["@wip", "@Значения"]);
/// ```
pub fn scan_into<L>(line: &str, options: ScanOptions, listener: &mut L) -> usize
where
    L: TagListener + ?Sized,
{
    let mut count = 0;
    for span in scan_tags_with(line, options) {
        listener.tag(span.as_str());
        count += 1;
    }
    count
}

/// Listener accumulating owned tags until they are claimed.
///
/// A document builder scans each tag line into the recorder and calls
/// [`grab_tags`](Self::grab_tags) when it meets the element the tags belong
/// to, leaving the recorder empty for the next element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagRecorder {
    tags: Vec<Tag>,
}

impl TagRecorder {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tags recorded since the last [`grab_tags`](Self::grab_tags).
    #[must_use]
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Whether no tags are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Take every pending tag, leaving the recorder empty.
    pub fn grab_tags(&mut self) -> Vec<Tag> {
        std::mem::take(&mut self.tags)
    }
}

impl TagListener for TagRecorder {
    fn tag(&mut self, tag: &str) {
        if let Ok(owned) = tag.parse::<Tag>() {
            self.tags.push(owned);
        }
    }
}

impl<'a> Extend<TagSpan<'a>> for TagRecorder {
    fn extend<I: IntoIterator<Item = TagSpan<'a>>>(&mut self, iter: I) {
        self.tags.extend(iter.into_iter().map(Tag::from));
    }
}
