//! Per-tag occurrence tallies across one or more feature sources.

use std::collections::BTreeMap;
use std::fmt;

use crate::document::{LocatedTagListener, scan_document_into};
use crate::options::ScanOptions;
use crate::tag::Tag;

/// Where a tag was seen.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TagLocation {
    /// Source the tag came from, typically a feature file path.
    pub uri: String,
    /// 1-based line number.
    pub line: usize,
}

impl fmt::Display for TagLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.uri, self.line)
    }
}

/// Listener recording every location at which each tag occurs.
///
/// Only direct occurrences are counted: a feature tag is recorded on the
/// feature's tag line, not on every scenario that inherits it.
///
/// # Examples
/// ```
/// use gherkin_tag_lexer::{ScanOptions, TagCounter};
/// let mut counter = TagCounter::new();
/// counter.count_document("f.feature", "@a\nFeature: x\n@a @b\n", ScanOptions::default());
/// let locations: Vec<String> = counter
///     .locations("@a")
///     .iter()
///     .map(ToString::to_string)
///     .collect();
/// assert_eq!(locations, ["f.feature:1", "f.feature:3"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagCounter {
    uri: String,
    counts: BTreeMap<Tag, Vec<TagLocation>>,
}

impl TagCounter {
    /// Create an empty counter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the source recorded against subsequent tags.
    pub fn set_uri(&mut self, uri: impl Into<String>) {
        self.uri = uri.into();
    }

    /// Scan `source` under `uri`, returning the number of tags seen.
    pub fn count_document(
        &mut self,
        uri: impl Into<String>,
        source: &str,
        options: ScanOptions,
    ) -> usize {
        self.set_uri(uri);
        scan_document_into(source, options, self)
    }

    /// Locations recorded for `tag`, in the order they were seen.
    #[must_use]
    pub fn locations(&self, tag: &str) -> &[TagLocation] {
        self.counts
            .get(tag)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// All tallies, ordered by tag text.
    #[must_use]
    pub fn counts(&self) -> &BTreeMap<Tag, Vec<TagLocation>> {
        &self.counts
    }

    /// Consume the counter, returning its tallies.
    #[must_use]
    pub fn into_counts(self) -> BTreeMap<Tag, Vec<TagLocation>> {
        self.counts
    }
}

impl LocatedTagListener for TagCounter {
    fn tag(&mut self, tag: &str, line: usize) {
        let Ok(owned) = tag.parse::<Tag>() else {
            return;
        };
        self.counts.entry(owned).or_default().push(TagLocation {
            uri: self.uri.clone(),
            line,
        });
    }
}
