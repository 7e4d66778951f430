//! Scan feature sources and write the requested report.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use gherkin_tag_lexer::{
    LocatedTagListener, ScanOptions, Tag, TagCounter, TagExpression, scan_document,
};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::CliError;

/// Name reported for text read from standard input.
pub const STDIN_NAME: &str = "<stdin>";

/// A feature source loaded into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    /// Name used in reported locations.
    pub name: String,
    /// Full text of the source.
    pub text: String,
}

impl Source {
    /// Wrap in-memory text.
    #[must_use]
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    /// Read a feature file.
    ///
    /// # Errors
    ///
    /// Returns `CliError::Read` when the file cannot be read as UTF-8.
    pub fn read(path: &Path) -> Result<Self, CliError> {
        let text = fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(path.display().to_string(), text))
    }

    /// Read a whole stream under `name`.
    ///
    /// # Errors
    ///
    /// Returns `CliError::Read` when the stream fails or is not UTF-8.
    pub fn from_reader(name: &str, mut reader: impl Read) -> Result<Self, CliError> {
        let mut text = String::new();
        reader
            .read_to_string(&mut text)
            .map_err(|source| CliError::Read {
                path: PathBuf::from(name),
                source,
            })?;
        Ok(Self::new(name, text))
    }
}

/// Load every named file, or standard input when none are named.
///
/// # Errors
///
/// Returns the first read failure.
pub fn read_sources(paths: &[PathBuf]) -> Result<Vec<Source>, CliError> {
    if paths.is_empty() {
        debug!("no files given, reading standard input");
        return Ok(vec![Source::from_reader(STDIN_NAME, io::stdin().lock())?]);
    }
    paths.iter().map(|path| Source::read(path)).collect()
}

/// Shape of the report written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Format {
    /// `path:line: @tag`, one per tag.
    #[default]
    Lines,
    /// One JSON object per tag.
    Json,
    /// Tags with their locations.
    Count,
    /// A single JSON object mapping tags to locations.
    CountJson,
}

impl Format {
    /// Select the format from the `--json` and `--count` flags.
    #[must_use]
    pub const fn from_flags(json: bool, count: bool) -> Self {
        match (json, count) {
            (false, false) => Self::Lines,
            (true, false) => Self::Json,
            (false, true) => Self::Count,
            (true, true) => Self::CountJson,
        }
    }
}

/// Everything a run needs besides its sources.
#[derive(Debug, Clone, Default)]
pub struct Request {
    /// Scanner options.
    pub options: ScanOptions,
    /// Filter applied to each tag line; empty keeps everything.
    pub filter: TagExpression,
    /// Report shape.
    pub format: Format,
}

impl Request {
    /// Build a request, parsing `--tags` terms into a filter.
    ///
    /// # Errors
    ///
    /// Returns `CliError::Expression` when a term is malformed.
    pub fn new<S: AsRef<str>>(
        options: ScanOptions,
        tag_terms: &[S],
        format: Format,
    ) -> Result<Self, CliError> {
        let filter = TagExpression::new(tag_terms.iter().map(AsRef::as_ref))?;
        Ok(Self {
            options,
            filter,
            format,
        })
    }
}

#[derive(Debug)]
struct TagLine<'a> {
    line: usize,
    tags: Vec<&'a str>,
}

fn tag_lines<'a>(text: &'a str, request: &Request) -> Vec<TagLine<'a>> {
    let mut lines: Vec<TagLine<'a>> = Vec::new();
    for located in scan_document(text, request.options) {
        match lines.last_mut() {
            Some(current) if current.line == located.line => current.tags.push(located.as_str()),
            _ => lines.push(TagLine {
                line: located.line,
                tags: vec![located.as_str()],
            }),
        }
    }
    lines.retain(|tag_line| request.filter.evaluate(tag_line.tags.iter().copied()));
    lines
}

#[derive(Serialize)]
struct Record<'a> {
    path: &'a str,
    line: usize,
    tag: &'a str,
}

/// Scan `sources` and write the report to `out`, returning the number of
/// tags reported.
///
/// # Errors
///
/// Returns `CliError::Io` or `CliError::Json` when writing fails.
pub fn run<W: Write>(request: &Request, sources: &[Source], out: &mut W) -> Result<usize, CliError> {
    let mut counter = TagCounter::new();
    let mut reported = 0;
    for source in sources {
        let lines = tag_lines(&source.text, request);
        let tag_count: usize = lines.iter().map(|tag_line| tag_line.tags.len()).sum();
        info!(source = %source.name, tag_lines = lines.len(), tag_count, "scanned source");
        reported += tag_count;
        counter.set_uri(source.name.as_str());
        for TagLine { line, tags } in &lines {
            for &tag in tags {
                match request.format {
                    Format::Lines => writeln!(out, "{}:{line}: {tag}", source.name)?,
                    Format::Json => {
                        let record = Record {
                            path: &source.name,
                            line: *line,
                            tag,
                        };
                        serde_json::to_writer(&mut *out, &record)?;
                        writeln!(out)?;
                    }
                    Format::Count | Format::CountJson => counter.tag(tag, *line),
                }
            }
        }
    }
    match request.format {
        Format::Count => write_counts(&counter, out)?,
        Format::CountJson => write_count_json(&counter, out)?,
        Format::Lines | Format::Json => {}
    }
    out.flush()?;
    Ok(reported)
}

fn write_counts<W: Write>(counter: &TagCounter, out: &mut W) -> Result<(), CliError> {
    for (tag, locations) in counter.counts() {
        writeln!(out, "{tag} ({})", locations.len())?;
        for location in locations {
            writeln!(out, "  {location}")?;
        }
    }
    Ok(())
}

fn write_count_json<W: Write>(counter: &TagCounter, out: &mut W) -> Result<(), CliError> {
    let counts: BTreeMap<&Tag, Vec<String>> = counter
        .counts()
        .iter()
        .map(|(tag, locations)| (tag, locations.iter().map(ToString::to_string).collect()))
        .collect();
    serde_json::to_writer(&mut *out, &counts)?;
    writeln!(out)?;
    Ok(())
}
